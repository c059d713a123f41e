//! Game state and match setup
//!
//! All state a frame reads or writes lives here. The camera follows the
//! player, so the player tank stays at the view center and everything else
//! (terrain, enemy, objective, bullets, powerups) scrolls underneath it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::BulletHandler;
use super::level::{Level, LevelId};
use super::mask::{CollisionMask, Sprite};
use super::objective::FinishObjective;
use super::powerup::{Powerup, PowerupKind};
use super::tank::{Tank, TankPart, Team};
use super::terrain::Terrain;
use crate::consts::*;
use crate::error::{Error, Result};
use crate::tuning::Tuning;

/// Current phase of the game screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Counting down to the start
    Countdown,
    /// Active gameplay
    Active,
    /// Match decided, waiting for the player to confirm
    GameOver,
}

/// How the match ended, from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Things the host should react to (sounds, music, screen changes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Countdown reached this (non-zero) number
    CountdownTick(u32),
    /// Countdown finished; gameplay starts
    Go,
    MusicStart,
    MusicStop,
    /// A tank ran into something
    Bump,
    /// A bullet hit something
    Explosion,
    PowerupCollected { team: Team, kind: PowerupKind },
    Stunned { team: Team },
    ObjectiveHit { team: Team, remaining: f32 },
    Won,
    Lost,
    /// Player won under conditions that unlock new content
    ContentUnlocked,
    /// Leave the game screen
    ScreenChange,
}

/// One-time tutorial milestones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestones {
    pub cooldown_ready: bool,
    pub powerup_collected: bool,
    pub reached_objective: bool,
}

/// Choices made before a match starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSetup {
    pub seed: u64,
    pub level: LevelId,
    pub player_hull: TankPart,
    pub player_gun: TankPart,
    pub enemy_hull: TankPart,
    pub enemy_gun: TankPart,
    /// A win in this match can unlock content (career mode)
    pub unlock_content: bool,
}

impl MatchSetup {
    /// Random level and random standard parts for both tanks
    pub fn random(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player_hull = TankPart::random(&mut rng);
        let player_gun = TankPart::random(&mut rng);
        let enemy_hull = TankPart::random(&mut rng);
        let enemy_gun = TankPart::random(&mut rng);
        Self {
            seed,
            level: LevelId::random(&mut rng),
            player_hull,
            player_gun,
            enemy_hull,
            enemy_gun,
            unlock_content: false,
        }
    }
}

/// Collision masks for every sprite kind
#[derive(Debug, Clone)]
pub struct MaskSet {
    pub tank: CollisionMask,
    pub bullet: CollisionMask,
    pub powerup: CollisionMask,
    pub objective: CollisionMask,
}

impl Default for MaskSet {
    fn default() -> Self {
        Self {
            tank: CollisionMask::rect(TANK_WIDTH, TANK_HEIGHT),
            bullet: CollisionMask::disc(BULLET_RADIUS),
            powerup: CollisionMask::disc(POWERUP_RADIUS),
            objective: CollisionMask::disc(OBJECTIVE_RADIUS),
        }
    }
}

/// Complete game screen state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub tuning: Tuning,
    pub level: Level,
    pub phase: GamePhase,
    /// Seconds remaining on the start countdown
    pub countdown: u32,
    /// Game time of the last countdown decrement
    pub countdown_mark: f64,
    /// Total game time in seconds
    pub elapsed: f64,
    /// The first frame runs one neutral simulation pass before the countdown
    pub first_update: bool,
    pub player: Tank,
    pub enemy: Tank,
    pub terrain: Terrain,
    pub bullets: BulletHandler,
    pub powerups: Vec<Powerup>,
    pub objective: FinishObjective,
    pub outcome: Option<Outcome>,
    pub unlock_content: bool,
    pub milestones: Milestones,
    pub masks: MaskSet,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Set up a match on `level` over the host-supplied `terrain` image
    pub fn new(setup: &MatchSetup, level: Level, mut terrain: Terrain, tuning: Tuning) -> Result<Self> {
        if terrain.size() != level.size {
            return Err(Error::TerrainSize {
                level: level.name,
                expected: level.size,
                actual: terrain.size(),
            });
        }

        // Powerup kinds use a separate stream from the one MatchSetup::random draws from
        let mut rng = Pcg32::seed_from_u64(setup.seed ^ 0x5eed_cafe);

        let origin = level.board_origin();
        terrain.position = origin;

        let player = Tank::new(Team::Player, setup.player_hull, setup.player_gun, VIEW_CENTER, &tuning);
        let enemy = Tank::new(
            Team::Enemy,
            setup.enemy_hull,
            setup.enemy_gun,
            VIEW_CENTER + ENEMY_SPAWN_OFFSET,
            &tuning,
        );
        let objective = FinishObjective::new(level.to_screen(level.finish, origin), tuning.objective_health);

        let powerups = level
            .powerup_spawns
            .iter()
            .map(|&spawn| Powerup {
                kind: PowerupKind::roll(&mut rng, tuning.rainbow_odds),
                position: level.to_screen(spawn, origin),
            })
            .collect::<Vec<_>>();

        log::info!(
            "Match on {} (seed {}): player {:?}/{:?} vs enemy {:?}/{:?}, {} powerups",
            level.name,
            setup.seed,
            setup.player_hull,
            setup.player_gun,
            setup.enemy_hull,
            setup.enemy_gun,
            powerups.len()
        );

        Ok(Self {
            seed: setup.seed,
            tuning,
            level,
            phase: GamePhase::Countdown,
            countdown: COUNTDOWN_START,
            countdown_mark: 0.0,
            elapsed: 0.0,
            first_update: true,
            player,
            enemy,
            terrain,
            bullets: BulletHandler::new(),
            powerups,
            objective,
            outcome: None,
            unlock_content: setup.unlock_content,
            milestones: Milestones::default(),
            masks: MaskSet::default(),
            events: Vec::new(),
        })
    }

    /// Scroll everything except the player by `delta`
    pub fn shift_board(&mut self, delta: Vec2) {
        self.terrain.position += delta;
        self.bullets.shift(delta);
        self.enemy.position += delta;
        self.objective.position += delta;
        for powerup in &mut self.powerups {
            powerup.position += delta;
        }
    }

    pub fn tank(&self, team: Team) -> &Tank {
        match team {
            Team::Player => &self.player,
            Team::Enemy => &self.enemy,
        }
    }

    pub fn tank_mut(&mut self, team: Team) -> &mut Tank {
        match team {
            Team::Player => &mut self.player,
            Team::Enemy => &mut self.enemy,
        }
    }

    pub fn tank_sprite(&self, team: Team) -> Sprite<'_> {
        let tank = self.tank(team);
        Sprite::new(&self.masks.tank, tank.position, tank.rotation)
    }

    pub fn objective_sprite(&self) -> Sprite<'_> {
        Sprite::new(&self.masks.objective, self.objective.position, 0.0)
    }

    pub fn tanks_touch(&self) -> bool {
        self.tank_sprite(Team::Player)
            .intersects(&self.tank_sprite(Team::Enemy))
    }

    pub fn tank_on_terrain(&self, team: Team) -> bool {
        self.terrain.hits(&self.tank_sprite(team), &self.level.palette)
    }

    pub fn tank_on_objective(&self, team: Team) -> bool {
        self.tank_sprite(team).intersects(&self.objective_sprite())
    }

    /// Raise a bump cue at most once per frame
    pub fn bump(&mut self) {
        if !self.events.contains(&GameEvent::Bump) {
            self.events.push(GameEvent::Bump);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::sim::terrain::Rgb;

    /// A small open level with walls around the edge, start in the middle
    pub fn open_level() -> Level {
        Level {
            name: "Test",
            size: (1000, 1000),
            start: Vec2::new(500.0, 500.0),
            finish: Vec2::new(500.0, 200.0),
            powerup_spawns: vec![Vec2::new(500.0, 800.0)],
            palette: super::super::terrain::Palette::walls(),
        }
    }

    pub fn setup() -> MatchSetup {
        MatchSetup {
            seed: 42,
            level: LevelId::Plains,
            player_hull: TankPart::Basic,
            player_gun: TankPart::Basic,
            enemy_hull: TankPart::Basic,
            enemy_gun: TankPart::Basic,
            unlock_content: true,
        }
    }

    pub fn state_with(terrain: Terrain) -> GameState {
        GameState::new(&setup(), open_level(), terrain, Tuning::default()).unwrap()
    }

    pub fn open_state() -> GameState {
        state_with(Terrain::walled(1000, 1000, 10))
    }

    pub fn grass() -> Terrain {
        Terrain::filled(1000, 1000, Rgb::GRASS)
    }
}
