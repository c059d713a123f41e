//! Per-frame game screen update
//!
//! Order within an active frame:
//! 1. Player timers, input, firing; bullets advance
//! 2. Board scrolls under the player; player collisions (terrain, objective, enemy)
//! 3. AI steering, driving and shooting; enemy collisions (player, terrain, objective)
//! 4. Bullet hits, powerup pickups, win/lose check

use glam::Vec2;

use super::ai::{self, AiTarget};
use super::collision::{AxisProbe, resolve_step};
use super::mask::Sprite;
use super::state::{GameEvent, GamePhase, GameState, Outcome};
use super::tank::{Controls, TankPart, Team};
use crate::consts::OBJECTIVE_REACHED_DISTANCE;
use crate::heading;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Driving and firing
    pub controls: Controls,
    /// Enter: leave the results screen
    pub confirm: bool,
    /// Escape: leave the game screen at any time
    pub escape: bool,
    /// Autopilot drives the player
    pub idle_mode: bool,
}

/// What a tank can run into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Obstacle {
    Terrain,
    Objective,
    OtherTank,
}

/// Moves one tank for the axis resolver. The player moves by scrolling the
/// board the other way; the enemy moves itself.
struct TankProbe<'a> {
    state: &'a mut GameState,
    team: Team,
    against: Obstacle,
}

impl AxisProbe for TankProbe<'_> {
    fn shift(&mut self, delta: Vec2) {
        match self.team {
            Team::Player => self.state.shift_board(-delta),
            Team::Enemy => self.state.enemy.position += delta,
        }
    }

    fn overlaps(&self) -> bool {
        touches(self.state, self.team, self.against)
    }
}

fn touches(state: &GameState, team: Team, against: Obstacle) -> bool {
    match against {
        Obstacle::Terrain => state.tank_on_terrain(team),
        Obstacle::Objective => state.tank_on_objective(team),
        Obstacle::OtherTank => state.tanks_touch(),
    }
}

/// Resolution order for each tank
const PLAYER_OBSTACLES: [Obstacle; 3] = [Obstacle::Terrain, Obstacle::Objective, Obstacle::OtherTank];
const ENEMY_OBSTACLES: [Obstacle; 3] = [Obstacle::OtherTank, Obstacle::Terrain, Obstacle::Objective];

/// Resolve a tank that has just moved by `step` against `obstacles`.
/// Returns whether it ran into terrain.
///
/// Any contact cancels the frame's turn and zeroes both speeds before the
/// step is split, so each kept axis is tested in the pose the tank ends the
/// frame in.
fn settle(state: &mut GameState, team: Team, obstacles: &[Obstacle], step: Vec2) -> bool {
    let contact: Vec<Obstacle> = obstacles
        .iter()
        .copied()
        .filter(|&against| touches(state, team, against))
        .collect();
    if contact.is_empty() {
        return false;
    }
    state.tank_mut(team).halt();

    let mut step = step;
    let mut bumped = contact.contains(&Obstacle::Terrain);
    for &against in obstacles {
        let mut probe = TankProbe {
            state: &mut *state,
            team,
            against,
        };
        if let Some(resolution) = resolve_step(&mut probe, step) {
            log::debug!("{team:?} hit {against:?}: {resolution:?}");
            step = resolution.kept(step);
            bumped |= against == Obstacle::Terrain;
        }
    }

    // A later pairing may have dropped an axis an earlier one relied on
    if obstacles.iter().any(|&against| touches(state, team, against)) {
        let mut probe = TankProbe {
            state: &mut *state,
            team,
            against: obstacles[0],
        };
        probe.shift(-step);
    }
    bumped
}

/// Advance the game screen by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.elapsed += dt as f64;

    if input.escape {
        log::info!("Leaving game screen");
        state.events.push(GameEvent::ScreenChange);
        return;
    }

    let controls = if input.idle_mode {
        ai::autopilot(&state.player, &state.objective, &state.terrain, &state.level.palette)
    } else {
        input.controls
    };

    if !state.milestones.reached_objective
        && state.player.position.distance(state.objective.position) <= OBJECTIVE_REACHED_DISTANCE
    {
        state.milestones.reached_objective = true;
    }

    match state.phase {
        GamePhase::Countdown => {
            if state.first_update {
                // Settle everything once before the countdown starts
                simulate(state, &Controls::default(), dt);
                state.first_update = false;
            } else {
                advance_countdown(state);
            }
        }
        GamePhase::Active => {
            simulate(state, &controls, dt);
            check_end(state);
        }
        GamePhase::GameOver => {
            if input.confirm {
                if unlock_earned(state) {
                    state.events.push(GameEvent::ContentUnlocked);
                }
                state.events.push(GameEvent::ScreenChange);
            }
        }
    }
}

fn advance_countdown(state: &mut GameState) {
    if state.countdown == 0 {
        log::info!("Go!");
        state.events.push(GameEvent::Go);
        state.events.push(GameEvent::MusicStart);
        state.phase = GamePhase::Active;
    } else if state.elapsed - 1.0 >= state.countdown_mark {
        state.countdown -= 1;
        if state.countdown != 0 {
            state.events.push(GameEvent::CountdownTick(state.countdown));
        }
        state.countdown_mark = state.elapsed;
    }
}

/// One frame of gameplay
pub(crate) fn simulate(state: &mut GameState, controls: &Controls, dt: f32) {
    // --- Player ---
    let was_cooling = state.player.current_cooldown > 0.0;
    state.player.tick_timers(dt);
    if was_cooling && state.player.current_cooldown == 0.0 {
        state.milestones.cooldown_ready = true;
    }

    state.player.drive(controls, &state.tuning);
    if controls.fire {
        let aim = heading(state.player.rotation);
        if let Some(bullet) = state.player.try_fire(aim, &state.tuning) {
            state.bullets.spawn(bullet);
        }
    }
    state.bullets.update(state.tuning.bullet_range);

    // The camera follows the player: move the world the other way
    let step = state.player.velocity;
    state.shift_board(-step);

    // The enemy has not moved yet, so any contact now is the player's doing
    if settle(state, Team::Player, &PLAYER_OBSTACLES, step) {
        state.bump();
    }

    // --- Enemy ---
    let steering = ai::steer_from_terrain(&mut state.enemy, &state.terrain, &state.level.palette, &state.tuning)
        || ai::steer_from_tank(&mut state.enemy, &state.player, &state.tuning);
    if !steering {
        ai::straighten(&mut state.enemy, &state.tuning);
    }

    state.enemy.tick_timers(dt);
    state.enemy.cruise(&state.tuning);
    let enemy_step = state.enemy.velocity;
    state.enemy.position += enemy_step;

    let target = match ai::choose_target(&state.enemy, &state.player, &state.objective, &state.tuning) {
        AiTarget::Objective => state.objective.position,
        AiTarget::Player => state.player.position,
    };
    if let Some(bullet) = ai::shoot_at(&mut state.enemy, target, &state.tuning) {
        state.bullets.spawn(bullet);
    }

    // The player has already been resolved, so contact now is the enemy's doing
    settle(state, Team::Enemy, &ENEMY_OBSTACLES, enemy_step);

    resolve_bullets(state);
    collect_powerups(state);
}

/// What a bullet struck first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Terrain,
    Tank(Team),
    Objective,
}

fn opponent(team: Team) -> Team {
    match team {
        Team::Player => Team::Enemy,
        Team::Enemy => Team::Player,
    }
}

/// Test every live bullet against terrain, the opposing tank, then the objective
pub(crate) fn resolve_bullets(state: &mut GameState) {
    for index in 0..state.bullets.len() {
        let Some(bullet) = state.bullets.get(index).filter(|b| b.active).cloned() else {
            continue;
        };

        let sprite = Sprite::new(&state.masks.bullet, bullet.position, bullet.rotation());
        let victim = opponent(bullet.owner);
        let hit = if state.terrain.hits(&sprite, &state.level.palette) {
            Some(Hit::Terrain)
        } else if sprite.intersects(&state.tank_sprite(victim)) {
            Some(Hit::Tank(victim))
        } else if sprite.intersects(&state.objective_sprite()) {
            Some(Hit::Objective)
        } else {
            None
        };

        let Some(hit) = hit else {
            continue;
        };

        match hit {
            Hit::Terrain => {}
            Hit::Tank(team) => {
                if state.tank_mut(team).take_hit(bullet.damage) {
                    log::debug!("{team:?} stunned for {:.2}s", bullet.damage);
                    state.events.push(GameEvent::Stunned { team });
                }
            }
            Hit::Objective => {
                let amount = match bullet.owner {
                    Team::Player => bullet.damage,
                    Team::Enemy => bullet.damage + state.tuning.enemy_objective_bonus,
                };
                let remaining = state.objective.hit(bullet.owner, amount);
                log::debug!("{:?} hit the objective, {remaining:.1} left", bullet.owner);
                state.events.push(GameEvent::ObjectiveHit {
                    team: bullet.owner,
                    remaining,
                });
            }
        }
        state.events.push(GameEvent::Explosion);
        state.bullets.destroy(index);
    }
    state.bullets.sweep();
}

/// Hand powerups to whichever tank touches them, player first
pub(crate) fn collect_powerups(state: &mut GameState) {
    let mut collected = Vec::new();
    for (index, powerup) in state.powerups.iter().enumerate() {
        let sprite = Sprite::new(&state.masks.powerup, powerup.position, 0.0);
        if sprite.intersects(&state.tank_sprite(Team::Player)) {
            collected.push((index, Team::Player));
        } else if sprite.intersects(&state.tank_sprite(Team::Enemy)) {
            collected.push((index, Team::Enemy));
        }
    }

    for &(index, team) in &collected {
        let kind = state.powerups[index].kind;
        state.tank_mut(team).collect(kind);
        state.events.push(GameEvent::PowerupCollected { team, kind });
        if team == Team::Player {
            state.milestones.powerup_collected = true;
        }
        log::debug!("{team:?} collected {kind:?}");
    }

    for &(index, _) in collected.iter().rev() {
        state.powerups.remove(index);
    }
}

fn check_end(state: &mut GameState) {
    let outcome = match state.objective.winner() {
        Some(Team::Player) => Outcome::Won,
        Some(Team::Enemy) => Outcome::Lost,
        None => return,
    };

    log::info!("Game over: {outcome:?} after {:.1}s", state.elapsed);
    state.phase = GamePhase::GameOver;
    state.outcome = Some(outcome);
    state.events.push(match outcome {
        Outcome::Won => GameEvent::Won,
        Outcome::Lost => GameEvent::Lost,
    });
    state.events.push(GameEvent::MusicStop);
}

/// Career wins with standard parts unlock content
fn unlock_earned(state: &GameState) -> bool {
    state.unlock_content
        && state.outcome == Some(Outcome::Won)
        && state.player.hull != TankPart::Rainbow
        && state.player.gun != TankPart::Rainbow
}
