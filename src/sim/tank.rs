//! Tanks: driving, timers, powerups and firing
//!
//! Motion is in per-frame units (a tank moves `velocity` pixels each frame and
//! turns `rot_speed` radians each frame). Cooldown, stun and powerup timers
//! count down in seconds.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::powerup::PowerupKind;
use crate::consts::MUZZLE_OFFSET;
use crate::heading;
use crate::tuning::Tuning;

/// Side a tank (or a bullet it fired) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
}

/// Cosmetic/stat variant for a tank's hull or gun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankPart {
    Basic,
    Desert,
    Jungle,
    Red,
    Snow,
    Urban,
    /// Bonus part; never handed out at random
    Rainbow,
}

/// (top speed, turn rate) per hull
const HULL_STATS: [(TankPart, f32, f32); 7] = [
    (TankPart::Basic, 3.0, 0.040),
    (TankPart::Desert, 3.4, 0.035),
    (TankPart::Jungle, 2.8, 0.050),
    (TankPart::Red, 3.6, 0.032),
    (TankPart::Snow, 3.1, 0.042),
    (TankPart::Urban, 2.9, 0.046),
    (TankPart::Rainbow, 4.0, 0.055),
];

/// (cooldown seconds, bullet damage) per gun
const GUN_STATS: [(TankPart, f32, f32); 7] = [
    (TankPart::Basic, 1.0, 1.0),
    (TankPart::Desert, 1.2, 1.3),
    (TankPart::Jungle, 0.8, 0.8),
    (TankPart::Red, 1.5, 1.6),
    (TankPart::Snow, 0.9, 0.9),
    (TankPart::Urban, 1.1, 1.2),
    (TankPart::Rainbow, 0.6, 1.8),
];

impl TankPart {
    /// Parts handed out at random (no rainbow)
    pub const STANDARD: [TankPart; 6] = [
        TankPart::Basic,
        TankPart::Desert,
        TankPart::Jungle,
        TankPart::Red,
        TankPart::Snow,
        TankPart::Urban,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::STANDARD[rng.random_range(0..Self::STANDARD.len())]
    }

    fn hull(self) -> (f32, f32) {
        HULL_STATS
            .iter()
            .find(|(p, ..)| *p == self)
            .map(|&(_, speed, turn)| (speed, turn))
            .unwrap_or((3.0, 0.04))
    }

    fn gun(self) -> (f32, f32) {
        GUN_STATS
            .iter()
            .find(|(p, ..)| *p == self)
            .map(|&(_, cooldown, damage)| (cooldown, damage))
            .unwrap_or((1.0, 1.0))
    }
}

/// Driver input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub team: Team,
    pub hull: TankPart,
    pub gun: TankPart,
    /// Screen-space center
    pub position: Vec2,
    /// Displacement for the current frame
    pub velocity: Vec2,
    pub rotation: f32,
    pub speed: f32,
    /// Rotation applied this frame
    pub rot_speed: f32,
    pub current_cooldown: f32,
    pub powerup: Option<PowerupKind>,
    pub powerup_time: f32,
    pub base_powerup_time: f32,
    /// Seconds left unable to drive or shoot
    pub stun_length: f32,
}

impl Tank {
    pub fn new(team: Team, hull: TankPart, gun: TankPart, position: Vec2, tuning: &Tuning) -> Self {
        Self {
            team,
            hull,
            gun,
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            speed: 0.0,
            rot_speed: 0.0,
            current_cooldown: 0.0,
            powerup: None,
            powerup_time: 0.0,
            base_powerup_time: tuning.powerup_duration,
            stun_length: 0.0,
        }
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun_length > 0.0
    }

    #[inline]
    pub fn has(&self, effect: PowerupKind) -> bool {
        self.powerup.is_some_and(|p| p.grants(effect))
    }

    pub fn max_speed(&self, tuning: &Tuning) -> f32 {
        let (speed, _) = self.hull.hull();
        if self.has(PowerupKind::Speed) {
            speed * tuning.speed_boost
        } else {
            speed
        }
    }

    pub fn turn_rate(&self) -> f32 {
        self.hull.hull().1
    }

    pub fn base_cooldown(&self, tuning: &Tuning) -> f32 {
        let (cooldown, _) = self.gun.gun();
        if self.has(PowerupKind::Rapid) {
            cooldown * tuning.rapid_cooldown_factor
        } else {
            cooldown
        }
    }

    pub fn damage(&self, tuning: &Tuning) -> f32 {
        let (_, damage) = self.gun.gun();
        if self.has(PowerupKind::Damage) {
            damage * tuning.damage_factor
        } else {
            damage
        }
    }

    /// Remaining cooldown as a 0..1 fraction (HUD bar)
    pub fn cooldown_fraction(&self, tuning: &Tuning) -> f32 {
        let base = self.base_cooldown(tuning);
        if base <= 0.0 { 0.0 } else { (self.current_cooldown / base).clamp(0.0, 1.0) }
    }

    /// Remaining powerup time as a 0..1 fraction (HUD bar)
    pub fn powerup_fraction(&self) -> f32 {
        if self.base_powerup_time <= 0.0 {
            0.0
        } else {
            (self.powerup_time / self.base_powerup_time).clamp(0.0, 1.0)
        }
    }

    /// Count down cooldown, stun and powerup timers
    pub fn tick_timers(&mut self, dt: f32) {
        self.current_cooldown = (self.current_cooldown - dt).max(0.0);
        self.stun_length = (self.stun_length - dt).max(0.0);
        if self.powerup.is_some() {
            self.powerup_time -= dt;
            if self.powerup_time <= 0.0 {
                log::debug!("{:?} powerup {:?} wore off", self.team, self.powerup);
                self.powerup = None;
                self.powerup_time = 0.0;
            }
        }
    }

    /// Apply driver input: turn, throttle, and derive this frame's velocity
    pub fn drive(&mut self, controls: &Controls, tuning: &Tuning) {
        if self.is_stunned() {
            self.speed = 0.0;
            self.rot_speed = 0.0;
            self.velocity = Vec2::ZERO;
            return;
        }

        self.rot_speed = match (controls.left, controls.right) {
            (true, false) => -self.turn_rate(),
            (false, true) => self.turn_rate(),
            _ => 0.0,
        };
        self.rotation += self.rot_speed;

        let top = self.max_speed(tuning);
        if controls.forward {
            self.speed = (self.speed + tuning.acceleration).min(top);
        } else if controls.reverse {
            self.speed = (self.speed - tuning.acceleration).max(-top * tuning.reverse_fraction);
        } else {
            self.speed *= tuning.friction;
            if self.speed.abs() < 0.05 {
                self.speed = 0.0;
            }
        }
        // A speed powerup wearing off must not leave us above the new top speed
        self.speed = self.speed.clamp(-top * tuning.reverse_fraction, top);
        self.velocity = heading(self.rotation) * self.speed;
    }

    /// Drive forward under AI control using the current `rot_speed`
    pub fn cruise(&mut self, tuning: &Tuning) {
        if self.is_stunned() {
            self.speed = 0.0;
            self.rot_speed = 0.0;
            self.velocity = Vec2::ZERO;
            return;
        }
        self.rotation += self.rot_speed;
        let top = self.max_speed(tuning);
        self.speed = (self.speed + tuning.acceleration).min(top);
        self.velocity = heading(self.rotation) * self.speed;
    }

    /// Cancel the frame's rotation and kill all motion after a collision
    pub fn halt(&mut self) {
        self.rotation -= self.rot_speed;
        self.speed = 0.0;
        self.rot_speed = 0.0;
    }

    /// Fire along `direction` if the gun is ready
    pub fn try_fire(&mut self, direction: Vec2, tuning: &Tuning) -> Option<Bullet> {
        if self.is_stunned() || self.current_cooldown > 0.0 {
            return None;
        }
        let dir = direction.try_normalize()?;
        self.current_cooldown = self.base_cooldown(tuning);
        Some(Bullet::new(
            self.team,
            self.position + dir * MUZZLE_OFFSET,
            dir * tuning.bullet_speed,
            self.damage(tuning),
        ))
    }

    /// A bullet landed: stun unless shielded. Returns whether the stun applied.
    pub fn take_hit(&mut self, damage: f32) -> bool {
        if self.has(PowerupKind::Shield) {
            return false;
        }
        self.stun_length = damage;
        true
    }

    /// Pick up a powerup, replacing any active one
    pub fn collect(&mut self, kind: PowerupKind) {
        self.powerup = Some(kind);
        self.powerup_time = self.base_powerup_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn tank() -> Tank {
        Tank::new(Team::Player, TankPart::Basic, TankPart::Basic, Vec2::ZERO, &Tuning::default())
    }

    #[test]
    fn test_random_part_is_never_rainbow() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..2000 {
            assert_ne!(TankPart::random(&mut rng), TankPart::Rainbow);
        }
    }

    #[test]
    fn test_drive_accelerates_to_top_speed() {
        let tuning = Tuning::default();
        let mut t = tank();
        let forward = Controls { forward: true, ..Default::default() };
        for _ in 0..200 {
            t.drive(&forward, &tuning);
        }
        assert!((t.speed - 3.0).abs() < 1e-4);
        assert!((t.velocity - Vec2::new(3.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_turning_and_halt_reverts_rotation() {
        let tuning = Tuning::default();
        let mut t = tank();
        let controls = Controls { forward: true, right: true, ..Default::default() };
        t.drive(&controls, &tuning);
        assert!(t.rotation > 0.0);
        t.halt();
        assert_eq!(t.rotation, 0.0);
        assert_eq!(t.speed, 0.0);
        assert_eq!(t.rot_speed, 0.0);
    }

    #[test]
    fn test_stunned_tank_cannot_move_or_fire() {
        let tuning = Tuning::default();
        let mut t = tank();
        assert!(t.take_hit(1.0));
        t.drive(&Controls { forward: true, ..Default::default() }, &tuning);
        assert_eq!(t.velocity, Vec2::ZERO);
        assert!(t.try_fire(Vec2::X, &tuning).is_none());

        t.tick_timers(1.0);
        assert!(!t.is_stunned());
        assert!(t.try_fire(Vec2::X, &tuning).is_some());
    }

    #[test]
    fn test_stunned_cruise_has_no_turn_to_undo() {
        let tuning = Tuning::default();
        let mut t = tank();
        t.rot_speed = 0.04;
        t.take_hit(1.0);
        t.cruise(&tuning);
        t.halt();
        assert_eq!(t.rotation, 0.0);
    }

    #[test]
    fn test_shield_blocks_stun() {
        let mut t = tank();
        t.collect(PowerupKind::Shield);
        assert!(!t.take_hit(2.0));
        assert!(!t.is_stunned());
    }

    #[test]
    fn test_cooldown_gates_fire() {
        let tuning = Tuning::default();
        let mut t = tank();
        let bullet = t.try_fire(Vec2::Y, &tuning).unwrap();
        assert_eq!(bullet.owner, Team::Player);
        assert!((bullet.position - Vec2::new(0.0, MUZZLE_OFFSET)).length() < 1e-4);
        assert!(t.try_fire(Vec2::Y, &tuning).is_none());
        assert_eq!(t.cooldown_fraction(&tuning), 1.0);
    }

    #[test]
    fn test_powerups_modify_stats_and_expire() {
        let tuning = Tuning::default();
        let mut t = tank();
        t.collect(PowerupKind::Rainbow);
        assert_eq!(t.max_speed(&tuning), 3.0 * tuning.speed_boost);
        assert_eq!(t.base_cooldown(&tuning), 1.0 * tuning.rapid_cooldown_factor);
        assert_eq!(t.damage(&tuning), 1.0 * tuning.damage_factor);
        assert_eq!(t.powerup_fraction(), 1.0);

        t.tick_timers(tuning.powerup_duration + 0.1);
        assert!(t.powerup.is_none());
        assert_eq!(t.max_speed(&tuning), 3.0);
    }
}
