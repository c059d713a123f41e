//! Panzer Dash - A top-down tank race to a shared objective
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, pixel collisions, AI, game state)
//! - `ui`: Menu and sound-option selection logic, HUD tables
//! - `persistence`: Versioned JSON save/load
//! - `settings`: Player preferences and unlock progress
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Nominal frame step (the simulation moves in per-frame units, timers in seconds)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// View dimensions; the player tank sits at the center
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;
    pub const VIEW_CENTER: Vec2 = Vec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0);

    /// Enemy spawns this far to the right of the player
    pub const ENEMY_SPAWN_OFFSET: Vec2 = Vec2::new(100.0, 0.0);

    /// Default sprite footprints (used when the host does not supply masks)
    pub const TANK_WIDTH: u32 = 48;
    pub const TANK_HEIGHT: u32 = 32;
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const POWERUP_RADIUS: f32 = 12.0;
    pub const OBJECTIVE_RADIUS: f32 = 40.0;

    /// Bullets leave the muzzle this far ahead of the tank center
    pub const MUZZLE_OFFSET: f32 = 30.0;

    /// Countdown starts here and ticks down once per second
    pub const COUNTDOWN_START: u32 = 6;

    /// Distance at which the player counts as having reached the objective
    pub const OBJECTIVE_REACHED_DISTANCE: f32 = 300.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit heading for a rotation (0 faces +X, positive turns clockwise on screen)
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    Vec2::new(rotation.cos(), rotation.sin())
}

/// Signed angle from `from` to `to`, in [-π, π)
#[inline]
pub fn angle_between(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}
