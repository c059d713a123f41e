//! Data-driven game balance
//!
//! Every number a designer might want to tweak without touching the
//! simulation code. Values are in per-frame units for motion and seconds for
//! timers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::{self, Envelope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Tanks ===
    /// Speed gained per frame while driving forward
    pub acceleration: f32,
    /// Speed kept per frame when coasting
    pub friction: f32,
    /// Reverse top speed as a fraction of forward top speed
    pub reverse_fraction: f32,
    /// Seconds a collected powerup lasts
    pub powerup_duration: f32,

    // === Powerup effects ===
    pub speed_boost: f32,
    pub rapid_cooldown_factor: f32,
    pub damage_factor: f32,

    // === Bullets ===
    /// Pixels per frame
    pub bullet_speed: f32,
    /// Distance before a bullet fizzles out
    pub bullet_range: f32,

    // === Objective ===
    /// Health each side's pool starts with
    pub objective_health: f32,
    /// Extra damage enemy bullets deal to the objective (balance bonus for the AI)
    pub enemy_objective_bonus: f32,

    // === AI ===
    /// Per-frame decay of the AI's rotation speed when no steering override is active
    pub ai_turn_decay: f32,
    /// Rotation speeds inside this band snap to zero
    pub ai_turn_deadband: f32,
    /// Feeler length for terrain avoidance
    pub ai_lookahead: f32,
    /// Angle between the straight-ahead feeler and the side feelers
    pub ai_feeler_spread: f32,
    /// The AI swerves when the player is closer than this and in front
    pub ai_avoid_radius: f32,
    /// The AI only shoots at targets within this distance
    pub ai_fire_range: f32,
    /// Within this distance of the objective the AI always goes for it
    pub ai_finish_range: f32,

    /// Powerup spawn: one in this many rolls is a rainbow
    pub rainbow_odds: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            acceleration: 0.1,
            friction: 0.95,
            reverse_fraction: 0.5,
            powerup_duration: 10.0,

            speed_boost: 1.5,
            rapid_cooldown_factor: 0.5,
            damage_factor: 2.0,

            bullet_speed: 9.0,
            bullet_range: 700.0,

            objective_health: 20.0,
            enemy_objective_bonus: 0.8,

            ai_turn_decay: 0.03,
            ai_turn_deadband: 0.05,
            ai_lookahead: 90.0,
            ai_feeler_spread: 0.5,
            ai_avoid_radius: 120.0,
            ai_fire_range: 450.0,
            ai_finish_range: 400.0,

            rainbow_odds: 300,
        }
    }
}

/// A tuning file is either one written by [`Tuning::save`] or a hand-edited
/// bare object holding only the fields to override
#[derive(Deserialize)]
#[serde(untagged)]
enum TuningFile {
    Saved(Envelope<Tuning>),
    Bare(Tuning),
}

impl Tuning {
    /// Load tuning overrides from `path`; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let tuning = match persistence::read_json::<TuningFile>(path)? {
            TuningFile::Saved(envelope) => envelope.into_payload()?,
            TuningFile::Bare(tuning) => tuning,
        };
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        persistence::save(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_tuning_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"enemy_objective_bonus": 0.0}"#).unwrap();
        assert_eq!(tuning.enemy_objective_bonus, 0.0);
        assert_eq!(tuning.objective_health, Tuning::default().objective_health);
    }

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("panzer-dash-tuning-{}-{}", std::process::id(), name))
            .join("tuning.json")
    }

    #[test]
    fn test_load_bare_partial_file() {
        let path = scratch("bare");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"bullet_speed": 12.0}"#).unwrap();
        let tuning = Tuning::load(&path).unwrap();
        assert_eq!(tuning.bullet_speed, 12.0);
        assert_eq!(tuning.rainbow_odds, Tuning::default().rainbow_odds);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_saved_file() {
        let path = scratch("saved");
        let tuning = Tuning {
            enemy_objective_bonus: 0.3,
            ..Tuning::default()
        };
        tuning.save(&path).unwrap();
        assert_eq!(Tuning::load(&path).unwrap(), tuning);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
