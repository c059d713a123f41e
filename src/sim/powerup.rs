//! Powerup pickups

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    Speed,
    Shield,
    Rapid,
    Damage,
    /// Rare; grants every effect at once
    Rainbow,
}

impl PowerupKind {
    /// The common kinds, rolled uniformly
    pub const COMMON: [PowerupKind; 4] = [
        PowerupKind::Speed,
        PowerupKind::Shield,
        PowerupKind::Rapid,
        PowerupKind::Damage,
    ];

    /// Roll a kind: rainbow with odds 1 in `rainbow_odds`, otherwise uniform
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, rainbow_odds: u32) -> Self {
        if rng.random_range(0..rainbow_odds.max(1)) == 0 {
            PowerupKind::Rainbow
        } else {
            Self::COMMON[rng.random_range(0..Self::COMMON.len())]
        }
    }

    /// Does holding `self` give the effect of `effect`?
    pub fn grants(self, effect: PowerupKind) -> bool {
        self == effect || self == PowerupKind::Rainbow
    }
}

/// A pickup lying on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub position: Vec2,
}
