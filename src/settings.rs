//! Game settings and preferences
//!
//! Persisted separately from anything else, in a small JSON file. The settings
//! object is owned by the host and passed to whatever needs it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence;

/// Volume changes move in steps of this size
pub const VOLUME_STEP: f32 = 0.1;

/// Which volume channel an adjustment applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Music,
    Effects,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Progress ===
    /// Levels unlocked by winning career matches with standard parts
    #[serde(default)]
    pub levels_unlocked: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            sfx_volume: 0.5,
            levels_unlocked: 0,
        }
    }
}

/// Snap to one decimal place and the valid range
fn tidy_volume(v: f32) -> f32 {
    ((v * 10.0).round() / 10.0).clamp(0.0, 1.0)
}

impl Settings {
    pub fn volume(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Music => self.music_volume,
            Channel::Effects => self.sfx_volume,
        }
    }

    fn volume_mut(&mut self, channel: Channel) -> &mut f32 {
        match channel {
            Channel::Music => &mut self.music_volume,
            Channel::Effects => &mut self.sfx_volume,
        }
    }

    /// Raise a channel by one step. Returns false when already at full volume.
    pub fn raise_volume(&mut self, channel: Channel) -> bool {
        let v = self.volume_mut(channel);
        if *v >= 1.0 {
            return false;
        }
        *v = tidy_volume(*v + VOLUME_STEP);
        true
    }

    /// Lower a channel by one step. Returns false when already muted.
    pub fn lower_volume(&mut self, channel: Channel) -> bool {
        let v = self.volume_mut(channel);
        if *v <= 0.0 {
            return false;
        }
        *v = tidy_volume(*v - VOLUME_STEP);
        true
    }

    /// Record a newly unlocked level
    pub fn record_unlock(&mut self) {
        self.levels_unlocked += 1;
        log::info!("Unlocked content ({} total)", self.levels_unlocked);
    }

    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        match persistence::load_optional::<Settings>(path) {
            Ok(Some(mut settings)) => {
                settings.music_volume = tidy_volume(settings.music_volume);
                settings.sfx_volume = tidy_volume(settings.sfx_volume);
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        persistence::save(path, self)
    }
}
