//! Screen selection logic
//!
//! Menus are small state machines over enum tables. They take edge-triggered
//! input (a key that went down this frame) and return events for the host to
//! play cues or switch screens.

pub mod hud;
pub mod menu;
pub mod sound_options;

pub use hud::{Banner, Hud, Tint, countdown_tint};
pub use menu::{MainMenu, MainMenuItem};
pub use sound_options::{SoundItem, SoundOptions};

/// Keys pressed this frame (not held)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
}

/// What a menu asks of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent<T> {
    /// Play the select cue
    Select,
    /// The item was activated
    Confirm(T),
}

/// Move a wrapping selection; down wins when both are pressed
pub(crate) fn cycle(index: usize, len: usize, input: &MenuInput) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if input.down {
        Some((index + 1) % len)
    } else if input.up {
        Some((index + len - 1) % len)
    } else {
        None
    }
}
