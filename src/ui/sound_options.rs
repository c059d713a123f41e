//! Sound options screen
//!
//! Left raises the selected volume and right lowers it. Volumes live in the
//! caller's [`Settings`], which the host saves when leaving the screen.

use serde::{Deserialize, Serialize};

use super::{MenuInput, UiEvent, cycle};
use crate::settings::{Channel, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundItem {
    Music,
    Effects,
    Back,
}

impl SoundItem {
    pub const ALL: [SoundItem; 3] = [SoundItem::Music, SoundItem::Effects, SoundItem::Back];

    /// Volume channel behind a slider
    pub fn channel(self) -> Option<Channel> {
        match self {
            SoundItem::Music => Some(Channel::Music),
            SoundItem::Effects => Some(Channel::Effects),
            SoundItem::Back => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SoundOptions {
    selected: usize,
}

impl SoundOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> SoundItem {
        SoundItem::ALL[self.selected]
    }

    pub fn update(&mut self, input: &MenuInput, settings: &mut Settings) -> Vec<UiEvent<SoundItem>> {
        let mut events = Vec::new();
        if let Some(next) = cycle(self.selected, SoundItem::ALL.len(), input) {
            self.selected = next;
            events.push(UiEvent::Select);
        }

        if let Some(channel) = self.selected().channel() {
            let changed = if input.left {
                settings.raise_volume(channel)
            } else if input.right {
                settings.lower_volume(channel)
            } else {
                false
            };
            if changed {
                log::debug!("{channel:?} volume now {:.1}", settings.volume(channel));
                events.push(UiEvent::Select);
            }
        }

        if input.confirm && self.selected() == SoundItem::Back {
            events.push(UiEvent::Confirm(SoundItem::Back));
        }
        events
    }
}
