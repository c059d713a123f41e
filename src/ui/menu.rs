//! Main menu

use serde::{Deserialize, Serialize};

use super::{MenuInput, UiEvent, cycle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainMenuItem {
    PlayNow,
    Tutorial,
    CareerMode,
    FreeMode,
    Multiplayer,
    Options,
    Quit,
}

impl MainMenuItem {
    /// Top to bottom
    pub const ALL: [MainMenuItem; 7] = [
        MainMenuItem::PlayNow,
        MainMenuItem::Tutorial,
        MainMenuItem::CareerMode,
        MainMenuItem::FreeMode,
        MainMenuItem::Multiplayer,
        MainMenuItem::Options,
        MainMenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MainMenuItem::PlayNow => "Play Now",
            MainMenuItem::Tutorial => "Tutorial",
            MainMenuItem::CareerMode => "Career Mode",
            MainMenuItem::FreeMode => "Free Mode",
            MainMenuItem::Multiplayer => "Multiplayer",
            MainMenuItem::Options => "Options",
            MainMenuItem::Quit => "Quit",
        }
    }

    /// Button asset; the highlighted variant appends `-Selected`
    pub fn asset(self, highlighted: bool) -> String {
        let base = self.label().replace(' ', "");
        if highlighted { format!("{base}-Selected") } else { base }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MainMenu {
    selected: usize,
}

impl MainMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> MainMenuItem {
        MainMenuItem::ALL[self.selected]
    }

    pub fn update(&mut self, input: &MenuInput) -> Vec<UiEvent<MainMenuItem>> {
        let mut events = Vec::new();
        if let Some(next) = cycle(self.selected, MainMenuItem::ALL.len(), input) {
            self.selected = next;
            events.push(UiEvent::Select);
        }
        if input.confirm {
            log::info!("Main menu: {}", self.selected().label());
            events.push(UiEvent::Confirm(self.selected()));
        }
        events
    }
}
