//! HUD data the host draws each frame

use crate::consts::COUNTDOWN_START;
use crate::sim::{GamePhase, GameState, Outcome, Team};

/// Named text colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    White,
    Red,
    OrangeRed,
    Yellow,
    Lime,
}

impl Tint {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Tint::White => [255, 255, 255],
            Tint::Red => [255, 0, 0],
            Tint::OrangeRed => [255, 69, 0],
            Tint::Yellow => [255, 255, 0],
            Tint::Lime => [0, 255, 0],
        }
    }
}

/// (shown while countdown is above this, tint)
const COUNTDOWN_TINTS: [(u32, Tint); 3] = [(3, Tint::Red), (1, Tint::OrangeRed), (0, Tint::Yellow)];

/// Tint for a countdown number, or `None` when no number is shown
pub fn countdown_tint(countdown: u32) -> Option<Tint> {
    if countdown == 0 || countdown >= COUNTDOWN_START {
        return None;
    }
    COUNTDOWN_TINTS
        .iter()
        .find(|(above, _)| countdown > *above)
        .map(|&(_, tint)| tint)
}

pub const CONTINUE_PROMPT: &str = "> Press Enter to Continue <";

/// End-of-match text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub text: &'static str,
    pub tint: Tint,
    pub prompt: &'static str,
}

impl Banner {
    pub fn for_outcome(outcome: Outcome) -> Self {
        let (text, tint) = match outcome {
            Outcome::Won => ("Congratulations!\nYou won!", Tint::Lime),
            Outcome::Lost => ("You lost!\nToo bad", Tint::Red),
        };
        Self {
            text,
            tint,
            prompt: CONTINUE_PROMPT,
        }
    }
}

/// Everything on the HUD for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    /// Countdown number and its tint, while one is shown
    pub countdown: Option<(u32, Tint)>,
    /// Gun reload bar (1 = just fired)
    pub cooldown: f32,
    /// Powerup time bar
    pub powerup: f32,
    pub player_objective: f32,
    pub enemy_objective: f32,
    pub banner: Option<Banner>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let countdown = match state.phase {
            GamePhase::Countdown => countdown_tint(state.countdown).map(|tint| (state.countdown, tint)),
            _ => None,
        };
        Self {
            countdown,
            cooldown: state.player.cooldown_fraction(&state.tuning),
            powerup: state.player.powerup_fraction(),
            player_objective: state.objective.fraction(Team::Player),
            enemy_objective: state.objective.fraction(Team::Enemy),
            banner: state.outcome.map(Banner::for_outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::test_support::open_state;

    #[test]
    fn test_countdown_tints() {
        assert_eq!(countdown_tint(6), None);
        assert_eq!(countdown_tint(5), Some(Tint::Red));
        assert_eq!(countdown_tint(4), Some(Tint::Red));
        assert_eq!(countdown_tint(3), Some(Tint::OrangeRed));
        assert_eq!(countdown_tint(2), Some(Tint::OrangeRed));
        assert_eq!(countdown_tint(1), Some(Tint::Yellow));
        assert_eq!(countdown_tint(0), None);
    }

    #[test]
    fn test_banner_text() {
        let won = Banner::for_outcome(Outcome::Won);
        assert_eq!(won.text, "Congratulations!\nYou won!");
        assert_eq!(won.tint, Tint::Lime);
        assert_eq!(Banner::for_outcome(Outcome::Lost).tint.rgb(), [255, 0, 0]);
        assert_eq!(won.prompt, CONTINUE_PROMPT);
    }

    #[test]
    fn test_hud_from_state() {
        let mut state = open_state();
        state.countdown = 2;
        let hud = Hud::from_state(&state);
        assert_eq!(hud.countdown, Some((2, Tint::OrangeRed)));
        assert_eq!(hud.player_objective, 1.0);
        assert!(hud.banner.is_none());

        state.outcome = Some(Outcome::Lost);
        state.phase = GamePhase::GameOver;
        let hud = Hud::from_state(&state);
        assert_eq!(hud.countdown, None);
        assert_eq!(hud.banner.map(|b| b.tint), Some(Tint::Red));
    }
}
