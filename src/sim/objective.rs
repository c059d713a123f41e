//! The finish objective both tanks race to destroy
//!
//! Each side wears down its own health pool: player bullets drain
//! `player_health`, enemy bullets drain `enemy_health`. Whoever empties their
//! pool first wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tank::Team;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishObjective {
    pub position: Vec2,
    pub player_health: f32,
    pub enemy_health: f32,
    pub max_health: f32,
}

impl FinishObjective {
    pub fn new(position: Vec2, max_health: f32) -> Self {
        Self {
            position,
            player_health: max_health,
            enemy_health: max_health,
            max_health,
        }
    }

    /// Apply a hit from `team`; returns that side's remaining health
    pub fn hit(&mut self, team: Team, amount: f32) -> f32 {
        let pool = match team {
            Team::Player => &mut self.player_health,
            Team::Enemy => &mut self.enemy_health,
        };
        *pool -= amount;
        *pool
    }

    pub fn health(&self, team: Team) -> f32 {
        match team {
            Team::Player => self.player_health,
            Team::Enemy => self.enemy_health,
        }
    }

    /// Health bar fill for a side (0..1)
    pub fn fraction(&self, team: Team) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health(team) / self.max_health).clamp(0.0, 1.0)
    }

    /// Side that has emptied its pool, player first
    pub fn winner(&self) -> Option<Team> {
        if self.player_health <= 0.0 {
            Some(Team::Player)
        } else if self.enemy_health <= 0.0 {
            Some(Team::Enemy)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_are_independent() {
        let mut obj = FinishObjective::new(Vec2::ZERO, 5.0);
        assert_eq!(obj.hit(Team::Player, 2.0), 3.0);
        assert_eq!(obj.enemy_health, 5.0);
        assert_eq!(obj.fraction(Team::Player), 0.6);
        assert_eq!(obj.winner(), None);
    }

    #[test]
    fn test_player_checked_first() {
        let mut obj = FinishObjective::new(Vec2::ZERO, 1.0);
        obj.hit(Team::Enemy, 2.0);
        obj.hit(Team::Player, 2.0);
        assert_eq!(obj.winner(), Some(Team::Player));
        assert_eq!(obj.fraction(Team::Enemy), 0.0);
    }
}
