//! Opponent steering and targeting, plus the autopilot used in idle mode
//!
//! The AI drives forward constantly. Each frame it may override its turn
//! rate to dodge terrain or the player; with no override the turn rate bleeds
//! back toward zero so the tank straightens out.

use glam::Vec2;

use super::bullet::Bullet;
use super::objective::FinishObjective;
use super::tank::{Controls, Tank};
use super::terrain::{Palette, Terrain};
use crate::tuning::Tuning;
use crate::{angle_between, heading};

/// Who the AI is shooting at this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTarget {
    Objective,
    Player,
}

/// Turn away from blocking terrain ahead. Returns true when steering.
pub fn steer_from_terrain(ai: &mut Tank, terrain: &Terrain, palette: &Palette, tuning: &Tuning) -> bool {
    let feeler = |angle: f32| ai.position + heading(ai.rotation + angle) * tuning.ai_lookahead;

    let ahead = terrain.blocks(feeler(0.0), palette);
    let left = terrain.blocks(feeler(-tuning.ai_feeler_spread), palette);
    let right = terrain.blocks(feeler(tuning.ai_feeler_spread), palette);

    let turn = ai.turn_rate();
    ai.rot_speed = match (left, ahead, right) {
        (false, false, false) => return false,
        // Clear on the right: go right
        (true, _, false) => turn,
        (false, _, true) => -turn,
        // Wall dead ahead with both sides open, or boxed in: keep turning the way we were
        _ => {
            if ai.rot_speed < 0.0 {
                -turn
            } else {
                turn
            }
        }
    };
    log::trace!("AI steering off terrain (l={left} a={ahead} r={right})");
    true
}

/// Swerve around another tank that is close and in front. Returns true when steering.
pub fn steer_from_tank(ai: &mut Tank, other: &Tank, tuning: &Tuning) -> bool {
    let to_other = other.position - ai.position;
    if to_other.length() > tuning.ai_avoid_radius {
        return false;
    }
    let facing = heading(ai.rotation);
    if facing.dot(to_other) <= 0.0 {
        return false;
    }
    // Turn away from the side the other tank is on
    let side = facing.perp_dot(to_other);
    ai.rot_speed = if side >= 0.0 { -ai.turn_rate() } else { ai.turn_rate() };
    true
}

/// Bleed the turn rate toward zero, snapping inside the dead band
pub fn straighten(ai: &mut Tank, tuning: &Tuning) {
    if ai.rot_speed < -tuning.ai_turn_deadband {
        ai.rot_speed += tuning.ai_turn_decay;
    } else if ai.rot_speed > tuning.ai_turn_deadband {
        ai.rot_speed -= tuning.ai_turn_decay;
    } else {
        ai.rot_speed = 0.0;
    }
}

/// Go for the objective when close to it or nearer to it than the player
pub fn choose_target(ai: &Tank, player: &Tank, objective: &FinishObjective, tuning: &Tuning) -> AiTarget {
    let ai_dist = ai.position.distance(objective.position);
    let player_dist = player.position.distance(objective.position);
    if ai_dist <= tuning.ai_finish_range || ai_dist < player_dist {
        AiTarget::Objective
    } else {
        AiTarget::Player
    }
}

/// Fire at `target` if it is in range and the gun is ready
pub fn shoot_at(ai: &mut Tank, target: Vec2, tuning: &Tuning) -> Option<Bullet> {
    let to_target = target - ai.position;
    if to_target.length() > tuning.ai_fire_range {
        return None;
    }
    ai.try_fire(to_target, tuning)
}

/// Controls that drive the player toward the objective and shoot when lined up
pub fn autopilot(player: &Tank, objective: &FinishObjective, terrain: &Terrain, palette: &Palette) -> Controls {
    let to_goal = objective.position - player.position;
    let desired = to_goal.y.atan2(to_goal.x);
    let error = angle_between(player.rotation, desired);

    let probe = player.position + heading(player.rotation) * 60.0;
    let wall_ahead = terrain.blocks(probe, palette);

    let aligned = error.abs() < 0.15;
    Controls {
        forward: !wall_ahead && to_goal.length() > 150.0,
        reverse: false,
        left: wall_ahead || error < -0.05,
        right: !wall_ahead && error > 0.05,
        fire: aligned && to_goal.length() < 500.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tank::{TankPart, Team};
    use crate::sim::terrain::Rgb;

    fn enemy_at(pos: Vec2, rotation: f32) -> Tank {
        let mut t = Tank::new(Team::Enemy, TankPart::Basic, TankPart::Basic, pos, &Tuning::default());
        t.rotation = rotation;
        t
    }

    fn board() -> Terrain {
        let mut t = Terrain::filled(400, 400, Rgb::GRASS);
        t.position = Vec2::new(200.0, 200.0);
        t
    }

    #[test]
    fn test_open_ground_no_override() {
        let tuning = Tuning::default();
        let mut ai = enemy_at(Vec2::new(200.0, 200.0), 0.0);
        assert!(!steer_from_terrain(&mut ai, &board(), &Palette::walls(), &tuning));
    }

    #[test]
    fn test_wall_on_left_turns_right() {
        let tuning = Tuning::default();
        let mut terrain = board();
        // Facing +X; the left feeler points toward -Y
        terrain.fill_rect(200, 0, 200, 175, Rgb::BLACK);
        let mut ai = enemy_at(Vec2::new(200.0, 200.0), 0.0);
        assert!(steer_from_terrain(&mut ai, &terrain, &Palette::walls(), &tuning));
        assert!(ai.rot_speed > 0.0);
    }

    #[test]
    fn test_straighten_decays_and_snaps() {
        let tuning = Tuning::default();
        let mut ai = enemy_at(Vec2::ZERO, 0.0);
        ai.rot_speed = 0.1;
        straighten(&mut ai, &tuning);
        assert!((ai.rot_speed - 0.07).abs() < 1e-6);
        ai.rot_speed = -0.04;
        straighten(&mut ai, &tuning);
        assert_eq!(ai.rot_speed, 0.0);
    }

    #[test]
    fn test_avoids_tank_in_front_only() {
        let tuning = Tuning::default();
        let mut ai = enemy_at(Vec2::ZERO, 0.0);
        let ahead_left = enemy_at(Vec2::new(60.0, -20.0), 0.0);
        assert!(steer_from_tank(&mut ai, &ahead_left, &tuning));
        assert!(ai.rot_speed > 0.0);

        let mut ai = enemy_at(Vec2::ZERO, 0.0);
        let behind = enemy_at(Vec2::new(-60.0, 0.0), 0.0);
        assert!(!steer_from_tank(&mut ai, &behind, &tuning));
    }

    #[test]
    fn test_target_choice() {
        let tuning = Tuning::default();
        let objective = FinishObjective::new(Vec2::new(1000.0, 0.0), 10.0);
        let player = enemy_at(Vec2::new(900.0, 0.0), 0.0);
        let far_ai = enemy_at(Vec2::ZERO, 0.0);
        assert_eq!(choose_target(&far_ai, &player, &objective, &tuning), AiTarget::Player);

        let near_ai = enemy_at(Vec2::new(950.0, 0.0), 0.0);
        assert_eq!(choose_target(&near_ai, &player, &objective, &tuning), AiTarget::Objective);
    }

    #[test]
    fn test_shoot_respects_range() {
        let tuning = Tuning::default();
        let mut ai = enemy_at(Vec2::ZERO, 0.0);
        assert!(shoot_at(&mut ai, Vec2::new(tuning.ai_fire_range + 10.0, 0.0), &tuning).is_none());
        let bullet = shoot_at(&mut ai, Vec2::new(0.0, 100.0), &tuning).unwrap();
        assert!(bullet.velocity.y > 0.0);
    }

    #[test]
    fn test_autopilot_turns_toward_goal() {
        let player = enemy_at(Vec2::new(200.0, 200.0), 0.0);
        let objective = FinishObjective::new(Vec2::new(200.0, 390.0), 10.0);
        let controls = autopilot(&player, &objective, &board(), &Palette::walls());
        assert!(controls.right && controls.forward && !controls.fire);
    }
}
