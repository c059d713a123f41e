//! Axis-decomposition collision response
//!
//! When a frame's step pushes an entity into something, the step is split
//! into its X and Y parts and each is retried on its own, so a tank that
//! grazes a wall keeps sliding along it instead of stopping dead.
//!
//! The routine does not know what is being moved or what it collides with:
//! that is the job of an [`AxisProbe`]. The player's probe scrolls the whole
//! board (the camera follows the player), the enemy's probe moves the enemy.

use glam::Vec2;

/// Something that can be nudged and asked whether it overlaps its obstacle
pub trait AxisProbe {
    /// Move the probed entity by `delta` (in the entity's own frame of motion)
    fn shift(&mut self, delta: Vec2);
    /// Is the entity currently overlapping?
    fn overlaps(&self) -> bool;
}

/// Which parts of a step survived resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// X was blocked, the Y part was kept
    SlideY,
    /// Y was blocked (or only the combined step collided), the X part was kept
    SlideX,
    /// Both parts were blocked
    Stopped,
}

impl Resolution {
    /// The part of `step` that remains applied
    pub fn kept(self, step: Vec2) -> Vec2 {
        match self {
            Resolution::SlideY => Vec2::new(0.0, step.y),
            Resolution::SlideX => Vec2::new(step.x, 0.0),
            Resolution::Stopped => Vec2::ZERO,
        }
    }
}

/// Resolve an overlap caused by `step`, which has already been applied.
///
/// Returns `None` (and touches nothing) when there is no overlap, so running
/// it again on a resolved configuration is a no-op.
pub fn resolve_step<P: AxisProbe>(probe: &mut P, step: Vec2) -> Option<Resolution> {
    if !probe.overlaps() {
        return None;
    }

    let dx = Vec2::new(step.x, 0.0);
    let dy = Vec2::new(0.0, step.y);

    probe.shift(-step);
    probe.shift(dx);

    let resolution = if probe.overlaps() {
        // X is at fault, alone or together with Y
        probe.shift(-dx);
        probe.shift(dy);
        if probe.overlaps() {
            probe.shift(-dy);
            Resolution::Stopped
        } else {
            Resolution::SlideY
        }
    } else {
        // X alone is fine; Y alone or only the combination collides
        probe.shift(-dx);
        probe.shift(dy);
        let y_alone = probe.overlaps();
        probe.shift(-dy);
        probe.shift(dx);
        if y_alone {
            log::trace!("collision from Y only");
        }
        Resolution::SlideX
    };

    Some(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// A box moving among axis-aligned wall boxes
    struct BoxProbe {
        pos: Vec2,
        half: Vec2,
        walls: Vec<(Vec2, Vec2)>,
    }

    impl AxisProbe for BoxProbe {
        fn shift(&mut self, delta: Vec2) {
            self.pos += delta;
        }

        fn overlaps(&self) -> bool {
            let (min, max) = (self.pos - self.half, self.pos + self.half);
            self.walls
                .iter()
                .any(|(wmin, wmax)| min.x < wmax.x && max.x > wmin.x && min.y < wmax.y && max.y > wmin.y)
        }
    }

    fn probe_at(pos: Vec2, walls: Vec<(Vec2, Vec2)>) -> BoxProbe {
        BoxProbe {
            pos,
            half: Vec2::splat(5.0),
            walls,
        }
    }

    fn apply(probe: &mut BoxProbe, step: Vec2) -> Option<Resolution> {
        probe.shift(step);
        resolve_step(probe, step)
    }

    #[test]
    fn test_no_overlap_is_untouched() {
        let mut p = probe_at(Vec2::ZERO, vec![]);
        assert_eq!(apply(&mut p, Vec2::new(3.0, 4.0)), None);
        assert_eq!(p.pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_slide_along_vertical_wall() {
        // Wall to the right; moving diagonally into it keeps the Y motion
        let wall = (Vec2::new(10.0, -100.0), Vec2::new(20.0, 100.0));
        let mut p = probe_at(Vec2::new(3.0, 0.0), vec![wall]);
        let step = Vec2::new(4.0, 3.0);
        assert_eq!(apply(&mut p, step), Some(Resolution::SlideY));
        assert_eq!(p.pos, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_slide_along_floor() {
        // Floor below; moving diagonally into it keeps the X motion
        let floor = (Vec2::new(-100.0, 10.0), Vec2::new(100.0, 20.0));
        let mut p = probe_at(Vec2::new(0.0, 3.0), vec![floor]);
        let step = Vec2::new(2.0, 4.0);
        assert_eq!(apply(&mut p, step), Some(Resolution::SlideX));
        assert_eq!(p.pos, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_corner_stops() {
        let wall = (Vec2::new(10.0, -100.0), Vec2::new(20.0, 100.0));
        let floor = (Vec2::new(-100.0, 10.0), Vec2::new(100.0, 20.0));
        let mut p = probe_at(Vec2::new(3.0, 3.0), vec![wall, floor]);
        let step = Vec2::new(4.0, 4.0);
        assert_eq!(apply(&mut p, step), Some(Resolution::Stopped));
        assert_eq!(p.pos, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_combination_only_keeps_x() {
        // A block touched only by the diagonal step
        let block = (Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        let mut p = probe_at(Vec2::new(3.0, 3.0), vec![block]);
        let step = Vec2::new(4.0, 4.0);
        assert_eq!(apply(&mut p, step), Some(Resolution::SlideX));
        assert_eq!(p.pos, Vec2::new(7.0, 3.0));
    }

    #[test]
    fn test_kept_parts() {
        let step = Vec2::new(2.0, -3.0);
        assert_eq!(Resolution::SlideX.kept(step), Vec2::new(2.0, 0.0));
        assert_eq!(Resolution::SlideY.kept(step), Vec2::new(0.0, -3.0));
        assert_eq!(Resolution::Stopped.kept(step), Vec2::ZERO);
    }

    proptest! {
        /// Resolving twice never corrects anything the second time
        #[test]
        fn prop_resolution_is_idempotent(
            sx in -8i32..8, sy in -8i32..8,
            ox in -12i32..24, oy in -12i32..24,
        ) {
            let wall = (Vec2::ZERO, Vec2::splat(12.0));
            // Start somewhere clear, close enough for the step to reach the wall
            let start = Vec2::new(ox as f32, oy as f32);
            let mut p = probe_at(start, vec![wall]);
            prop_assume!(!p.overlaps());

            let step = Vec2::new(sx as f32, sy as f32);
            apply(&mut p, step);
            let settled = p.pos;

            prop_assert!(!p.overlaps());
            prop_assert_eq!(resolve_step(&mut p, step), None);
            prop_assert_eq!(p.pos, settled);
        }
    }
}
