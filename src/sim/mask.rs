//! Per-pixel collision masks
//!
//! A mask is the set of opaque pixels of a sprite. A [`Sprite`] places a mask
//! in screen space (position, rotation about the mask origin). Two sprites
//! collide when some opaque pixel of one lands on an opaque pixel of the other.

use glam::{Affine2, Vec2};

use crate::error::{Error, Result};

/// Opaque-pixel bitmap with a rotation origin
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    solid: Vec<bool>,
    /// Pivot in mask pixels (sprites are drawn centered on this)
    origin: Vec2,
}

impl CollisionMask {
    /// Fully opaque rectangle, centered
    pub fn rect(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            solid: vec![true; (width * height) as usize],
            origin: Vec2::new(width as f32, height as f32) / 2.0,
        }
    }

    /// Filled circle, centered
    pub fn disc(radius: f32) -> Self {
        let size = (radius * 2.0).ceil().max(1.0) as u32;
        let center = Vec2::splat(size as f32 / 2.0);
        let mut solid = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                solid.push(p.distance(center) <= radius);
            }
        }
        Self {
            width: size,
            height: size,
            solid,
            origin: center,
        }
    }

    /// Build from a sprite's alpha channel; pixels above `threshold` are solid
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8], threshold: u8) -> Result<Self> {
        if alpha.len() != (width as usize) * (height as usize) {
            return Err(Error::BufferSize {
                width,
                height,
                actual: alpha.len(),
            });
        }
        Ok(Self {
            width,
            height,
            solid: alpha.iter().map(|&a| a > threshold).collect(),
            origin: Vec2::new(width as f32, height as f32) / 2.0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Is the pixel at (x, y) opaque? Out-of-bounds is transparent.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.solid[(y as u32 * self.width + x as u32) as usize]
    }

    /// Centers of all opaque pixels, in mask space
    pub fn solid_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        let w = self.width;
        self.solid
            .iter()
            .enumerate()
            .filter(|(_, s)| **s)
            .map(move |(i, _)| {
                let i = i as u32;
                Vec2::new((i % w) as f32 + 0.5, (i / w) as f32 + 0.5)
            })
    }
}

/// A mask placed in screen space
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    pub mask: &'a CollisionMask,
    /// Mask space -> screen space
    pub transform: Affine2,
}

impl<'a> Sprite<'a> {
    pub fn new(mask: &'a CollisionMask, position: Vec2, rotation: f32) -> Self {
        let transform = Affine2::from_angle_translation(rotation, position)
            * Affine2::from_translation(-mask.origin);
        Self { mask, transform }
    }

    /// Screen-space opaque pixel centers
    pub fn world_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.mask
            .solid_points()
            .map(move |p| self.transform.transform_point2(p))
    }

    /// Axis-aligned bounds of the transformed mask rectangle
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let w = self.mask.width as f32;
        let h = self.mask.height as f32;
        let corners = [
            Vec2::ZERO,
            Vec2::new(w, 0.0),
            Vec2::new(0.0, h),
            Vec2::new(w, h),
        ]
        .map(|c| self.transform.transform_point2(c));

        let min = corners.iter().copied().fold(Vec2::splat(f32::MAX), Vec2::min);
        let max = corners.iter().copied().fold(Vec2::splat(f32::MIN), Vec2::max);
        (min, max)
    }

    /// Pixel-accurate overlap test
    pub fn intersects(&self, other: &Sprite<'_>) -> bool {
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        if a_max.x < b_min.x || b_max.x < a_min.x || a_max.y < b_min.y || b_max.y < a_min.y {
            return false;
        }

        // Walk our opaque pixels in the other mask's space
        let to_other = other.transform.inverse() * self.transform;
        self.mask.solid_points().any(|p| {
            let q = to_other.transform_point2(p);
            other.mask.is_solid(q.x.floor() as i32, q.y.floor() as i32)
        })
    }
}
