//! Scrolling level background with color-keyed obstacles
//!
//! The terrain image is stored in pixels; its `position` is the image center
//! in screen space and moves as the board scrolls under the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::Sprite;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRASS: Rgb = Rgb(70, 140, 60);
}

/// Colors that block tanks and bullets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette(Vec<Rgb>);

/// Building and rubble colors of the city level
const CITY_BLOCKERS: [Rgb; 10] = [
    Rgb(0, 0, 0),
    Rgb(87, 87, 87),
    Rgb(162, 162, 162),
    Rgb(138, 138, 138),
    Rgb(75, 69, 66),
    Rgb(59, 69, 77),
    Rgb(58, 37, 28),
    Rgb(111, 66, 54),
    Rgb(116, 31, 9),
    Rgb(154, 123, 93),
];

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self(colors)
    }

    /// Only pure black blocks
    pub fn walls() -> Self {
        Self(vec![Rgb::BLACK])
    }

    pub fn city() -> Self {
        Self(CITY_BLOCKERS.to_vec())
    }

    #[inline]
    pub fn contains(&self, color: Rgb) -> bool {
        self.0.contains(&color)
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct Terrain {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    /// Image center in screen space
    pub position: Vec2,
}

impl Terrain {
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(Error::BufferSize {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            position: Vec2::ZERO,
        })
    }

    /// Single-color image
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
            position: Vec2::ZERO,
        }
    }

    /// Grass field ringed by a black wall of the given thickness
    pub fn walled(width: u32, height: u32, thickness: u32) -> Self {
        let mut terrain = Self::filled(width, height, Rgb::GRASS);
        terrain.fill_rect(0, 0, width, thickness, Rgb::BLACK);
        terrain.fill_rect(0, height.saturating_sub(thickness), width, thickness, Rgb::BLACK);
        terrain.fill_rect(0, 0, thickness, height, Rgb::BLACK);
        terrain.fill_rect(width.saturating_sub(thickness), 0, thickness, height, Rgb::BLACK);
        terrain
    }

    /// Paint an image-space rectangle (clipped to the image)
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y..y_end {
            let row = (py * self.width) as usize;
            for px in x..x_end {
                self.pixels[row + px as usize] = color;
            }
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Screen point -> image pixel coordinates
    #[inline]
    pub fn to_image(&self, screen: Vec2) -> Vec2 {
        screen - self.position + Vec2::new(self.width as f32, self.height as f32) / 2.0
    }

    /// Image pixel coordinates -> screen point
    #[inline]
    pub fn to_screen(&self, image: Vec2) -> Vec2 {
        image - Vec2::new(self.width as f32, self.height as f32) / 2.0 + self.position
    }

    /// Color under a screen point; `None` off the image
    pub fn sample(&self, screen: Vec2) -> Option<Rgb> {
        let p = self.to_image(screen).floor();
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.width as f32 || p.y >= self.height as f32 {
            return None;
        }
        Some(self.pixels[(p.y as u32 * self.width + p.x as u32) as usize])
    }

    /// Does the screen point sit on a blocking color?
    #[inline]
    pub fn blocks(&self, screen: Vec2, palette: &Palette) -> bool {
        self.sample(screen).is_some_and(|c| palette.contains(c))
    }

    /// Does any opaque pixel of the sprite sit on a blocking color?
    pub fn hits(&self, sprite: &Sprite<'_>, palette: &Palette) -> bool {
        sprite.world_points().any(|p| self.blocks(p, palette))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mask::CollisionMask;
    use proptest::prelude::*;

    #[test]
    fn test_sample_respects_position() {
        let mut t = Terrain::filled(10, 10, Rgb::GRASS);
        t.fill_rect(0, 0, 1, 1, Rgb::BLACK);
        t.position = Vec2::new(100.0, 100.0);
        // Image (0,0) is at screen (95,95)
        assert_eq!(t.sample(Vec2::new(95.5, 95.5)), Some(Rgb::BLACK));
        assert_eq!(t.sample(Vec2::new(96.5, 95.5)), Some(Rgb::GRASS));
        assert_eq!(t.sample(Vec2::new(94.0, 95.5)), None);
    }

    #[test]
    fn test_city_palette_blocks_buildings_not_roads() {
        let palette = Palette::city();
        assert!(palette.contains(Rgb(116, 31, 9)));
        assert!(!palette.contains(Rgb(120, 120, 120)));
        assert_eq!(palette.colors().len(), 10);
    }

    #[test]
    fn test_wall_hit() {
        let mut t = Terrain::walled(200, 200, 10);
        t.position = Vec2::new(100.0, 100.0);
        let mask = CollisionMask::rect(20, 20);
        let inside = Sprite::new(&mask, Vec2::new(100.0, 100.0), 0.0);
        let on_wall = Sprite::new(&mask, Vec2::new(15.0, 100.0), 0.0);
        assert!(!t.hits(&inside, &Palette::walls()));
        assert!(t.hits(&on_wall, &Palette::walls()));
    }

    #[test]
    fn test_fill_rect_clips_huge_extents() {
        let mut t = Terrain::filled(8, 8, Rgb::GRASS);
        t.fill_rect(6, 6, u32::MAX, u32::MAX, Rgb::BLACK);
        t.fill_rect(u32::MAX, 0, 4, 4, Rgb::BLACK);
        t.position = Vec2::new(4.0, 4.0);
        assert_eq!(t.sample(Vec2::new(7.5, 7.5)), Some(Rgb::BLACK));
        assert_eq!(t.sample(Vec2::new(5.5, 5.5)), Some(Rgb::GRASS));
        assert_eq!(t.sample(Vec2::new(0.5, 0.5)), Some(Rgb::GRASS));
    }

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(Terrain::from_pixels(4, 4, vec![Rgb::BLACK; 15]).is_err());
        assert!(Terrain::from_pixels(4, 4, vec![Rgb::BLACK; 16]).is_ok());
    }

    proptest! {
        /// Anywhere on a field with no palette colors, nothing ever collides
        #[test]
        fn prop_clear_field_never_hits(x in -50.0f32..250.0, y in -50.0f32..250.0, rot in -3.2f32..3.2, city in any::<bool>()) {
            let mut t = Terrain::filled(200, 200, Rgb(10, 200, 10));
            t.position = Vec2::new(100.0, 100.0);
            let palette = if city { Palette::city() } else { Palette::walls() };
            let mask = CollisionMask::rect(48, 32);
            let sprite = Sprite::new(&mask, Vec2::new(x, y), rot);
            prop_assert!(!t.hits(&sprite, &palette));
        }
    }
}
