//! Projectiles and the handler that owns them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tank::Team;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Who fired it (attribution only)
    pub owner: Team,
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    pub damage: f32,
    pub traveled: f32,
    pub active: bool,
}

impl Bullet {
    pub fn new(owner: Team, position: Vec2, velocity: Vec2, damage: f32) -> Self {
        Self {
            owner,
            position,
            velocity,
            damage,
            traveled: 0.0,
            active: true,
        }
    }

    /// Facing used for the sprite
    pub fn rotation(&self) -> f32 {
        self.velocity.y.atan2(self.velocity.x)
    }
}

/// Owns every bullet in flight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulletHandler {
    bullets: Vec<Bullet>,
}

impl BulletHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    /// Advance all bullets one frame; bullets past `range` fizzle out
    pub fn update(&mut self, range: f32) {
        for bullet in &mut self.bullets {
            bullet.position += bullet.velocity;
            bullet.traveled += bullet.velocity.length();
            if bullet.traveled >= range {
                bullet.active = false;
            }
        }
        self.sweep();
    }

    /// Scroll with the board
    pub fn shift(&mut self, delta: Vec2) {
        for bullet in &mut self.bullets {
            bullet.position += delta;
        }
    }

    /// Mark a bullet spent; it is dropped at the next [`sweep`](Self::sweep)
    pub fn destroy(&mut self, index: usize) {
        if let Some(bullet) = self.bullets.get_mut(index) {
            bullet.active = false;
        }
    }

    /// Drop spent bullets
    pub fn sweep(&mut self) {
        self.bullets.retain(|b| b.active);
    }

    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.bullets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}
