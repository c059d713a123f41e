//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep, per-frame motion
//! - Seeded RNG only
//! - Stable iteration order (player before enemy, bullets and powerups by index)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod bullet;
pub mod collision;
pub mod level;
pub mod mask;
pub mod objective;
pub mod powerup;
pub mod state;
pub mod tank;
pub mod terrain;
pub mod tick;

pub use bullet::{Bullet, BulletHandler};
pub use collision::{AxisProbe, Resolution, resolve_step};
pub use level::{Level, LevelId};
pub use mask::{CollisionMask, Sprite};
pub use objective::FinishObjective;
pub use powerup::{Powerup, PowerupKind};
pub use state::{GameEvent, GamePhase, GameState, MatchSetup, Milestones, Outcome};
pub use tank::{Controls, Tank, TankPart, Team};
pub use terrain::{Palette, Rgb, Terrain};
pub use tick::{TickInput, tick};
