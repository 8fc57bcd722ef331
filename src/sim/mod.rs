//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, time supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - Drawing only through the `Canvas` trait

pub mod collision;
pub mod entity;
pub mod level;
pub mod mask;
pub mod obstacle;
pub mod player;
pub mod progression;
pub mod state;
pub mod tick;

pub use collision::{first_collision, resolve_collisions};
pub use entity::{Facing, ImageId, Rect, Sprite, UpdateContext};
pub use level::{LEVEL_1, LEVEL_2, LEVEL_3, Level, LevelId};
pub use mask::{Mask, SpriteSheet};
pub use obstacle::{Obstacle, spawn_obstacles};
pub use player::Player;
pub use progression::{MILESTONES, Milestone, MilestoneEffect};
pub use state::{GameEvent, GameSession, Tunables};
pub use tick::{TickInput, tick};
