//! Rising obstacles and their spawner

use rand::Rng;
use rand::seq::IndexedRandom;

use super::entity::{ImageId, Rect, Sprite, UpdateContext};
use super::level::Level;
use super::state::Tunables;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    pub rect: Rect,
    pub image: ImageId,
}

impl Obstacle {
    pub fn new(x: i32, y: i32, image: ImageId) -> Self {
        Self {
            rect: Rect::new(x, y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            image,
        }
    }

    /// Move up by `speed` pixels
    pub fn advance(&mut self, speed: i32) {
        self.rect.y -= speed;
    }

    /// Fully scrolled past the top edge
    pub fn is_offscreen(&self) -> bool {
        self.rect.bottom() < 0
    }
}

impl Sprite for Obstacle {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn image(&self) -> ImageId {
        self.image
    }

    fn update(&mut self, ctx: &UpdateContext) {
        self.advance(ctx.scroll_speed);
    }
}

/// Advance the spawn timer and, when it reaches the delay, create a random batch
/// of obstacles below the bottom edge. Returns how many were spawned.
pub fn spawn_obstacles(
    obstacles: &mut Vec<Obstacle>,
    spawn_timer: &mut u32,
    tunables: &Tunables,
    level: &Level,
    rng: &mut impl Rng,
) -> usize {
    *spawn_timer += 1;
    if *spawn_timer < tunables.spawn_delay {
        return 0;
    }
    *spawn_timer = 0;

    let max = tunables.max_spawn;
    let min = tunables.min_spawn.min(max);
    let count = rng.random_range(min..=max) as usize;

    for _ in 0..count {
        let Some(&image) = level.obstacles.choose(rng) else {
            break;
        };
        let x = rng.random_range(0..=SCREEN_WIDTH - OBSTACLE_WIDTH);
        let y = rng.random_range(SCREEN_HEIGHT..=SCREEN_HEIGHT + tunables.spawn_spread.max(0));
        obstacles.push(Obstacle::new(x, y, image));
    }

    if count > 0 {
        log::debug!("Spawned {} obstacle(s)", count);
    }
    count
}

/// Move every obstacle up and drop the ones that left the screen
pub fn update_obstacles(obstacles: &mut Vec<Obstacle>, ctx: &UpdateContext) {
    for obstacle in obstacles.iter_mut() {
        obstacle.update(ctx);
    }
    obstacles.retain(|o| !o.is_offscreen());
}
