//! Fixed-rate simulation tick
//!
//! One call per rendered frame while the game is being played. Paused frames,
//! menus and level banners simply do not call `tick`, so they never score.

use super::collision::resolve_collisions;
use super::entity::{Sprite, UpdateContext};
use super::mask::SpriteSheet;
use super::obstacle::{spawn_obstacles, update_obstacles};
use super::progression::apply_milestones;
use super::state::{GameEvent, GameSession};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left_held: bool,
    pub right_held: bool,
    /// Platform clock (milliseconds since start)
    pub now_ms: u64,
}

/// Advance the session by one frame, returning what happened
pub fn tick(session: &mut GameSession, input: &TickInput, sheet: &SpriteSheet) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let ctx = UpdateContext {
        left_held: input.left_held,
        right_held: input.right_held,
        player_speed: session.player_speed(),
        scroll_speed: session.tunables.scroll_speed,
        now_ms: input.now_ms,
    };

    session.player.update(&ctx);

    if !session.player.is_alive() {
        log::info!("Game over with score {}", session.score);
        events.push(GameEvent::GameOver {
            score: session.score,
        });
        return events;
    }

    apply_milestones(session, &mut events);

    // Milestones may have changed the scroll speed
    let ctx = UpdateContext {
        scroll_speed: session.tunables.scroll_speed,
        ..ctx
    };

    if !session.in_cooldown() {
        let level = session.level();
        spawn_obstacles(
            &mut session.obstacles,
            &mut session.spawn_timer,
            &session.tunables,
            level,
            &mut session.rng,
        );
    }

    update_obstacles(&mut session.obstacles, &ctx);

    resolve_collisions(session, sheet, input.now_ms, &mut events);

    if let Some(started) = session.cooldown_started_ms {
        if input.now_ms.saturating_sub(started) > COLLISION_COOLDOWN_MS {
            session.cooldown_started_ms = None;
        }
    }

    session.scroll_y -= ctx.scroll_speed;
    if session.scroll_y <= -SCREEN_HEIGHT {
        session.scroll_y = 0;
    }

    session.score += 1;

    events
}

/// Milliseconds elapsed after `frames` frames at the target rate
pub fn frames_to_ms(frames: u64) -> u64 {
    frames * 1000 / FPS as u64
}
