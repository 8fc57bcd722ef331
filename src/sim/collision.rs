//! Player/obstacle collision
//!
//! Pixel-precise: bounding boxes are only a broad phase, the masks decide.

use super::entity::Sprite;
use super::mask::SpriteSheet;
use super::state::{GameEvent, GameSession};

/// Pixel-mask overlap between two sprites. Images without a registered mask
/// fall back to their bounding box.
pub fn sprites_collide(a: &dyn Sprite, b: &dyn Sprite, sheet: &SpriteSheet) -> bool {
    let ra = a.rect();
    let rb = b.rect();
    if !ra.intersects(&rb) {
        return false;
    }
    match (sheet.mask(a.image()), sheet.mask(b.image())) {
        (Some(ma), Some(mb)) => ma.overlap(mb, rb.pos() - ra.pos()).is_some(),
        _ => true,
    }
}

/// Index of the first obstacle (spawn order) touching the player
pub fn first_collision(session: &GameSession, sheet: &SpriteSheet) -> Option<usize> {
    session
        .obstacles
        .iter()
        .position(|o| sprites_collide(&session.player, o, sheet))
}

/// Resolve this frame's collisions. Any overlap clears every obstacle,
/// costs exactly one health point and starts the spawn cooldown.
/// Returns whether a hit happened.
pub fn resolve_collisions(
    session: &mut GameSession,
    sheet: &SpriteSheet,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) -> bool {
    if first_collision(session, sheet).is_none() {
        return false;
    }

    let cleared = session.obstacles.len();
    session.obstacles.clear();
    session.player.apply_hit(now_ms);
    session.cooldown_started_ms = Some(now_ms);

    log::info!(
        "Player hit at score {} ({} obstacle(s) cleared, health {})",
        session.score,
        cleared,
        session.player.health
    );
    events.push(GameEvent::PlayerHit {
        health: session.player.health,
    });
    true
}
