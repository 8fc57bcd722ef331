//! The player-controlled astronaut


use super::entity::{Facing, ImageId, Rect, Sprite, UpdateContext};
use crate::consts::*;
use crate::platform::Canvas;

/// Post-hit blink window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blink {
    pub active: bool,
    pub start_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub facing: Facing,
    pub health: u8,
    pub blink: Blink,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::from_midtop(
                SCREEN_WIDTH / 2,
                PLAYER_START_Y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            facing: Facing::Left,
            health: PLAYER_MAX_HEALTH,
            blink: Blink::default(),
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take one point of damage and start blinking
    pub fn apply_hit(&mut self, now_ms: u64) {
        self.health = self.health.saturating_sub(1);
        self.blink = Blink {
            active: true,
            start_ms: now_ms,
        };
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether the sprite is drawn this frame
    pub fn is_visible(&self, now_ms: u64) -> bool {
        if !self.blink.active || self.blink_expired(now_ms) {
            return true;
        }
        (now_ms / BLINK_TOGGLE_MS) % 2 != 0
    }

    fn blink_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.blink.start_ms) > BLINK_DURATION_MS
    }
}

impl Sprite for Player {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn image(&self) -> ImageId {
        match self.facing {
            Facing::Left => ImageId::AstroLeft,
            Facing::Right => ImageId::AstroRight,
        }
    }

    fn update(&mut self, ctx: &UpdateContext) {
        if ctx.left_held {
            self.facing = Facing::Left;
            self.rect.x -= ctx.player_speed;
        } else if ctx.right_held {
            self.facing = Facing::Right;
            self.rect.x += ctx.player_speed;
        }
        self.rect.clamp_horizontal(SCREEN_WIDTH);

        if self.blink.active && self.blink_expired(ctx.now_ms) {
            self.blink.active = false;
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, now_ms: u64) {
        if self.is_visible(now_ms) {
            canvas.draw_image(self.image(), self.rect.pos());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx(left: bool, right: bool, speed: i32) -> UpdateContext {
        UpdateContext {
            left_held: left,
            right_held: right,
            player_speed: speed,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_centered_with_full_health() {
        let p = Player::new();
        assert_eq!(p.rect.x, 233);
        assert_eq!(p.rect.y, 100);
        assert_eq!(p.health, 3);
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn test_move_sets_facing_and_image() {
        let mut p = Player::new();
        p.update(&ctx(false, true, 5));
        assert_eq!(p.rect.x, 238);
        assert_eq!(p.image(), ImageId::AstroRight);

        p.update(&ctx(true, false, 5));
        assert_eq!(p.rect.x, 233);
        assert_eq!(p.image(), ImageId::AstroLeft);
    }

    #[test]
    fn test_left_wins_when_both_held() {
        let mut p = Player::new();
        p.update(&ctx(true, true, 8));
        assert_eq!(p.rect.x, 225);
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn test_health_floors_at_zero() {
        let mut p = Player::new();
        for expected in [2, 1, 0, 0] {
            p.apply_hit(0);
            assert_eq!(p.health, expected);
        }
        assert!(!p.is_alive());
    }

    #[test]
    fn test_blink_toggles_then_restores() {
        let mut p = Player::new();
        p.apply_hit(1000);
        assert!(!p.is_visible(1000)); // 10 -> even -> hidden
        assert!(p.is_visible(1150)); // 11 -> odd -> shown
        assert!(!p.is_visible(1250));
        assert!(p.is_visible(1600)); // window over

        p.update(&UpdateContext {
            now_ms: 1501,
            ..Default::default()
        });
        assert!(!p.blink.active);
        assert!(p.is_visible(1600));
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(
            moves in prop::collection::vec((any::<bool>(), any::<bool>()), 0..300),
            speed in prop::sample::select(vec![3, 5, 8]),
        ) {
            let mut p = Player::new();
            for (left, right) in moves {
                p.update(&ctx(left, right, speed));
                prop_assert!(p.rect.x >= 0);
                prop_assert!(p.rect.x <= SCREEN_WIDTH - PLAYER_WIDTH);
            }
        }
    }
}
