//! Shared sprite vocabulary: rectangles, image handles, and the sprite trait

use glam::{IVec2, Vec2};

use crate::platform::Canvas;

/// Axis-aligned rectangle in logical screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle whose top edge is centered on `(cx, top)`
    pub fn from_midtop(cx: i32, top: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, top, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Point-in-rect test (right/bottom edges exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x as f32
            && point.x < self.right() as f32
            && point.y >= self.y as f32
            && point.y < self.bottom() as f32
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Keep the whole rectangle within `[0, max_right]` horizontally
    pub fn clamp_horizontal(&mut self, max_right: i32) {
        if self.x < 0 {
            self.x = 0;
        }
        if self.right() > max_right {
            self.x = max_right - self.w;
        }
    }
}

/// Handle for every image the game draws. The platform decides what each looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    AstroLeft,
    AstroRight,
    Asteroid,
    Bird1,
    Bird2,
    Bird3,
    Balloon,
    Space,
    Sky,
    City,
    Sun,
    Clouds,
    Heart,
    MenuBackground,
    Level1Banner,
    Level2Banner,
    Level3Banner,
}

impl ImageId {
    /// Full-screen images (backgrounds, banners, overlays)
    pub fn is_backdrop(&self) -> bool {
        matches!(
            self,
            ImageId::Space
                | ImageId::Sky
                | ImageId::City
                | ImageId::Clouds
                | ImageId::MenuBackground
                | ImageId::Level1Banner
                | ImageId::Level2Banner
                | ImageId::Level3Banner
        )
    }
}

/// Which way the player sprite is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

/// Per-frame inputs shared by every sprite update
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateContext {
    pub left_held: bool,
    pub right_held: bool,
    /// Horizontal step for the player (pixels/frame)
    pub player_speed: i32,
    /// Vertical step for obstacles (pixels/frame)
    pub scroll_speed: i32,
    pub now_ms: u64,
}

/// Capability shared by everything that lives on the playfield
pub trait Sprite {
    fn rect(&self) -> Rect;

    fn image(&self) -> ImageId;

    fn update(&mut self, ctx: &UpdateContext);

    fn draw(&self, canvas: &mut dyn Canvas, _now_ms: u64) {
        canvas.draw_image(self.image(), self.rect().pos());
    }
}
