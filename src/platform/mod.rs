//! Platform abstraction layer
//!
//! The core never touches a window, terminal or sound card directly. A platform
//! supplies:
//! - A `Canvas` to draw images, text and filled rectangles on
//! - An `AudioSink` for fire-and-forget cues
//! - One `FrameInput` per frame (drained events, held keys, clock)

pub mod terminal;

use glam::{IVec2, Vec2};

use crate::audio::Cue;
use crate::sim::{ImageId, Rect};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(190, 190, 190);
    pub const YELLOW: Color = Color::rgb(255, 215, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Which point of the text box `draw_text` positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    TopLeft,
    #[default]
    Center,
    TopRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Nominal font size in pixels
    pub size: u16,
    pub color: Color,
    pub anchor: Anchor,
}

impl TextStyle {
    pub const fn new(size: u16, color: Color, anchor: Anchor) -> Self {
        Self {
            size,
            color,
            anchor,
        }
    }
}

/// Drawing surface in logical screen pixels
pub trait Canvas {
    /// Logical size (width, height)
    fn size(&self) -> IVec2;

    /// Blit an image with its top-left corner at `pos`
    fn draw_image(&mut self, image: ImageId, pos: IVec2);

    fn draw_text(&mut self, text: &str, pos: IVec2, style: TextStyle);

    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Fire-and-forget audio playback
pub trait AudioSink {
    fn play(&mut self, cue: Cue);

    /// Start a cue that repeats until the process exits
    fn play_looped(&mut self, cue: Cue);

    /// Volume in [0, 1] for a cue (applies to running loops too)
    fn set_volume(&mut self, cue: Cue, volume: f32);
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Escape,
    P,
    M,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Click at logical screen coordinates
    MouseDown(Vec2),
    /// Window closed / Ctrl-C
    Quit,
}

/// Everything the game needs from the platform for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub left_held: bool,
    pub right_held: bool,
    /// Milliseconds since the platform started
    pub now_ms: u64,
}

/// Canvas that records draw calls, for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub images: Vec<(ImageId, IVec2)>,
    pub texts: Vec<(String, IVec2)>,
    pub rects: Vec<(Rect, Color)>,
}

impl RecordingCanvas {
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|(t, _)| t.contains(needle))
    }

    pub fn has_image(&self, image: ImageId) -> bool {
        self.images.iter().any(|(i, _)| *i == image)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> IVec2 {
        IVec2::new(crate::consts::SCREEN_WIDTH, crate::consts::SCREEN_HEIGHT)
    }

    fn draw_image(&mut self, image: ImageId, pos: IVec2) {
        self.images.push((image, pos));
    }

    fn draw_text(&mut self, text: &str, pos: IVec2, _style: TextStyle) {
        self.texts.push((text.to_string(), pos));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rects.push((rect, color));
    }
}

/// Audio sink that only logs, for platforms without sound
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) {
        log::debug!("Audio cue {:?}", cue);
    }

    fn play_looped(&mut self, cue: Cue) {
        log::debug!("Audio loop {:?}", cue);
    }

    fn set_volume(&mut self, cue: Cue, volume: f32) {
        log::debug!("Audio volume {:?} -> {:.2}", cue, volume);
    }
}
