//! Clickable rectangle with a centered label

use glam::Vec2;

use crate::platform::{Anchor, Canvas, Color, TextStyle};
use crate::settings::Difficulty;
use crate::sim::Rect;

pub const BUTTON_WIDTH: i32 = 200;
pub const BUTTON_HEIGHT: i32 = 50;
pub const BUTTON_FONT_SIZE: u16 = 36;

/// What a click on a button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play,
    OpenSettings,
    ShowHighScores,
    Quit,
    Back,
    SetDifficulty(Difficulty),
    Resume,
    Restart,
    MainMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// White background
    Primary,
    /// Gray background (Back / Quit)
    Secondary,
}

impl ButtonStyle {
    pub fn background(&self) -> Color {
        match self {
            ButtonStyle::Primary => Color::WHITE,
            ButtonStyle::Secondary => Color::GRAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub rect: Rect,
    pub style: ButtonStyle,
    pub action: Action,
}

impl Button {
    /// Standard-size button with its top-left corner at `pos`
    pub fn new(label: &'static str, pos: (i32, i32), style: ButtonStyle, action: Action) -> Self {
        Self {
            label,
            rect: Rect::new(pos.0, pos.1, BUTTON_WIDTH, BUTTON_HEIGHT),
            style,
            action,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.rect, self.style.background());
        canvas.draw_text(
            self.label,
            self.rect.center(),
            TextStyle::new(BUTTON_FONT_SIZE, Color::BLACK, Anchor::Center),
        );
    }
}

/// Action of the first button under `point`
pub fn hit(buttons: &[Button], point: Vec2) -> Option<Action> {
    buttons.iter().find(|b| b.contains(point)).map(|b| b.action)
}
