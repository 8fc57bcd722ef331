//! Screen rendering
//!
//! Everything is drawn through the platform `Canvas` in logical 500x700
//! pixels. Each screen is redrawn from scratch every frame.

mod menus;
mod scene;

pub use menus::{draw_game_over, draw_high_scores, draw_main_menu, draw_paused, draw_settings};
pub use scene::{draw_banner, draw_playfield};

use crate::app::{App, Screen};
use crate::platform::Canvas;

/// Draw whatever screen `app` is showing
pub fn render(app: &App, canvas: &mut dyn Canvas, now_ms: u64) {
    match app.screen() {
        Screen::MainMenu => draw_main_menu(canvas),
        Screen::Settings { origin } => draw_settings(canvas, app.settings().difficulty, origin),
        Screen::HighScores => draw_high_scores(canvas, app.high_scores()),
        Screen::Playing => {
            if let Some(session) = app.session() {
                draw_playfield(canvas, session, now_ms);
            }
        }
        Screen::Transition { level, .. } => draw_banner(canvas, level.descriptor()),
        Screen::Paused => {
            let score = app.session().map(|s| s.score).unwrap_or(0);
            draw_paused(canvas, score);
        }
        Screen::GameOver { final_score, rank } => draw_game_over(canvas, final_score, rank),
    }
}
