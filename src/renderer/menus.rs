//! Menu screens

use glam::IVec2;

use crate::app::SettingsOrigin;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::highscores::HighScores;
use crate::platform::{Anchor, Canvas, Color, TextStyle};
use crate::settings::Difficulty;
use crate::sim::{ImageId, Rect};
use crate::ui::{self, Menu};

const TITLE: TextStyle = TextStyle::new(50, Color::WHITE, Anchor::Center);
const BODY: TextStyle = TextStyle::new(36, Color::WHITE, Anchor::Center);
const SUBTITLE: TextStyle = TextStyle::new(60, Color::WHITE, Anchor::Center);
const HIGHLIGHT: TextStyle = TextStyle::new(36, Color::YELLOW, Anchor::Center);

/// Horizontal center of the screen at height `y`
fn centered(y: i32) -> IVec2 {
    IVec2::new(SCREEN_WIDTH / 2, y)
}

/// Menu background, a title near the top and the menu's buttons
fn draw_frame(canvas: &mut dyn Canvas, title: &str, menu: Menu) {
    canvas.draw_image(ImageId::MenuBackground, IVec2::ZERO);
    canvas.draw_text(title, centered(75), TITLE);
    for button in ui::buttons(menu) {
        button.draw(canvas);
    }
}

pub fn draw_main_menu(canvas: &mut dyn Canvas) {
    draw_frame(canvas, "Leap of Faith", Menu::Main);
}

/// Settings keep the title of the screen they were opened from
pub fn draw_settings(canvas: &mut dyn Canvas, difficulty: Difficulty, origin: SettingsOrigin) {
    let title = match origin {
        SettingsOrigin::MainMenu => "Leap of Faith",
        SettingsOrigin::Paused => "Paused",
    };
    draw_frame(canvas, title, Menu::Settings);
    canvas.draw_text(
        &format!("Sensitivity : {}", difficulty.as_str()),
        centered(580),
        SUBTITLE,
    );
}

pub fn draw_high_scores(canvas: &mut dyn Canvas, scores: &HighScores) {
    canvas.fill_rect(Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT), Color::BLACK);
    canvas.draw_text("Top 3 High Scores", centered(170), TITLE);
    for (i, score) in scores.high_scores.iter().enumerate() {
        canvas.draw_text(&format!("{}. {}", i + 1, score), centered(275 + i as i32 * 70), BODY);
    }
    for button in ui::buttons(Menu::HighScores) {
        button.draw(canvas);
    }
}

pub fn draw_paused(canvas: &mut dyn Canvas, score: u64) {
    draw_frame(canvas, "Paused", Menu::Paused);
    canvas.draw_text(&format!("Score: {score}"), centered(SCREEN_HEIGHT / 2 - 150), BODY);
}

/// `rank` is the slot the final score took in the high-score table, if any
pub fn draw_game_over(canvas: &mut dyn Canvas, final_score: u64, rank: Option<usize>) {
    draw_frame(canvas, "Game Over", Menu::GameOver);
    canvas.draw_text(
        &format!("Final Score: {final_score}"),
        centered(SCREEN_HEIGHT / 2 - 50),
        BODY,
    );
    if rank.is_some() {
        canvas.draw_text("NEW HIGH SCORE", centered(500), HIGHLIGHT);
    }
}
