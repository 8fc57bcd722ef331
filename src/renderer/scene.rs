//! The scrolling playfield and level banners

use glam::IVec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{Anchor, Canvas, Color, TextStyle};
use crate::sim::{GameSession, ImageId, Level, Sprite};

const HEART_SIZE: i32 = 30;
const HEART_SPACING: i32 = 10;
const HUD_MARGIN: i32 = 10;
const SUN_POS: IVec2 = IVec2::new(SCREEN_WIDTH - 150, 50);

pub fn draw_playfield(canvas: &mut dyn Canvas, session: &GameSession, now_ms: u64) {
    let level = session.level();
    let top = IVec2::new(0, session.scroll_y);
    let below = IVec2::new(0, session.scroll_y + SCREEN_HEIGHT);

    canvas.draw_image(level.background, top);
    canvas.draw_image(level.background, below);
    if let Some(sun) = level.sun {
        canvas.draw_image(sun, SUN_POS);
    }
    if let Some(clouds) = level.clouds {
        canvas.draw_image(clouds, top);
        canvas.draw_image(clouds, below);
    }

    for obstacle in &session.obstacles {
        obstacle.draw(canvas, now_ms);
    }
    session.player.draw(canvas, now_ms);

    draw_hud(canvas, session.score, session.player.health);
}

/// Score in the top-right corner, one heart per health point in the top-left
fn draw_hud(canvas: &mut dyn Canvas, score: u64, health: u8) {
    canvas.draw_text(
        &format!("Score: {score}"),
        IVec2::new(SCREEN_WIDTH - HUD_MARGIN, HUD_MARGIN),
        TextStyle::new(36, Color::WHITE, Anchor::TopRight),
    );
    for i in 0..health as i32 {
        canvas.draw_image(
            ImageId::Heart,
            IVec2::new(HUD_MARGIN + i * (HEART_SIZE + HEART_SPACING), HUD_MARGIN),
        );
    }
}

pub fn draw_banner(canvas: &mut dyn Canvas, level: &Level) {
    canvas.draw_image(level.banner, IVec2::ZERO);
    canvas.draw_text(
        level.title,
        IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2 - 50),
        TextStyle::new(100, Color::WHITE, Anchor::Center),
    );
    canvas.draw_text(
        level.name,
        IVec2::new(SCREEN_WIDTH / 2, 400),
        TextStyle::new(50, Color::WHITE, Anchor::Center),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RecordingCanvas;
    use crate::settings::Difficulty;
    use crate::sim::{LEVEL_2, LevelId, Obstacle};

    #[test]
    fn test_background_drawn_twice_with_scroll() {
        let mut s = GameSession::new(1, Difficulty::Mid);
        s.scroll_y = -120;
        let mut canvas = RecordingCanvas::default();
        draw_playfield(&mut canvas, &s, 0);
        assert_eq!(canvas.images[0], (ImageId::Space, IVec2::new(0, -120)));
        assert_eq!(canvas.images[1], (ImageId::Space, IVec2::new(0, 580)));
        assert!(!canvas.has_image(ImageId::Sun));
    }

    #[test]
    fn test_level_two_draws_sun_and_clouds() {
        let mut s = GameSession::new(1, Difficulty::Mid);
        s.level = LevelId::Two;
        let mut canvas = RecordingCanvas::default();
        draw_playfield(&mut canvas, &s, 0);
        assert!(canvas.images.contains(&(ImageId::Sun, IVec2::new(350, 50))));
        let clouds = canvas.images.iter().filter(|(i, _)| *i == ImageId::Clouds).count();
        assert_eq!(clouds, 2);
    }

    #[test]
    fn test_hud_hearts_and_score() {
        let mut s = GameSession::new(1, Difficulty::Mid);
        s.score = 321;
        s.player.health = 2;
        s.obstacles.push(Obstacle::new(100, 600, ImageId::Asteroid));
        let mut canvas = RecordingCanvas::default();
        draw_playfield(&mut canvas, &s, 0);

        assert!(canvas.has_text("Score: 321"));
        let hearts: Vec<IVec2> = canvas
            .images
            .iter()
            .filter(|(i, _)| *i == ImageId::Heart)
            .map(|(_, p)| *p)
            .collect();
        assert_eq!(hearts, vec![IVec2::new(10, 10), IVec2::new(50, 10)]);
        assert!(canvas.images.contains(&(ImageId::Asteroid, IVec2::new(100, 600))));
    }

    #[test]
    fn test_blinking_player_is_skipped() {
        let mut s = GameSession::new(1, Difficulty::Mid);
        s.player.apply_hit(1000);
        let mut canvas = RecordingCanvas::default();
        // Hidden during the first 100 ms toggle phase
        draw_playfield(&mut canvas, &s, 1000);
        assert!(!canvas.has_image(ImageId::AstroLeft));
        assert!(!canvas.has_image(ImageId::AstroRight));
    }

    #[test]
    fn test_banner_shows_level_names() {
        let mut canvas = RecordingCanvas::default();
        draw_banner(&mut canvas, &LEVEL_2);
        assert_eq!(canvas.images, vec![(ImageId::Level2Banner, IVec2::ZERO)]);
        assert!(canvas.has_text("Level 2"));
        assert!(canvas.has_text("SKY"));
    }
}
