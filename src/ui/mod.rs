//! Menu widgets
//!
//! Buttons are plain values rebuilt for every frame; each menu owns its own
//! list so a click can only ever hit the menu that is on screen.

pub mod button;

pub use button::{Action, Button, ButtonStyle, hit};

use crate::settings::Difficulty;

/// Every screen that shows buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Main,
    Settings,
    HighScores,
    Paused,
    GameOver,
}

const X: i32 = 150;

/// The buttons belonging to one menu, in draw order
pub fn buttons(menu: Menu) -> Vec<Button> {
    use ButtonStyle::{Primary, Secondary};
    match menu {
        Menu::Main => vec![
            Button::new("Play", (X, 220), Primary, Action::Play),
            Button::new("Settings", (X, 290), Primary, Action::OpenSettings),
            Button::new("HighScore", (X, 360), Primary, Action::ShowHighScores),
            Button::new("Quit", (X, 500), Secondary, Action::Quit),
        ],
        Menu::Settings => Difficulty::ALL
            .into_iter()
            .zip([200, 270, 340])
            .map(|(d, y)| Button::new(d.as_str(), (X, y), Primary, Action::SetDifficulty(d)))
            .chain([Button::new("Back", (X, 450), Secondary, Action::Back)])
            .collect(),
        Menu::HighScores => vec![Button::new("Back", (X, 500), Secondary, Action::Back)],
        Menu::Paused => vec![
            Button::new("Resume", (X, 260), Primary, Action::Resume),
            Button::new("Restart", (X, 330), Primary, Action::Restart),
            Button::new("Settings", (X, 400), Primary, Action::OpenSettings),
            Button::new("Main Menu", (X, 470), Primary, Action::MainMenu),
        ],
        Menu::GameOver => vec![
            Button::new("Restart", (X, 330), Primary, Action::Restart),
            Button::new("Main Menu", (X, 400), Primary, Action::MainMenu),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const ALL: [Menu; 5] = [
        Menu::Main,
        Menu::Settings,
        Menu::HighScores,
        Menu::Paused,
        Menu::GameOver,
    ];

    #[test]
    fn test_buttons_do_not_overlap_within_a_menu() {
        for menu in ALL {
            let list = buttons(menu);
            for (i, a) in list.iter().enumerate() {
                for b in &list[i + 1..] {
                    assert!(!a.rect.intersects(&b.rect), "{menu:?}: {} / {}", a.label, b.label);
                }
            }
        }
    }

    #[test]
    fn test_settings_offers_every_difficulty_in_order() {
        let labels: Vec<&str> = buttons(Menu::Settings).iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["Low", "Mid", "High", "Back"]);
        assert_eq!(
            hit(&buttons(Menu::Settings), Vec2::new(250.0, 225.0)),
            Some(Action::SetDifficulty(Difficulty::Low))
        );
    }

    #[test]
    fn test_same_point_means_different_things_per_menu() {
        // (250, 365) is "HighScore" on the main menu and "High" in settings
        let p = Vec2::new(250.0, 365.0);
        assert_eq!(hit(&buttons(Menu::Main), p), Some(Action::ShowHighScores));
        assert_eq!(
            hit(&buttons(Menu::Settings), p),
            Some(Action::SetDifficulty(Difficulty::High))
        );
        assert_eq!(hit(&buttons(Menu::GameOver), p), Some(Action::Restart));
        assert_eq!(hit(&buttons(Menu::HighScores), p), None);
    }
}
