//! Leap of Faith - A vertically scrolling arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, collisions, scoring)
//! - `app`: Screen state machine (menus, playing, paused, game over)
//! - `renderer`: Draws every screen through the platform `Canvas`
//! - `platform`: Collaborator traits and the terminal implementation
//! - `persistence`: Data directory and JSON file helpers
//! - `ui`: Clickable buttons and per-screen layouts

pub mod app;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{App, Flow, Screen};
pub use highscores::{HighScoreStore, HighScores};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the fixed-rate loop
    pub const FPS: u32 = 90;

    /// Logical screen dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 500;
    pub const SCREEN_HEIGHT: i32 = 700;

    /// Player sprite size and spawn position (midtop)
    pub const PLAYER_WIDTH: i32 = 35;
    pub const PLAYER_HEIGHT: i32 = 65;
    pub const PLAYER_START_Y: i32 = 100;
    pub const PLAYER_MAX_HEALTH: u8 = 3;

    /// Obstacle sprite size
    pub const OBSTACLE_WIDTH: i32 = 50;
    pub const OBSTACLE_HEIGHT: i32 = 80;

    /// Blink window after a hit, and the visibility toggle period inside it
    pub const BLINK_DURATION_MS: u64 = 500;
    pub const BLINK_TOGGLE_MS: u64 = 100;

    /// No obstacles spawn for this long after a collision
    pub const COLLISION_COOLDOWN_MS: u64 = 1000;

    /// Frames between spawn attempts
    pub const SPAWN_DELAY_FRAMES: u32 = 100;

    /// Starting tunables (Level 1)
    pub const START_SCROLL_SPEED: i32 = 4;
    pub const START_MIN_SPAWN: u32 = 0;
    pub const START_MAX_SPAWN: u32 = 1;
    pub const START_SPAWN_SPREAD: i32 = 0;

    /// How long a level banner stays on screen
    pub const BANNER_DURATION_MS: u64 = 2000;

    /// Number of persisted high scores
    pub const HIGH_SCORE_SLOTS: usize = 3;
}
