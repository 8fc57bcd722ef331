//! Game session state and core simulation types
//!
//! Everything a single run mutates lives in `GameSession`; a restart simply
//! builds a new one.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::{Level, LevelId};
use super::obstacle::Obstacle;
use super::player::Player;
use crate::consts::*;
use crate::settings::Difficulty;

/// Score-driven knobs that milestones adjust during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tunables {
    /// Pixels per frame for obstacles and background
    pub scroll_speed: i32,
    /// Smallest batch per spawn attempt
    pub min_spawn: u32,
    /// Largest batch per spawn attempt
    pub max_spawn: u32,
    /// Extra depth below the bottom edge new obstacles may start at
    pub spawn_spread: i32,
    /// Frames between spawn attempts
    pub spawn_delay: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            scroll_speed: START_SCROLL_SPEED,
            min_spawn: START_MIN_SPAWN,
            max_spawn: START_MAX_SPAWN,
            spawn_spread: START_SPAWN_SPREAD,
            spawn_delay: SPAWN_DELAY_FRAMES,
        }
    }
}

/// Things that happened during a tick that the outer layers react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Show the banner for the level the run starts on
    LevelIntro(LevelId),
    /// Switched to a new level
    LevelUp(LevelId),
    /// Player collided; health is what remains
    PlayerHit { health: u8 },
    /// Health reached zero
    GameOver { score: u64 },
}

/// One play-through
#[derive(Debug, Clone)]
pub struct GameSession {
    pub score: u64,
    pub level: LevelId,
    pub tunables: Tunables,
    pub difficulty: Difficulty,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Background offset, in (-SCREEN_HEIGHT, 0]
    pub scroll_y: i32,
    /// Frames since the last spawn attempt
    pub spawn_timer: u32,
    /// Set after a collision; no spawning until it lapses
    pub cooldown_started_ms: Option<u64>,
    /// Index of the next milestone that has not fired yet
    pub next_milestone: usize,
    pub rng: Pcg32,
}

impl GameSession {
    /// Fresh run on Level 1 with the given difficulty
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        log::info!(
            "New session (seed {}, difficulty {})",
            seed,
            difficulty.as_str()
        );
        Self {
            score: 0,
            level: LevelId::One,
            tunables: Tunables::default(),
            difficulty,
            player: Player::new(),
            obstacles: Vec::new(),
            scroll_y: 0,
            spawn_timer: 0,
            cooldown_started_ms: None,
            next_milestone: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn level(&self) -> &'static Level {
        self.level.descriptor()
    }

    pub fn player_speed(&self) -> i32 {
        self.difficulty.player_speed()
    }

    /// Whether a collision cooldown is still blocking spawns
    pub fn in_cooldown(&self) -> bool {
        self.cooldown_started_ms.is_some()
    }
}
