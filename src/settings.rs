//! Game settings and preferences
//!
//! Persisted as JSON next to the high score table.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Player movement sensitivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Low,
    #[default]
    Mid,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Mid, Difficulty::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "Low",
            Difficulty::Mid => "Mid",
            Difficulty::High => "High",
        }
    }

    /// Horizontal pixels per frame
    pub fn player_speed(&self) -> i32 {
        match self {
            Difficulty::Low => 3,
            Difficulty::Mid => 5,
            Difficulty::High => 8,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Background loop volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Mid,
            music_volume: 0.3,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Volumes clamped to the valid range
    pub fn sanitized(mut self) -> Self {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged and otherwise ignored
    pub fn save(&self, path: &Path) {
        match persistence::write_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
        }
    }
}

/// Settings plus the file they live in
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    pub settings: Settings,
}

impl SettingsStore {
    /// Load from `path`
    pub fn open(path: PathBuf) -> Self {
        let settings = Settings::load(&path);
        Self {
            path: Some(path),
            settings,
        }
    }

    /// Not backed by a file
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            path: None,
            settings,
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.settings.difficulty == difficulty {
            return;
        }
        log::info!("Difficulty set to {}", difficulty.as_str());
        self.settings.difficulty = difficulty;
        self.persist();
    }

    fn persist(&self) {
        if let Some(path) = &self.path {
            self.settings.save(path);
        }
    }
}
