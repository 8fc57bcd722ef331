//! Audio cues and the manager that routes them to the platform
//!
//! The game only names cues; what they sound like is up to the `AudioSink`.

use crate::platform::AudioSink;
use crate::settings::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Background theme, looped from launch
    Background,
    /// Player collided with an obstacle
    Hit,
    /// Reached a new level
    LevelUp,
    /// Health ran out
    Death,
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>, settings: &Settings) -> Self {
        Self {
            sink,
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Start the looping background theme
    pub fn start_music(&mut self) {
        self.sink
            .set_volume(Cue::Background, self.effective_volume(Cue::Background));
        self.sink.play_looped(Cue::Background);
    }

    /// Get effective volume
    fn effective_volume(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        match cue {
            Cue::Background => self.music_volume,
            _ => self.sfx_volume,
        }
    }

    /// Play a one-shot cue
    pub fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume(cue);
        if vol <= 0.0 {
            return;
        }
        self.sink.set_volume(cue, vol);
        self.sink.play(cue);
    }
}
