//! Screen state machine
//!
//! A single flat loop drives everything: each frame the platform hands over a
//! `FrameInput`, `App::update` routes its events to the active screen and
//! ticks the session while playing, then `App::render` draws the result.
//! Screens never call back into the loop, so long sessions cannot grow the
//! stack.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, Cue};
use crate::consts::BANNER_DURATION_MS;
use crate::highscores::{HighScoreStore, HighScores};
use crate::platform::{AudioSink, Canvas, FrameInput, InputEvent, Key};
use crate::renderer;
use crate::settings::{Difficulty, Settings, SettingsStore};
use crate::sim::{GameEvent, GameSession, LevelId, SpriteSheet, TickInput, tick};
use crate::ui::{self, Action, Menu};

/// Where the settings screen returns to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOrigin {
    MainMenu,
    Paused,
}

impl SettingsOrigin {
    fn screen(&self) -> Screen {
        match self {
            SettingsOrigin::MainMenu => Screen::MainMenu,
            SettingsOrigin::Paused => Screen::Paused,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Settings { origin: SettingsOrigin },
    HighScores,
    Playing,
    /// Full-screen level banner; play resumes at `until_ms`
    Transition { level: LevelId, until_ms: u64 },
    Paused,
    GameOver { final_score: u64, rank: Option<usize> },
}

impl Screen {
    /// The button set that belongs to this screen
    pub fn menu(&self) -> Option<Menu> {
        match self {
            Screen::MainMenu => Some(Menu::Main),
            Screen::Settings { .. } => Some(Menu::Settings),
            Screen::HighScores => Some(Menu::HighScores),
            Screen::Paused => Some(Menu::Paused),
            Screen::GameOver { .. } => Some(Menu::GameOver),
            Screen::Playing | Screen::Transition { .. } => None,
        }
    }
}

/// Whether the platform loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    screen: Screen,
    session: Option<GameSession>,
    high_scores: HighScoreStore,
    settings: SettingsStore,
    audio: AudioManager,
    sheet: SpriteSheet,
    /// Seeds each new session
    seeds: Pcg32,
}

impl App {
    /// Start on the main menu with the background theme playing
    pub fn new(
        high_scores: HighScoreStore,
        settings: SettingsStore,
        audio: Box<dyn AudioSink>,
        seed: u64,
    ) -> Self {
        let mut audio = AudioManager::new(audio, &settings.settings);
        audio.start_music();
        Self {
            screen: Screen::MainMenu,
            session: None,
            high_scores,
            settings,
            audio,
            sheet: SpriteSheet::default(),
            seeds: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        self.high_scores.scores()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings.settings
    }

    /// Process one frame of input and advance the game
    pub fn update(&mut self, input: &FrameInput) -> Flow {
        for event in &input.events {
            if self.handle_event(event, input.now_ms) == Flow::Quit {
                log::info!("Quit requested");
                return Flow::Quit;
            }
        }
        self.advance(input);
        Flow::Continue
    }

    pub fn render(&self, canvas: &mut dyn Canvas, now_ms: u64) {
        renderer::render(self, canvas, now_ms);
    }

    fn handle_event(&mut self, event: &InputEvent, _now_ms: u64) -> Flow {
        match event {
            InputEvent::Quit => Flow::Quit,
            InputEvent::KeyDown(key) => {
                self.handle_key(*key);
                Flow::Continue
            }
            InputEvent::MouseDown(point) => {
                let Some(menu) = self.screen.menu() else {
                    return Flow::Continue;
                };
                match ui::hit(&ui::buttons(menu), *point) {
                    Some(action) => self.perform(action),
                    None => Flow::Continue,
                }
            }
        }
    }

    fn handle_key(&mut self, key: Key) {
        match (self.screen, key) {
            (Screen::Playing, Key::Escape | Key::P | Key::M) => {
                log::info!("Paused");
                self.screen = Screen::Paused;
            }
            (Screen::Settings { origin }, Key::Escape) => self.screen = origin.screen(),
            (Screen::HighScores, Key::Escape) => self.screen = Screen::MainMenu,
            _ => {}
        }
    }

    fn perform(&mut self, action: Action) -> Flow {
        match action {
            Action::Play | Action::Restart => self.start_session(),
            Action::OpenSettings => {
                let origin = match self.screen {
                    Screen::Paused => SettingsOrigin::Paused,
                    _ => SettingsOrigin::MainMenu,
                };
                self.screen = Screen::Settings { origin };
            }
            Action::ShowHighScores => self.screen = Screen::HighScores,
            Action::Quit => return Flow::Quit,
            Action::Back => match self.screen {
                Screen::Settings { origin } => self.screen = origin.screen(),
                Screen::HighScores => self.screen = Screen::MainMenu,
                _ => {}
            },
            Action::SetDifficulty(difficulty) => self.set_difficulty(difficulty),
            Action::Resume => {
                if let Some(session) = &self.session {
                    log::info!("Resuming with score {}", session.score);
                    self.screen = Screen::Playing;
                }
            }
            Action::MainMenu => {
                self.session = None;
                self.screen = Screen::MainMenu;
            }
        }
        Flow::Continue
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.set_difficulty(difficulty);
        if let Some(session) = &mut self.session {
            session.difficulty = difficulty;
        }
    }

    fn start_session(&mut self) {
        let seed = self.seeds.random::<u64>();
        self.session = Some(GameSession::new(seed, self.settings.settings.difficulty));
        self.screen = Screen::Playing;
    }

    fn advance(&mut self, input: &FrameInput) {
        match self.screen {
            Screen::Transition { until_ms, .. } => {
                if input.now_ms >= until_ms {
                    self.screen = Screen::Playing;
                }
            }
            Screen::Playing => {
                let Some(session) = self.session.as_mut() else {
                    self.screen = Screen::MainMenu;
                    return;
                };
                let tick_input = TickInput {
                    left_held: input.left_held,
                    right_held: input.right_held,
                    now_ms: input.now_ms,
                };
                for event in tick(session, &tick_input, &self.sheet) {
                    self.on_game_event(event, input.now_ms);
                }
            }
            _ => {}
        }
    }

    fn on_game_event(&mut self, event: GameEvent, now_ms: u64) {
        match event {
            GameEvent::LevelIntro(level) => self.show_banner(level, now_ms),
            GameEvent::LevelUp(level) => {
                self.audio.play(Cue::LevelUp);
                self.show_banner(level, now_ms);
            }
            GameEvent::PlayerHit { .. } => self.audio.play(Cue::Hit),
            GameEvent::GameOver { score } => {
                self.audio.play(Cue::Death);
                let rank = self.high_scores.report_final_score(score);
                self.session = None;
                self.screen = Screen::GameOver {
                    final_score: score,
                    rank,
                };
            }
        }
    }

    fn show_banner(&mut self, level: LevelId, now_ms: u64) {
        self.screen = Screen::Transition {
            level,
            until_ms: now_ms + BANNER_DURATION_MS,
        };
    }
}
