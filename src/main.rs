//! Leap of Faith entry point
//!
//! Sets up logging and persistence, then runs the fixed-rate loop on the
//! terminal platform.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use leap_of_faith::consts::FPS;
use leap_of_faith::persistence::{self, HIGH_SCORES_FILE, LOG_FILE, SETTINGS_FILE};
use leap_of_faith::platform::LogAudio;
use leap_of_faith::platform::terminal::Terminal;
use leap_of_faith::settings::SettingsStore;
use leap_of_faith::{App, Flow, HighScoreStore};

/// Log to a file so output never lands on the game screen
fn init_logging(dir: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(dir.join(LOG_FILE)) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            // Nowhere safe to write while the terminal is in raw mode
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn run<W: Write>(app: &mut App, terminal: &mut Terminal<W>) -> io::Result<()> {
    let frame = Duration::from_micros(1_000_000 / FPS as u64);
    loop {
        let started = Instant::now();

        let input = terminal.poll()?;
        if app.update(&input) == Flow::Quit {
            return Ok(());
        }
        app.render(terminal.canvas(), input.now_ms);
        terminal.present()?;

        if let Some(rest) = frame.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

fn main() -> io::Result<()> {
    let data_dir = persistence::data_dir()?;
    init_logging(&data_dir);
    log::info!("Leap of Faith starting (data in {})", data_dir.display());

    let high_scores = HighScoreStore::open(data_dir.join(HIGH_SCORES_FILE));
    let settings = SettingsStore::open(data_dir.join(SETTINGS_FILE));

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Seed: {}", seed);

    let mut app = App::new(high_scores, settings, Box::new(LogAudio), seed);

    let mut terminal = Terminal::enter(io::stdout())?;
    let result = run(&mut app, &mut terminal);
    terminal.leave()?;

    match &result {
        Ok(()) => log::info!("Leap of Faith exiting"),
        Err(e) => log::error!("Terminal error: {}", e),
    }
    result
}
