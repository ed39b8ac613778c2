//! BLOCKFALL - falling blocks in the terminal
//!
//! Next-piece preview, a hold slot, and a fall speed that climbs every ten
//! lines.

mod audio;
mod input;
mod settings;
mod ui;

use audio::AudioManager;
use blockfall::game::{Action, Game};
use crossterm::{
    event::{
        self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use input::InputHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file so output never lands on the game screen
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=debug"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings_existed = Settings::exists();
    let settings = Settings::load();

    // Audio is optional - the game works without it
    let mut audio = if settings.audio.music_enabled {
        AudioManager::new(&settings.audio.music_file, settings.music_gain())
    } else {
        None
    };
    if let Some(audio) = &mut audio {
        audio.play_bgm();
    }

    let mut game = match settings.gameplay.seed {
        Some(seed) => {
            tracing::info!(seed, "using fixed piece seed");
            Game::with_seed(seed)
        }
        None => Game::new(),
    };

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        // Needed for key release events (soft drop off)
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &settings, &mut audio);

    // Restore terminal
    if enhanced_keys {
        execute!(stdout(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Some(audio) = &mut audio {
        audio.stop_bgm();
    }

    if !settings_existed {
        if let Err(e) = settings.save() {
            tracing::warn!("Could not save settings: {:#}", e);
        }
    }

    if result.is_ok() {
        println!("Lines cleared: {}", game.lines_cleared());
    }
    tracing::info!(lines = game.lines_cleared(), "BLOCKFALL shutting down");

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
    audio: &mut Option<AudioManager>,
) -> io::Result<()> {
    let mut input = InputHandler::new();
    let mut last_frame = Instant::now();
    let mut game_over = false;

    loop {
        // Gravity first, then the input that arrived this frame
        let now = Instant::now();
        game.tick(now.duration_since(last_frame));
        last_frame = now;

        let mut actions = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        actions.extend(input.key_down(key));
                    }
                    KeyEventKind::Release => actions.extend(input.key_up(key)),
                }
            }
        }
        actions.extend(input.update());

        for action in actions {
            if action == Action::Quit {
                tracing::info!("quit requested");
                return Ok(());
            }
            game.process_action(action);
        }

        // Music pauses on game over and restarts with the next game
        if game.is_game_over() != game_over {
            game_over = game.is_game_over();
            if !game_over {
                input.clear();
            }
            if let Some(audio) = audio {
                if game_over {
                    audio.pause_bgm();
                } else {
                    audio.stop_bgm();
                    audio.play_bgm();
                }
            }
        }

        terminal.draw(|frame| ui::render_game(frame, game, settings))?;

        // Sleep out the rest of the frame, waking early for input
        let elapsed = last_frame.elapsed();
        if elapsed < FRAME_DURATION {
            event::poll(FRAME_DURATION - elapsed)?;
        }
    }
}
