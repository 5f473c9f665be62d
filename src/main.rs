//! BLOCKFALL - a falling-block puzzle game for the terminal

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use blockfall::game::{Game, GameState};
use blockfall::input::{Command, InputHandler};
use blockfall::settings::Settings;
use blockfall::ui;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Application state
enum AppState {
    Title,
    Playing(Game),
}

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file so output never lands on the game screen
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse().context("Invalid log directive")?),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    if let Some(path) = Settings::settings_path().filter(|path| !path.exists()) {
        match settings.save() {
            Ok(()) => tracing::info!("Wrote default settings to {}", path.display()),
            Err(e) => tracing::warn!("Could not write default settings: {:#}", e),
        }
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    let last_game = result?;
    println!("\nThanks for playing BLOCKFALL!");
    if let Some(game) = last_game {
        println!("Final Score: {}", game.score.points);
        println!("Rows: {} | Pieces: {}", game.score.rows, game.score.pieces);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> Result<Option<Game>> {
    let input = InputHandler::from_settings(settings);
    let frame_duration = Duration::from_secs(1) / settings.gameplay.frame_rate;
    let mut state = AppState::Title;
    let mut next_frame = Instant::now() + frame_duration;

    loop {
        terminal.draw(|frame| match &state {
            AppState::Title => ui::render_title(frame, settings),
            AppState::Playing(game) => ui::render_game(frame, game, settings),
        })?;

        // Drain input until the next frame is due
        while event::poll(next_frame.saturating_duration_since(Instant::now()))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let command = input.key_down(key);
            let mut start = false;
            if command == Some(Command::Quit) {
                return Ok(match state {
                    AppState::Playing(game) => {
                        tracing::info!("Quit with score {}", game.score.points);
                        Some(game)
                    }
                    AppState::Title => None,
                });
            }

            match (command, &mut state) {
                (Some(Command::Start), AppState::Playing(game)) => {
                    if game.state == GameState::GameOver {
                        game.restart();
                    }
                }
                (Some(Command::Game(action)), AppState::Playing(game)) => {
                    game.process_action(action);
                }
                (Some(Command::Start), AppState::Title) => start = true,
                _ => {}
            }
            if start {
                state = AppState::Playing(Game::new(settings.gameplay));
            }
        }

        // Fixed-rate frame clock drives gravity
        next_frame += frame_duration;
        if let AppState::Playing(game) = &mut state {
            game.update();
        }
    }
}
