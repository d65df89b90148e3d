//! GLIZZTRIS - falling hot dogs in the terminal

mod input;
mod settings;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use glizztris::{Game, GameState, TICK_INTERVAL};
use input::{Command, KeyBindings};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::Instant,
};

/// Get the glizztris temp directory, creating it if needed
fn glizztris_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("glizztris");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Setup tracing to log file
    let log_dir = glizztris_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "glizztris=debug".parse::<tracing_subscriber::filter::Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "GLIZZTRIS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let mut settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if let Ok(game) = &result {
        let score = game.score();
        println!("\nThanks for playing GLIZZTRIS!");
        println!("Final Score: {}", score.points);
        println!("Level: {} | Lines: {}", score.level, score.lines);
    }

    result.map(|_| ())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, settings: &mut Settings) -> io::Result<Game> {
    let keys = KeyBindings::from_settings(settings);
    let mut game = Game::new(settings.theme.selector());
    let mut last_tick = Instant::now();
    // Each finished game is recorded once
    let mut recorded = false;

    loop {
        terminal.draw(|frame| ui::render_game(frame, &game, settings))?;

        let timeout = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match keys.command(key) {
                        Some(Command::Quit) => return Ok(game),
                        Some(Command::Game(action)) => game.process_action(action),
                        Some(Command::NextTheme) => {
                            let theme = settings.theme.next_theme();
                            game.set_theme_selector(settings.theme.selector());
                            game.set_piece_theme(theme);
                            save_settings(settings);
                        }
                        Some(Command::RandomTheme) => {
                            settings.theme.reset_to_random();
                            game.set_theme_selector(settings.theme.selector());
                            save_settings(settings);
                        }
                        None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            game.tick(last_tick.elapsed());
            last_tick = Instant::now();
        }

        match game.state() {
            // a clear still in flight may add points after the top-out
            GameState::GameOver if !recorded && game.animating_rows().is_empty() => {
                let score = game.score();
                tracing::info!("Game over: score={} lines={} level={}", score.points, score.lines, score.level);
                settings.add_score(score.points, score.lines, score.level);
                save_settings(settings);
                recorded = true;
            }
            GameState::Running => recorded = false,
            _ => {}
        }
    }
}

fn save_settings(settings: &Settings) {
    if let Err(e) = settings.save() {
        tracing::warn!("Could not save settings: {}", e);
    }
}
