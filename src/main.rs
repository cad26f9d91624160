//! Wildmere - Entry Point
//!
//! This is the main executable that initializes logging and the
//! terminal, builds the engine around the main menu, and runs the
//! loop until a state asks to quit.

use std::fs::OpenOptions;
use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use wildmere::config::Config;
use wildmere::game::{Engine, MainMenuState};

fn main() -> Result<()> {
    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("wildmere.log")
        .unwrap_or_else(|_| OpenOptions::new().write(true).open("/dev/null").unwrap());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Wildmere v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Build the engine around the main menu and run it
    let menu = MainMenuState::new(config.clone());
    let mut engine = Engine::new(config, Box::new(menu));
    let result = engine.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Wildmere shut down cleanly");
    result
}
