mod api;
mod app;
mod config;
mod models;
mod ui;
mod validation;

use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::api::HttpContactsApi;
use crate::app::App;
use crate::config::{Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::init(Cli::parse())?;
    init_logging(&config)?;
    info!(api_url = %config.api_url, page_size = config.page_size, "starting contact manager");

    let api = HttpContactsApi::new(&config.api_url)?;
    let mut app = App::new(Arc::new(api), config.page_size);

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Show any error message
    if let Err(err) = &result {
        println!("Error: {err:#}");
    }

    info!("contact manager stopped");
    result
}

/// Logs go to a file, the terminal belongs to the UI.
fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("cannot open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Render current screen
        terminal.draw(|f| app.render(f))?;

        // Loading screens are drawn before their request goes out
        if app.has_pending() {
            app.load_pending().await;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key.code).await {
                break;
            }
        }
    }

    Ok(())
}
