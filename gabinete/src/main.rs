//! `Gabinete` — terminal kanban board for a legislative office.
//!
//! Shows the office task board (To-Do, Doing, Blocked, Done) and persists it
//! under a local data directory. Configuration via CLI flags, environment
//! variables, or config file (`~/.config/gabinete/config.toml`).
//!
//! ```bash
//! # Board stored under the default data directory
//! cargo run --bin gabinete
//!
//! # Throwaway session
//! cargo run --bin gabinete -- --in-memory
//!
//! # Custom location, read-only
//! GABINETE_DATA_DIR=/srv/gabinete cargo run --bin gabinete -- --read-only
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gabinete_model::access::{self, Feature};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing_appender::non_blocking::WorkerGuard;

use gabinete::app::App;
use gabinete::config::{BoardConfig, CliArgs, StorageTarget};
use gabinete::store::{FileStorage, MemoryStorage, Storage, TaskStore};
use gabinete::ui;

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match BoardConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            BoardConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(
        storage = ?config.storage,
        key = %config.storage_key,
        role = %config.session.role.name,
        "gabinete starting"
    );

    let storage: Box<dyn Storage> = match &config.storage {
        StorageTarget::Directory(dir) => Box::new(FileStorage::new(dir)),
        StorageTarget::InMemory => Box::new(MemoryStorage::new()),
    };
    let store = TaskStore::new(storage, config.storage_key.clone());
    let access = access::gate(
        Some(&config.session.role),
        config.session.has_office,
        Feature::Tasks,
    );
    let mut app = App::new(store, config.limits, access);

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal.
    disable_raw_mode()?;
    if config.mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("gabinete exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("gabinete.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
fn run_app<S: Storage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    config: &BoardConfig,
) -> io::Result<()> {
    loop {
        // Step 1: Lay out for the current terminal size and draw.
        let size = terminal.size()?;
        app.set_viewport(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Step 2: Poll for terminal input events.
        if event::poll(config.poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
