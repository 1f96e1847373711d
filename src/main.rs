//! userdata-tui binary entry point.
//!
//! Parses arguments, sets up file logging, initializes the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_appender::non_blocking::WorkerGuard;

use userdata_tui::app::config::{Args, config_file_path};
use userdata_tui::app::{self, AppState, Keymap, Theme};

/// Log to a file; the terminal belongs to the UI.
fn init_logging(args: &Args) -> Result<WorkerGuard> {
    let dir = args.resolved_log_dir();
    std::fs::create_dir_all(&dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(&dir, "userdata-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_logging(&args)?;

    let config_dir = args.resolved_config_dir();
    let theme = Theme::load_or_init(&config_file_path(&config_dir, "theme.conf"));
    let keymap = Keymap::load_or_init(&config_file_path(&config_dir, "keybinds.conf"));
    tracing::info!(config_dir = %config_dir.display(), "starting userdata-tui");

    let state = AppState::new(theme, keymap);
    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, state, args.source());

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
