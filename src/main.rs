//! `MediQuote` - Health-cost prediction TUI client.
//!
//! Entry point: logging setup, terminal init, and the main event loop.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use mediquote::api::HttpBackend;
use mediquote::app::App;
use mediquote::cli::Args;
use mediquote::fs::AppPaths;
use mediquote::tui::TerminalEventGuard;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let paths = AppPaths::from_cwd();
    init_logging(&paths);

    // Initialize the terminal with crossterm backend
    let mut terminal = ratatui::init();

    // Run the application
    let result = run_app(&mut terminal, &args, paths);

    // Restore the terminal
    ratatui::restore();

    result
}

/// Routes tracing output to `.mediquote/mediquote.log`.
///
/// Diagnostics cannot go to stderr: the TUI owns the terminal and would
/// paint over them. Logging failures are reported once and otherwise
/// ignored - the client works without a log file.
fn init_logging(paths: &AppPaths) {
    if let Err(e) = paths.ensure_app_dir() {
        eprintln!("Warning: could not create .mediquote directory: {e}");
        return;
    }

    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
    {
        Ok(file) => {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mediquote=info"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        Err(e) => eprintln!("Warning: could not open log file: {e}"),
    }
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    args: &Args,
    paths: AppPaths,
) -> std::io::Result<()> {
    // Enable terminal event modes. The guard ensures cleanup even if the
    // application panics.
    let _event_guard = TerminalEventGuard::new();

    let backend = HttpBackend::new(&args.api_url).map_err(std::io::Error::other)?;
    let mut app = App::new_with_paths(Arc::new(backend), paths).map_err(std::io::Error::other)?;

    // Fire-and-forget startup fetches: statistics (logged) and charts.
    app.start_background_loads();

    // Main event loop
    loop {
        // IMPORTANT: Layout calculation must happen inside the draw
        // closure to ensure it uses the exact same area as rendering.
        terminal.draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })?;

        // Poll for events with a short timeout
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        // Process any completed backend calls
        app.process_events();

        // Advance animation and expire notices
        app.tick();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
