//! reelscout - terminal movie finder backed by OMDb
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! reelscout
//!
//! # CLI mode (for automation)
//! reelscout suggest "bat"
//! reelscout search "Inception" --json
//! reelscout info tt0468569
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use reelscout::cli::{Cli, Command, ExitCode, Output};
use reelscout::commands::{self, Services};
use reelscout::{App, ThemePreference};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.is_cli_mode());

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(cli).await
    }
}

/// Logs go to stderr; silent by default in the TUI so the alternate screen
/// stays clean. RUST_LOG overrides either default.
fn init_logging(cli_mode: bool) {
    let default = if cli_mode { "warn" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let Some(command) = cli.command else {
        return ExitCode::Success;
    };

    if let Command::Theme(cmd) = command {
        return commands::theme_cmd(cmd, cli.config, &output);
    }

    let services = match Services::from_config(cli.config.as_ref()) {
        Ok(services) => services,
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    };

    match command {
        Command::Suggest(cmd) => commands::suggest_cmd(cmd, &services, &output).await,
        Command::Search(cmd) => commands::search_cmd(cmd, &services, &output).await,
        Command::Info(cmd) => commands::info_cmd(cmd, &services, &output).await,
        Command::Theme(_) => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: Cli) -> Result<()> {
    // Fail before touching the terminal when there is no key
    let services = Services::from_config(cli.config.as_ref())?;
    let theme = ThemePreference::load(cli.config.clone());
    let mut app = App::new(services.api, services.assets, theme);

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, spawns lookups, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        terminal.draw(|frame| reelscout::ui::render(frame, app))?;

        // Poll off the runtime thread so spawned lookups keep running
        let next = tokio::task::block_in_place(|| -> Result<Option<Event>> {
            if event::poll(TICK_RATE)? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        })?;

        if let Some(Event::Key(key)) = next {
            // Only handle key press events (ignore releases on Windows)
            if key.kind == KeyEventKind::Press {
                if let Some(action) = app.handle_key(key) {
                    app.spawn_action(action);
                }
            }
        }
    }

    Ok(())
}
