//! CLI - Command Line Interface for reelscout
//!
//! Every lookup the TUI does is scriptable. Output is JSON when asked for
//! or when stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! # Autocomplete suggestions
//! reelscout suggest "bat" --limit 3
//!
//! # Full detail view by title or id
//! reelscout search "Inception" --json
//! reelscout info tt0468569
//!
//! # Theme preference
//! reelscout theme toggle
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::search::MAX_SUGGESTIONS;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Movie not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// reelscout - find movies and read their details from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "reelscout",
    version,
    author = "Gorka & Hermes",
    about = "Terminal movie finder backed by OMDb",
    long_about = "Search OMDb with live suggestions and read a movie's \
                  plot, cast and ratings.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  reelscout                          Launch interactive TUI\n\
                  reelscout suggest \"bat\"            Autocomplete suggestions\n\
                  reelscout search \"Inception\"       Detail view by title\n\
                  reelscout info tt0468569 --json    Detail view by IMDb id"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Autocomplete suggestions for a partial title
    #[command(visible_alias = "sg")]
    Suggest(SuggestCmd),

    /// Look up a movie by exact title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Look up a movie by IMDb id
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Show or toggle the light/dark preference
    Theme(ThemeCmd),
}

/// Broad search, the same lookup the search box debounces
#[derive(Args, Debug)]
pub struct SuggestCmd {
    /// Partial title (at least 2 characters)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of suggestions (1-5)
    #[arg(long, short = 'l', default_value = "5", value_parser = clap::value_parser!(u8).range(1..=MAX_SUGGESTIONS as i64))]
    pub limit: u8,
}

/// Full detail lookup by title
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Movie title
    #[arg(required = true)]
    pub title: String,
}

/// Full detail lookup by IMDb id
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// IMDb ID (e.g., tt1375666)
    #[arg(required = true)]
    pub imdb_id: String,
}

#[derive(Args, Debug)]
pub struct ThemeCmd {
    #[command(subcommand)]
    pub action: Option<ThemeAction>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Print the stored mode
    Show,
    /// Flip and persist the mode
    Toggle,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Theme command response
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print human-readable lines, or the JSON form of `data` in JSON mode
    pub fn print_either<T: Serialize>(&self, data: T, lines: &[String]) -> anyhow::Result<()> {
        if self.json {
            return self.print(data);
        }
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// IMDB ID Validation
// =============================================================================

/// Validate IMDB ID format (tt followed by 7+ digits)
pub fn validate_imdb_id(id: &str) -> Result<&str, &'static str> {
    match id.strip_prefix("tt") {
        Some(digits) if digits.len() >= 7 && digits.chars().all(|c| c.is_ascii_digit()) => Ok(id),
        _ => Err("Invalid IMDB ID format (expected tt followed by 7+ digits)"),
    }
}

// =============================================================================
// Tests
// =============================================================================
