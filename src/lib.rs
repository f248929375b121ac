//! reelscout - terminal movie finder backed by OMDb
//!
//! Live suggestions while you type, then a detail view with plot, cast,
//! ratings and poster for the movie you pick.
//!
//! # Modules
//!
//! - `models` - Movies, suggestions and the detail view state
//! - `api` - OMDb client and poster resolution
//! - `metadata` - Derived display fields (hero, tabs, snippets)
//! - `search` - Debounced autocomplete
//! - `detail` - Detail request lifecycle with stale-result suppression
//! - `config` - Config file, API key and theme preference
//! - `app` / `ui` - Terminal front-end
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod detail;
pub mod metadata;
pub mod models;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use models::{
    DetailPayload, DetailStatus, DetailViewState, MediaAsset, MediaType, Movie,
    SearchSuggestion, SuggestionItem, TabId,
};

pub use api::{AssetResolver, MovieApi, OmdbClient, OmdbError, PosterResolver};
pub use app::{Action, App};
pub use config::{Config, ThemeMode, ThemePreference};
pub use detail::{DetailCoordinator, RequestToken};
pub use search::AutocompleteCoordinator;
