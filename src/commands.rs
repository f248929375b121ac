//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the same coordinators the TUI
//! uses. Each handler takes CLI args and Output, returns ExitCode.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{AssetResolver, ErrorKind, MovieApi, OmdbClient, OmdbError, PosterResolver};
use crate::cli::{ExitCode, InfoCmd, Output, SearchCmd, SuggestCmd, ThemeAction, ThemeCmd, ThemeResponse};
use crate::config::{Config, ConfigError, ThemePreference};
use crate::detail::DetailCoordinator;
use crate::metadata::{with_na_fallback, MIN_QUERY_LENGTH};
use crate::models::{DetailViewState, SearchSuggestion, SectionContent};
use crate::search::{annotate_suggestions, MSG_NO_RESULTS};

// =============================================================================
// Services
// =============================================================================

/// Remote backends shared by every command
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn MovieApi>,
    pub assets: Arc<dyn AssetResolver>,
}

impl Services {
    pub fn new(api: Arc<dyn MovieApi>, assets: Arc<dyn AssetResolver>) -> Self {
        Self { api, assets }
    }

    /// Production OMDb backends keyed from env or the config file
    pub fn from_config(config_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let config = match config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };
        let api_key = config.api_key()?;

        Ok(Self::new(
            Arc::new(OmdbClient::new(api_key.clone())),
            Arc::new(PosterResolver::new(api_key)),
        ))
    }
}

/// Exit code for a failed lookup
pub fn exit_code_for(err: &OmdbError) -> ExitCode {
    match err.kind() {
        ErrorKind::EmptyInput => ExitCode::InvalidArgs,
        ErrorKind::NotFound => ExitCode::NotFound,
        ErrorKind::Timeout | ErrorKind::Network | ErrorKind::Http(_) => ExitCode::NetworkError,
        _ => ExitCode::Error,
    }
}

// =============================================================================
// Suggest Command
// =============================================================================

pub async fn suggest_cmd(cmd: SuggestCmd, services: &Services, output: &Output) -> ExitCode {
    let query = cmd.query.trim();
    if query.chars().count() < MIN_QUERY_LENGTH {
        return output.error(
            format!("Query must be at least {} characters", MIN_QUERY_LENGTH),
            ExitCode::InvalidArgs,
        );
    }

    output.info(format!("Suggestions for: {}", query));

    match services.api.search_broad(query).await {
        Ok(list) if list.is_empty() => {
            output.info(MSG_NO_RESULTS);
            if let Err(e) = output.print_either(Vec::<SearchSuggestion>::new(), &[]) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Ok(list) => {
            let limit = cmd.limit as usize;
            let items = annotate_suggestions(&list[..limit.min(list.len())], query, services.assets.as_ref());

            let lines: Vec<String> = items
                .iter()
                .map(|item| {
                    format!(
                        "{}  {} ({}) [{}]",
                        item.suggestion.imdb_id,
                        item.suggestion.title,
                        item.suggestion.year,
                        item.suggestion.media_type
                    )
                })
                .collect();

            if let Err(e) = output.print_either(&items, &lines) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(e.to_string(), exit_code_for(&e)),
    }
}

// =============================================================================
// Search / Info Commands
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, services: &Services, output: &Output) -> ExitCode {
    if cmd.title.trim().is_empty() {
        return output.error("Please enter a movie title", ExitCode::InvalidArgs);
    }
    output.info(format!("Searching for: {}", cmd.title.trim()));

    let coordinator = DetailCoordinator::new();
    match coordinator
        .search_movie(services.api.as_ref(), services.assets.as_ref(), &cmd.title)
        .await
    {
        Ok(_) => print_detail(&coordinator.state(), output),
        Err(e) => output.error(e.to_string(), exit_code_for(&e)),
    }
}

pub async fn info_cmd(cmd: InfoCmd, services: &Services, output: &Output) -> ExitCode {
    if let Err(e) = crate::cli::validate_imdb_id(&cmd.imdb_id) {
        return output.error(e, ExitCode::InvalidArgs);
    }
    output.info(format!("Getting info for: {}", cmd.imdb_id));

    let coordinator = DetailCoordinator::new();
    match coordinator
        .search_movie_detail(services.api.as_ref(), services.assets.as_ref(), &cmd.imdb_id, None)
        .await
    {
        Ok(_) => print_detail(&coordinator.state(), output),
        Err(e) => output.error(e.to_string(), exit_code_for(&e)),
    }
}

fn print_detail(state: &DetailViewState, output: &Output) -> ExitCode {
    if let Err(e) = output.print_either(state, &detail_lines(state)) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

/// Plain-text rendering of a ready detail view
pub fn detail_lines(state: &DetailViewState) -> Vec<String> {
    let Some(payload) = state.payload() else {
        return state
            .error_message()
            .map(|m| vec![m.to_string()])
            .unwrap_or_default();
    };
    let hero = &payload.hero;

    let mut facts = vec![hero.release_year.clone()];
    facts.extend(hero.runtime.clone());
    facts.extend(hero.primary_rating.clone());

    let mut lines = vec![
        format!("{} ({})", hero.title, payload.movie.imdb_id),
        facts.join(" • "),
    ];
    if !hero.genres.is_empty() {
        lines.push(hero.genres.join(", "));
    }
    lines.push(String::new());
    lines.push(hero.plot_snippet.clone());

    for section in &payload.sections {
        lines.push(String::new());
        lines.push(format!("── {} ──", section.label()));
        match &section.content {
            SectionContent::Overview(overview) => {
                lines.extend(overview.highlight_bullets.iter().map(|b| format!("• {}", b)));
            }
            SectionContent::Info(info) => {
                let list = |values: &[String]| {
                    if values.is_empty() {
                        with_na_fallback(None)
                    } else {
                        values.join(", ")
                    }
                };
                lines.push(format!("Released:  {}", with_na_fallback(info.release_date.as_deref())));
                lines.push(format!("Runtime:   {}", with_na_fallback(info.runtime.as_deref())));
                lines.push(format!("Cast:      {}", list(&info.cast_preview)));
                lines.push(format!("Languages: {}", list(&info.languages)));
                lines.push(format!("Awards:    {}", with_na_fallback(info.awards.as_deref())));
            }
            SectionContent::Ratings(ratings) => {
                lines.push(format!("IMDb:            {}", with_na_fallback(ratings.imdb_rating.as_deref())));
                lines.push(format!("Metacritic:      {}", with_na_fallback(ratings.metacritic.as_deref())));
                lines.push(format!("Rotten Tomatoes: {}", with_na_fallback(ratings.rotten_tomatoes.as_deref())));
                lines.push(format!("Votes:           {}", with_na_fallback(ratings.user_score.as_deref())));
            }
        }
    }

    if let Some(url) = &payload.poster.primary_url {
        lines.push(String::new());
        lines.push(format!("Poster: {}", url));
    }
    lines
}

// =============================================================================
// Theme Command
// =============================================================================

pub fn theme_cmd(cmd: ThemeCmd, config_path: Option<PathBuf>, output: &Output) -> ExitCode {
    let path = config_path.clone().or_else(Config::path);
    let mut preference = ThemePreference::load(config_path);

    let mode = match cmd.action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => preference.current(),
        ThemeAction::Toggle => match preference.toggle() {
            Ok(mode) => mode,
            Err(e) => {
                return output.error(format!("Could not save theme: {}", e), ExitCode::Error)
            }
        },
    };

    let response = ThemeResponse {
        theme: mode.to_string(),
        path: path.map(|p| p.display().to_string()),
    };
    if let Err(e) = output.print_either(&response, &[mode.to_string()]) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
