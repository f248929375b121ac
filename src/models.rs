//! Data structures and types for ReelScout
//!
//! Contains all shared models used across the application organized by domain:
//! - **Catalog**: OMDb movie records and broad-search suggestions
//! - **Suggestions**: annotated autocomplete rows
//! - **Assets**: resolved poster artwork
//! - **Detail**: the assembled detail view model and its state machine

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Catalog Models (OMDb)
// =============================================================================

/// Media type discriminator reported by OMDb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Series,
    Episode,
    Game,
}

impl MediaType {
    /// Parse the OMDb `Type` field, treating anything unknown as a movie
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "series" => MediaType::Series,
            "episode" => MediaType::Episode,
            "game" => MediaType::Game,
            _ => MediaType::Movie,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "movie"),
            MediaType::Series => write!(f, "series"),
            MediaType::Episode => write!(f, "episode"),
            MediaType::Game => write!(f, "game"),
        }
    }
}

/// A single third-party rating attached to a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Full movie record from an OMDb title or id lookup
///
/// Fields are kept as the raw strings OMDb returns (including the `"N/A"`
/// sentinel); the builders in [`crate::metadata`] normalize them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster: Option<String>,
    pub ratings: Vec<Rating>,
    pub metascore: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub imdb_id: String,
    pub media_type: MediaType,
    pub box_office: Option<String>,
    pub website: Option<String>,
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self
            .year
            .as_deref()
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.imdb_id)
    }
}

/// One row of an OMDb broad search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    pub title: String,
    pub year: String,
    pub imdb_id: String,
    pub media_type: MediaType,
    pub poster: Option<String>,
}

impl SearchSuggestion {
    /// Derive a suggestion from a fetched movie (used when a detail view was
    /// reached by typed title rather than by picking a suggestion)
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year.clone().unwrap_or_default(),
            imdb_id: movie.imdb_id.clone(),
            media_type: movie.media_type,
            poster: movie.poster.clone(),
        }
    }
}

impl fmt::Display for SearchSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) • {}", self.title, self.year, self.media_type)
    }
}

// =============================================================================
// Suggestion Models (autocomplete)
// =============================================================================

/// Where the query occurs inside a suggestion title
///
/// Casing is taken from the title, not the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnippet {
    pub prefix: String,
    pub matched: String,
    pub suffix: String,
}

/// A suggestion ready for display in the dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionItem {
    #[serde(flatten)]
    pub suggestion: SearchSuggestion,
    /// Poster URLs to try in order, without probing
    pub poster_candidates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<MatchSnippet>,
}

impl SuggestionItem {
    /// Up to two uppercase initials, shown when no poster loads
    pub fn initials(&self) -> String {
        let initials: String = self
            .suggestion
            .title
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            "??".to_string()
        } else {
            initials
        }
    }
}

// =============================================================================
// Asset Models
// =============================================================================

/// Whether a poster image could be located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Available,
    Placeholder,
}

/// Resolved poster artwork for a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub primary_url: Option<String>,
    pub fallback_url: Option<String>,
    /// Hex color shown while no image is available
    pub dominant_color: String,
    pub status: AssetStatus,
}

impl MediaAsset {
    pub fn placeholder(dominant_color: impl Into<String>) -> Self {
        Self {
            primary_url: None,
            fallback_url: None,
            dominant_color: dominant_color.into(),
            status: AssetStatus::Placeholder,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == AssetStatus::Available
    }
}

// =============================================================================
// Detail Models
// =============================================================================

/// Headline block of the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSummary {
    pub title: String,
    pub release_year: String,
    pub runtime: Option<String>,
    pub genres: Vec<String>,
    pub plot_snippet: String,
    pub primary_rating: Option<String>,
    pub backdrop_url: Option<String>,
    pub backdrop_color: String,
}

/// Identifier of a detail tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    #[default]
    Overview,
    Info,
    Ratings,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Overview, TabId::Info, TabId::Ratings];

    pub fn label(&self) -> &'static str {
        match self {
            TabId::Overview => "Overview",
            TabId::Info => "Info",
            TabId::Ratings => "Ratings",
        }
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewContent {
    pub expanded_plot: String,
    pub highlight_bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoContent {
    pub release_date: Option<String>,
    pub runtime: Option<String>,
    pub cast_preview: Vec<String>,
    pub languages: Vec<String>,
    pub awards: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingsContent {
    pub imdb_rating: Option<String>,
    pub metacritic: Option<String>,
    pub rotten_tomatoes: Option<String>,
    pub user_score: Option<String>,
    pub last_updated: Option<String>,
}

/// Per-tab payload; renderers match on the variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id", content = "content", rename_all = "lowercase")]
pub enum SectionContent {
    Overview(OverviewContent),
    Info(InfoContent),
    Ratings(RatingsContent),
}

/// One tab of the detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSection {
    pub priority: u8,
    #[serde(flatten)]
    pub content: SectionContent,
}

impl DetailSection {
    pub fn id(&self) -> TabId {
        match self.content {
            SectionContent::Overview(_) => TabId::Overview,
            SectionContent::Info(_) => TabId::Info,
            SectionContent::Ratings(_) => TabId::Ratings,
        }
    }

    pub fn label(&self) -> &'static str {
        self.id().label()
    }
}

/// Everything the detail view needs once a lookup succeeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailPayload {
    pub movie: Movie,
    pub hero: HeroSummary,
    pub sections: Vec<DetailSection>,
    pub poster: MediaAsset,
}

impl DetailPayload {
    pub fn section(&self, id: TabId) -> Option<&DetailSection> {
        self.sections.iter().find(|s| s.id() == id)
    }

    pub fn has_tab(&self, id: TabId) -> bool {
        self.section(id).is_some()
    }
}

/// Lifecycle of the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DetailStatus {
    #[default]
    Idle,
    Loading,
    Ready(Box<DetailPayload>),
    Error { message: String },
}

/// Complete detail view state, replaced wholesale on every transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DetailViewState {
    #[serde(flatten)]
    pub status: DetailStatus,
    pub selected_suggestion: Option<SearchSuggestion>,
    pub active_tab: TabId,
}

impl DetailViewState {
    pub fn is_idle(&self) -> bool {
        matches!(self.status, DetailStatus::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, DetailStatus::Loading)
    }

    pub fn payload(&self) -> Option<&DetailPayload> {
        match &self.status {
            DetailStatus::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            DetailStatus::Error { message } => Some(message),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
