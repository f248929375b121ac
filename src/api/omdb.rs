//! OMDb (Open Movie Database) API client
//!
//! Provides exact-title lookup, id lookup and broad search for movies.
//! API docs: https://www.omdbapi.com/

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::api::MovieApi;
use crate::models::{MediaType, Movie, Rating, SearchSuggestion};

/// Production endpoint
pub const OMDB_BASE_URL: &str = "http://www.omdbapi.com/";

/// Cap on every outbound call
pub const OMDB_TIMEOUT: Duration = Duration::from_secs(10);

pub const MSG_EMPTY_TITLE: &str = "Please enter a movie title";
pub const MSG_EMPTY_TERM: &str = "Please enter a search term";
pub const MSG_INVALID_ID: &str = "Invalid movie ID";
pub const MSG_NOT_FOUND: &str = "Movie not found—try another!";
pub const MSG_SEARCH_FAILED: &str = "Search failed—check connection";
pub const MSG_RETRY_SOON: &str = "Search hiccup—retry soon";

/// The three query shapes the client issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Title,
    Id,
    Broad,
}

/// Root cause of a failed lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    Http(u16),
    Timeout,
    Network,
    NotFound,
    InvalidKey,
    RateLimited,
    TooManyResults,
    Api(String),
    InvalidResponse,
}

/// OMDb API error
///
/// Displays only the short user-facing message. The cause is available
/// through [`OmdbError::kind`] and is logged where the error is raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct OmdbError {
    kind: ErrorKind,
    message: &'static str,
}

impl OmdbError {
    pub fn new(kind: ErrorKind, lookup: Lookup) -> Self {
        let message = match (&kind, lookup) {
            (ErrorKind::EmptyInput, Lookup::Title) => MSG_EMPTY_TITLE,
            (ErrorKind::EmptyInput, Lookup::Id) => MSG_INVALID_ID,
            (ErrorKind::EmptyInput, Lookup::Broad) => MSG_EMPTY_TERM,
            (ErrorKind::NotFound, Lookup::Title) => MSG_NOT_FOUND,
            (_, Lookup::Title) => MSG_SEARCH_FAILED,
            (_, Lookup::Id | Lookup::Broad) => MSG_RETRY_SOON,
        };
        Self { kind, message }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Map a transport failure, logging the detail
    fn from_transport(err: reqwest::Error, lookup: Lookup) -> Self {
        if err.is_timeout() {
            error!(?lookup, "OMDb request timed out after {:?}", OMDB_TIMEOUT);
            Self::new(ErrorKind::Timeout, lookup)
        } else if err.is_decode() {
            error!(?lookup, "OMDb response could not be decoded: {}", err);
            Self::new(ErrorKind::InvalidResponse, lookup)
        } else {
            error!(?lookup, "OMDb network error: {}", err);
            Self::new(ErrorKind::Network, lookup)
        }
    }

    /// Classify the `Error` string of a `Response: "False"` body
    fn from_api_message(raw: Option<&str>, lookup: Lookup) -> Self {
        let raw = raw.unwrap_or_default();
        let lower = raw.to_lowercase();

        let kind = if lower.contains("not found") {
            ErrorKind::NotFound
        } else if lower.contains("invalid api key") {
            ErrorKind::InvalidKey
        } else if lower.contains("request limit") {
            ErrorKind::RateLimited
        } else if lower.contains("too many results") {
            ErrorKind::TooManyResults
        } else {
            ErrorKind::Api(raw.to_string())
        };

        match &kind {
            ErrorKind::NotFound => debug!(?lookup, "OMDb reported no match: {}", raw),
            ErrorKind::InvalidKey => error!(?lookup, "Invalid OMDb API key"),
            ErrorKind::RateLimited => error!(?lookup, "OMDb API rate limit exceeded"),
            ErrorKind::TooManyResults => warn!(?lookup, "OMDb reported too many results"),
            _ => error!(?lookup, "OMDb API error: {}", raw),
        }

        Self::new(kind, lookup)
    }
}

/// OMDb API client
#[derive(Debug, Clone)]
pub struct OmdbClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OmdbClient {
    /// Create a new OMDb client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, OMDB_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: OMDB_TIMEOUT,
            client: build_http_client(OMDB_TIMEOUT),
        }
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = build_http_client(timeout);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Issue one GET with the API key plus `params` and decode the body
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        params: &[(&str, &str)],
        lookup: Lookup,
    ) -> Result<T, OmdbError> {
        let mut query: Vec<(&str, &str)> = vec![("apikey", self.api_key.as_str())];
        query.extend_from_slice(params);

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| OmdbError::from_transport(e, lookup))?;

        let status = response.status();
        if !status.is_success() {
            error!(?lookup, "OMDb HTTP error: {}", status.as_u16());
            return Err(OmdbError::new(ErrorKind::Http(status.as_u16()), lookup));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OmdbError::from_transport(e, lookup))?;

        serde_json::from_str(&body).map_err(|e| {
            error!(?lookup, "OMDb JSON parse error: {}", e);
            OmdbError::new(ErrorKind::InvalidResponse, lookup)
        })
    }

    /// Look up one movie by exact title
    pub async fn search_by_title(&self, query: &str) -> Result<Movie, OmdbError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(OmdbError::new(ErrorKind::EmptyInput, Lookup::Title));
        }

        let raw: MovieResponse = self.get(&[("t", trimmed)], Lookup::Title).await?;
        raw.into_movie(Lookup::Title)
    }

    /// Look up one movie by IMDb id (e.g. "tt1375666")
    pub async fn search_by_id(&self, imdb_id: &str) -> Result<Movie, OmdbError> {
        let trimmed = imdb_id.trim();
        if trimmed.is_empty() {
            return Err(OmdbError::new(ErrorKind::EmptyInput, Lookup::Id));
        }

        let raw: MovieResponse = self.get(&[("i", trimmed)], Lookup::Id).await?;
        raw.into_movie(Lookup::Id)
    }

    /// Fuzzy search returning candidate movies
    ///
    /// "Movie not found" is not an error here: it yields an empty list.
    pub async fn search_broad(&self, query: &str) -> Result<Vec<SearchSuggestion>, OmdbError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(OmdbError::new(ErrorKind::EmptyInput, Lookup::Broad));
        }

        let raw: SearchResponse = self
            .get(&[("s", trimmed), ("type", "movie")], Lookup::Broad)
            .await?;
        raw.into_suggestions()
    }
}

#[async_trait]
impl MovieApi for OmdbClient {
    async fn search_by_title(&self, query: &str) -> Result<Movie, OmdbError> {
        OmdbClient::search_by_title(self, query).await
    }

    async fn search_by_id(&self, imdb_id: &str) -> Result<Movie, OmdbError> {
        OmdbClient::search_by_id(self, imdb_id).await
    }

    async fn search_broad(&self, query: &str) -> Result<Vec<SearchSuggestion>, OmdbError> {
        OmdbClient::search_broad(self, query).await
    }
}

/// Shared reqwest client builder for OMDb and poster probes. Callers also
/// set the timeout per request, so the fallback client stays bounded.
pub(crate) fn build_http_client(timeout: Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            error!("HTTP client setup failed, using defaults: {}", e);
            reqwest::Client::new()
        }
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

fn is_true(flag: Option<&str>) -> bool {
    flag.map(|f| f.eq_ignore_ascii_case("true")).unwrap_or(false)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MovieResponse {
    response: Option<String>,
    error: Option<String>,
    title: Option<String>,
    year: Option<String>,
    rated: Option<String>,
    released: Option<String>,
    runtime: Option<String>,
    genre: Option<String>,
    director: Option<String>,
    writer: Option<String>,
    actors: Option<String>,
    plot: Option<String>,
    language: Option<String>,
    country: Option<String>,
    awards: Option<String>,
    poster: Option<String>,
    #[serde(default)]
    ratings: Vec<RatingRaw>,
    metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Type")]
    media_type: Option<String>,
    box_office: Option<String>,
    website: Option<String>,
}

impl MovieResponse {
    fn into_movie(self, lookup: Lookup) -> Result<Movie, OmdbError> {
        if !is_true(self.response.as_deref()) {
            return Err(OmdbError::from_api_message(self.error.as_deref(), lookup));
        }

        let title = self.title.ok_or_else(|| {
            error!(?lookup, "OMDb movie record without a Title");
            OmdbError::new(ErrorKind::InvalidResponse, lookup)
        })?;

        Ok(Movie {
            title,
            year: self.year,
            rated: self.rated,
            released: self.released,
            runtime: self.runtime,
            genre: self.genre,
            director: self.director,
            writer: self.writer,
            actors: self.actors,
            plot: self.plot,
            language: self.language,
            country: self.country,
            awards: self.awards,
            poster: self.poster,
            ratings: self.ratings.into_iter().map(RatingRaw::into_rating).collect(),
            metascore: self.metascore,
            imdb_rating: self.imdb_rating,
            imdb_votes: self.imdb_votes,
            imdb_id: self.imdb_id.unwrap_or_default(),
            media_type: self
                .media_type
                .as_deref()
                .map(MediaType::from_str_loose)
                .unwrap_or_default(),
            box_office: self.box_office,
            website: self.website,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RatingRaw {
    source: String,
    value: String,
}

impl RatingRaw {
    fn into_rating(self) -> Rating {
        Rating {
            source: self.source,
            value: self.value,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    response: Option<String>,
    error: Option<String>,
    search: Option<Vec<SuggestionRaw>>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

impl SearchResponse {
    fn into_suggestions(self) -> Result<Vec<SearchSuggestion>, OmdbError> {
        if !is_true(self.response.as_deref()) {
            let zero_results = self
                .error
                .as_deref()
                .map(|e| e.to_lowercase().contains("movie not found"))
                .unwrap_or(false);
            if zero_results {
                debug!("OMDb broad search returned no matches");
                return Ok(Vec::new());
            }
            return Err(OmdbError::from_api_message(
                self.error.as_deref(),
                Lookup::Broad,
            ));
        }

        let rows = self.search.unwrap_or_default();
        debug!(
            "OMDb broad search: {} rows of {} total",
            rows.len(),
            self.total_results.as_deref().unwrap_or("?")
        );
        Ok(rows.into_iter().map(SuggestionRaw::into_suggestion).collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SuggestionRaw {
    title: String,
    #[serde(default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type")]
    media_type: Option<String>,
    poster: Option<String>,
}

impl SuggestionRaw {
    fn into_suggestion(self) -> SearchSuggestion {
        SearchSuggestion {
            title: self.title,
            year: self.year,
            imdb_id: self.imdb_id,
            media_type: self
                .media_type
                .as_deref()
                .map(MediaType::from_str_loose)
                .unwrap_or_default(),
            poster: self.poster,
        }
    }
}
