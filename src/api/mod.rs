//! API clients for external services
//!
//! - OMDb: movie metadata lookup and broad search
//! - Poster: artwork existence probing and fallback ordering
//!
//! The coordinators talk to these through the [`MovieApi`] and
//! [`AssetResolver`] traits so they can be driven by in-memory fakes.

pub mod omdb;
pub mod poster;

use async_trait::async_trait;

use crate::models::{MediaAsset, Movie, SearchSuggestion};

pub use omdb::{ErrorKind, Lookup, OmdbClient, OmdbError};
pub use poster::PosterResolver;

/// Remote movie catalog
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Exact-title lookup
    async fn search_by_title(&self, query: &str) -> Result<Movie, OmdbError>;

    /// Lookup by IMDb id
    async fn search_by_id(&self, imdb_id: &str) -> Result<Movie, OmdbError>;

    /// Fuzzy search; no matches is an empty list, not an error
    async fn search_broad(&self, query: &str) -> Result<Vec<SearchSuggestion>, OmdbError>;
}

/// Poster artwork lookup
#[async_trait]
pub trait AssetResolver: Send + Sync {
    /// Probe candidates and return the first that exists
    async fn resolve_asset(&self, imdb_id: Option<&str>, declared: Option<&str>) -> MediaAsset;

    /// Candidates in fallback order, without probing
    fn candidate_list(&self, imdb_id: Option<&str>, declared: Option<&str>) -> Vec<String>;
}
