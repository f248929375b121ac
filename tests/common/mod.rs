//! In-memory backends shared by the coordinator tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use reelscout::api::poster::dominant_color;
use reelscout::api::{AssetResolver, ErrorKind, Lookup, MovieApi, OmdbError};
use reelscout::models::{MediaAsset, MediaType, Movie, SearchSuggestion};

pub const BATMAN_TITLES: [(&str, &str, &str); 7] = [
    ("The Batman", "2022", "tt1877830"),
    ("Batman Begins", "2005", "tt0372784"),
    ("Batman Returns", "1992", "tt0103776"),
    ("Batman Forever", "1995", "tt0112462"),
    ("Batman & Robin", "1997", "tt0118688"),
    ("Batman v Superman: Dawn of Justice", "2016", "tt2975590"),
    ("The Lego Batman Movie", "2017", "tt4116284"),
];

pub fn movie(title: &str, imdb_id: &str, year: &str) -> Movie {
    Movie {
        title: title.into(),
        year: Some(year.into()),
        runtime: Some("148 min".into()),
        genre: Some("Action, Sci-Fi".into()),
        plot: Some(format!("{} plot.", title)),
        imdb_rating: Some("8.8".into()),
        imdb_id: imdb_id.into(),
        media_type: MediaType::Movie,
        ..Default::default()
    }
}

pub fn suggestion(title: &str, year: &str, imdb_id: &str) -> SearchSuggestion {
    SearchSuggestion {
        title: title.into(),
        year: year.into(),
        imdb_id: imdb_id.into(),
        media_type: MediaType::Movie,
        poster: None,
    }
}

/// Catalog with per-key artificial latency; records every call
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay responses for a title, id or broad query
    pub fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn broad_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("broad:").map(str::to_string))
            .collect()
    }

    async fn record(&self, kind: &str, key: &str) {
        self.calls.lock().unwrap().push(format!("{}:{}", kind, key));
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
    }

    fn lookup(id_or_title: &str) -> Option<Movie> {
        match id_or_title {
            "Inception" | "tt1375666" => Some(movie("Inception", "tt1375666", "2010")),
            "The Dark Knight" | "tt0468569" => Some(movie("The Dark Knight", "tt0468569", "2008")),
            _ => None,
        }
    }
}

#[async_trait]
impl MovieApi for FakeApi {
    async fn search_by_title(&self, query: &str) -> Result<Movie, OmdbError> {
        let query = query.trim();
        self.record("title", query).await;
        Self::lookup(query).ok_or_else(|| OmdbError::new(ErrorKind::NotFound, Lookup::Title))
    }

    async fn search_by_id(&self, imdb_id: &str) -> Result<Movie, OmdbError> {
        self.record("id", imdb_id).await;
        if imdb_id == "tt9999999" {
            return Err(OmdbError::new(ErrorKind::Network, Lookup::Id));
        }
        Self::lookup(imdb_id).ok_or_else(|| OmdbError::new(ErrorKind::NotFound, Lookup::Id))
    }

    async fn search_broad(&self, query: &str) -> Result<Vec<SearchSuggestion>, OmdbError> {
        self.record("broad", query).await;
        match query {
            "zzqxv" => Ok(Vec::new()),
            "fail" => Err(OmdbError::new(ErrorKind::Network, Lookup::Broad)),
            "xyzzy" => Err(OmdbError::new(ErrorKind::NotFound, Lookup::Broad)),
            "inception" => Ok(vec![suggestion("Inception", "2010", "tt1375666")]),
            _ => Ok(BATMAN_TITLES
                .iter()
                .map(|(t, y, id)| suggestion(t, y, id))
                .collect()),
        }
    }
}

/// Resolver that never touches the network
pub struct FakeAssets;

#[async_trait]
impl AssetResolver for FakeAssets {
    async fn resolve_asset(&self, imdb_id: Option<&str>, _declared: Option<&str>) -> MediaAsset {
        MediaAsset::placeholder(dominant_color(imdb_id))
    }

    fn candidate_list(&self, imdb_id: Option<&str>, declared: Option<&str>) -> Vec<String> {
        declared
            .into_iter()
            .map(str::to_string)
            .chain(imdb_id.map(|id| format!("poster://{}", id)))
            .collect()
    }
}
