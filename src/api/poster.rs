//! Poster artwork resolution
//!
//! A movie's declared poster URL (usually Amazon-hosted) is tried first,
//! then OMDb's own poster service keyed by IMDb id. Both are probed with a
//! HEAD request; when neither answers the view falls back to initials on a
//! color derived from the id.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use crate::api::omdb::{build_http_client, OMDB_TIMEOUT};
use crate::api::AssetResolver;
use crate::metadata::sanitize;
use crate::models::{AssetStatus, MediaAsset};

/// Production poster service
pub const POSTER_BASE_URL: &str = "http://img.omdbapi.com/";

/// Background used when there is no id to hash
pub const DEFAULT_BACKDROP_COLOR: &str = "#0b1120";

/// Fixed palette for placeholder backgrounds
pub const PLACEHOLDER_PALETTE: [&str; 6] = [
    "#1e293b", "#312e81", "#3f1d38", "#064e3b", "#78350f", "#1e3a8a",
];

/// Pick a stable palette color for an entity id
pub fn dominant_color(imdb_id: Option<&str>) -> &'static str {
    let Some(id) = imdb_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return DEFAULT_BACKDROP_COLOR;
    };

    let hash = id
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    PLACEHOLDER_PALETTE[hash as usize % PLACEHOLDER_PALETTE.len()]
}

/// Resolves poster URLs against OMDb's image service
#[derive(Debug, Clone)]
pub struct PosterResolver {
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl PosterResolver {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, POSTER_BASE_URL)
    }

    /// Create a resolver with a custom poster service URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: OMDB_TIMEOUT,
            client: build_http_client(OMDB_TIMEOUT),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = build_http_client(timeout);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poster service URL for an id
    pub fn constructed_url(&self, imdb_id: &str) -> String {
        format!(
            "{}?apikey={}&i={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(imdb_id)
        )
    }

    /// Ordered fallback list: declared poster first, then the constructed
    /// per-id URL. No network access.
    pub fn candidate_list(&self, imdb_id: Option<&str>, declared: Option<&str>) -> Vec<String> {
        let mut candidates = Vec::with_capacity(2);
        if let Some(url) = sanitize(declared) {
            candidates.push(url);
        }
        if let Some(id) = sanitize(imdb_id) {
            candidates.push(self.constructed_url(&id));
        }
        candidates
    }

    /// Cheap existence check
    async fn probe(&self, url: &str) -> bool {
        match self.client.head(url).timeout(self.timeout).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!("Poster unavailable ({}): {}", response.status().as_u16(), url);
                false
            }
            Err(e) => {
                warn!("Poster probe failed for {}: {}", url, e);
                false
            }
        }
    }

    /// Find a working poster URL, probing candidates in order
    pub async fn resolve_asset(&self, imdb_id: Option<&str>, declared: Option<&str>) -> MediaAsset {
        let color = dominant_color(imdb_id);
        let candidates = self.candidate_list(imdb_id, declared);

        for (i, url) in candidates.iter().enumerate() {
            if self.probe(url).await {
                return MediaAsset {
                    primary_url: Some(url.clone()),
                    fallback_url: candidates.get(i + 1).cloned(),
                    dominant_color: color.to_string(),
                    status: AssetStatus::Available,
                };
            }
        }

        MediaAsset::placeholder(color)
    }
}

#[async_trait]
impl AssetResolver for PosterResolver {
    async fn resolve_asset(&self, imdb_id: Option<&str>, declared: Option<&str>) -> MediaAsset {
        PosterResolver::resolve_asset(self, imdb_id, declared).await
    }

    fn candidate_list(&self, imdb_id: Option<&str>, declared: Option<&str>) -> Vec<String> {
        PosterResolver::candidate_list(self, imdb_id, declared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_color_is_stable() {
        let a = dominant_color(Some("tt1375666"));
        let b = dominant_color(Some("tt1375666"));
        assert_eq!(a, b);
        assert!(PLACEHOLDER_PALETTE.contains(&a));
    }

    #[test]
    fn test_dominant_color_without_id() {
        assert_eq!(dominant_color(None), DEFAULT_BACKDROP_COLOR);
        assert_eq!(dominant_color(Some("  ")), DEFAULT_BACKDROP_COLOR);
    }

    #[test]
    fn test_timeout_follows_override() {
        let resolver = PosterResolver::new("key");
        assert_eq!(resolver.timeout(), OMDB_TIMEOUT);
        let resolver = resolver.with_timeout(Duration::from_secs(2));
        assert_eq!(resolver.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_candidate_list_order() {
        let resolver = PosterResolver::with_base_url("key", "http://img.test/");
        let candidates =
            resolver.candidate_list(Some("tt0468569"), Some("https://cdn.test/dark-knight.jpg"));
        assert_eq!(
            candidates,
            vec![
                "https://cdn.test/dark-knight.jpg".to_string(),
                "http://img.test/?apikey=key&i=tt0468569".to_string(),
            ]
        );
    }

    #[test]
    fn test_candidate_list_skips_sentinel() {
        let resolver = PosterResolver::with_base_url("key", "http://img.test/");
        assert_eq!(
            resolver.candidate_list(Some("tt0468569"), Some("N/A")),
            vec!["http://img.test/?apikey=key&i=tt0468569".to_string()]
        );
        assert!(resolver.candidate_list(None, Some("")).is_empty());
    }
}
