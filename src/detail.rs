//! Detail request coordinator
//!
//! Turns a typed title or a picked suggestion into a [`DetailViewState`].
//! Lookups race freely; every request captures a [`RequestToken`] when it
//! starts and its result is applied only if that token is still current,
//! so the last request started always wins.

use serde::Serialize;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

use crate::api::{AssetResolver, MovieApi, OmdbError};
use crate::metadata::{build_detail_sections, build_hero_summary};
use crate::models::{
    DetailPayload, DetailStatus, DetailViewState, Movie, SearchSuggestion, TabId,
};

/// Identifies one detail request; strictly increasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct Inner {
    token: u64,
    state: DetailViewState,
}

/// Owns the current token and view state; the only writer of either
#[derive(Debug, Default)]
pub struct DetailCoordinator {
    inner: Mutex<Inner>,
}

impl DetailCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current view state
    pub fn state(&self) -> DetailViewState {
        self.lock().state.clone()
    }

    pub fn current_token(&self) -> RequestToken {
        RequestToken(self.lock().token)
    }

    /// Start a request: bump the token and replace the state with Loading
    pub fn begin_request(&self, selection: Option<SearchSuggestion>) -> RequestToken {
        let mut inner = self.lock();
        inner.token += 1;
        inner.state = DetailViewState {
            status: DetailStatus::Loading,
            selected_suggestion: selection,
            active_tab: TabId::default(),
        };
        debug!("Detail request {} started", inner.token);
        RequestToken(inner.token)
    }

    /// Apply a successful result if `token` is still current
    ///
    /// Without an explicit selection, one is derived from the movie.
    /// Returns whether the result was applied.
    pub fn complete_success(
        &self,
        token: RequestToken,
        payload: DetailPayload,
        selection: Option<SearchSuggestion>,
    ) -> bool {
        let mut inner = self.lock();
        if token.0 != inner.token {
            trace!("Dropping superseded result {} (current #{})", token, inner.token);
            return false;
        }

        let selection = selection.or_else(|| Some(SearchSuggestion::from_movie(&payload.movie)));
        inner.state = DetailViewState {
            status: DetailStatus::Ready(Box::new(payload)),
            selected_suggestion: selection,
            active_tab: TabId::default(),
        };
        true
    }

    /// Apply a failure if `token` is still current
    pub fn complete_error(
        &self,
        token: RequestToken,
        message: impl Into<String>,
        selection: Option<SearchSuggestion>,
    ) -> bool {
        let mut inner = self.lock();
        if token.0 != inner.token {
            trace!("Dropping superseded error {} (current #{})", token, inner.token);
            return false;
        }

        inner.state = DetailViewState {
            status: DetailStatus::Error {
                message: message.into(),
            },
            selected_suggestion: selection,
            active_tab: TabId::default(),
        };
        true
    }

    /// Invalidate any in-flight request and return to Idle
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.token += 1;
        inner.state = DetailViewState::default();
    }

    /// Switch tabs; ignored unless the ready payload has that tab
    pub fn set_active_tab(&self, tab: TabId) -> bool {
        let mut inner = self.lock();
        let present = inner
            .state
            .payload()
            .map(|p| p.has_tab(tab))
            .unwrap_or(false);
        if !present || inner.state.active_tab == tab {
            return false;
        }
        inner.state.active_tab = tab;
        true
    }

    /// Move to the next (or previous) tab present in the payload
    pub fn cycle_tab(&self, forward: bool) -> bool {
        let next = {
            let inner = self.lock();
            let Some(payload) = inner.state.payload() else {
                return false;
            };
            let ids: Vec<TabId> = payload.sections.iter().map(|s| s.id()).collect();
            if ids.is_empty() {
                return false;
            }
            let pos = ids
                .iter()
                .position(|id| *id == inner.state.active_tab)
                .unwrap_or(0);
            let next = if forward {
                (pos + 1) % ids.len()
            } else {
                (pos + ids.len() - 1) % ids.len()
            };
            ids[next]
        };
        self.set_active_tab(next)
    }

    /// Full search by typed title
    pub async fn search_movie(
        &self,
        api: &dyn MovieApi,
        assets: &dyn AssetResolver,
        query: &str,
    ) -> Result<RequestToken, OmdbError> {
        let token = self.begin_request(None);

        match api.search_by_title(query).await {
            Ok(movie) => {
                let payload = assemble_detail_payload(movie, assets).await;
                self.complete_success(token, payload, None);
                Ok(token)
            }
            Err(e) => {
                self.complete_error(token, e.to_string(), None);
                Err(e)
            }
        }
    }

    /// Detail fetch for a picked suggestion (or any known id)
    pub async fn search_movie_detail(
        &self,
        api: &dyn MovieApi,
        assets: &dyn AssetResolver,
        imdb_id: &str,
        selection: Option<SearchSuggestion>,
    ) -> Result<RequestToken, OmdbError> {
        let token = self.begin_request(selection.clone());

        match api.search_by_id(imdb_id).await {
            Ok(movie) => {
                let payload = assemble_detail_payload(movie, assets).await;
                self.complete_success(token, payload, selection);
                Ok(token)
            }
            Err(e) => {
                self.complete_error(token, e.to_string(), selection);
                Err(e)
            }
        }
    }
}

/// Resolve the poster and derive every view field for a fetched movie
pub async fn assemble_detail_payload(movie: Movie, assets: &dyn AssetResolver) -> DetailPayload {
    let poster = assets
        .resolve_asset(Some(&movie.imdb_id), movie.poster.as_deref())
        .await;
    let hero = build_hero_summary(&movie, &poster);
    let sections = build_detail_sections(&movie);

    DetailPayload {
        movie,
        hero,
        sections,
        poster,
    }
}
