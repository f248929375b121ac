//! Autocomplete coordinator
//!
//! Debounces keystrokes into broad searches and keeps the suggestion list
//! that the search box shows underneath. Only the latest query can ever
//! populate the list: each edit aborts the pending task and bumps a
//! generation counter that completions are checked against.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::api::{AssetResolver, MovieApi};
use crate::metadata::{match_snippet, MIN_QUERY_LENGTH};
use crate::models::{SearchSuggestion, SuggestionItem};

/// Quiet period before a query is sent
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Most suggestions ever shown
pub const MAX_SUGGESTIONS: usize = 5;

pub const MSG_NO_RESULTS: &str = "No movies found—try broader terms!";

/// Where the autocomplete lifecycle currently is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AutocompleteState {
    #[default]
    Empty,
    Debouncing,
    Searching,
    Settled(Vec<SearchSuggestion>),
    Failed(String),
}

/// What the search box renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionsView {
    pub query: String,
    pub items: Vec<SuggestionItem>,
    pub message: Option<String>,
    pub loading: bool,
    pub focused: Option<usize>,
}

impl SuggestionsView {
    pub fn focused_item(&self) -> Option<&SuggestionItem> {
        self.focused.and_then(|i| self.items.get(i))
    }
}

#[derive(Debug, Default)]
struct Shared {
    query: String,
    generation: u64,
    state: AutocompleteState,
    focused: Option<usize>,
}

impl Shared {
    fn visible_len(&self) -> usize {
        match &self.state {
            AutocompleteState::Settled(list) => list.len().min(MAX_SUGGESTIONS),
            _ => 0,
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Attach poster candidates and match snippets to raw suggestions
pub fn annotate_suggestions(
    suggestions: &[SearchSuggestion],
    query: &str,
    assets: &dyn AssetResolver,
) -> Vec<SuggestionItem> {
    suggestions
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|s| SuggestionItem {
            poster_candidates: assets.candidate_list(Some(&s.imdb_id), s.poster.as_deref()),
            snippet: match_snippet(&s.title, query),
            suggestion: s.clone(),
        })
        .collect()
}

pub struct AutocompleteCoordinator {
    api: Arc<dyn MovieApi>,
    assets: Arc<dyn AssetResolver>,
    shared: Arc<Mutex<Shared>>,
    pending: Option<JoinHandle<()>>,
    debounce: Duration,
}

impl AutocompleteCoordinator {
    pub fn new(api: Arc<dyn MovieApi>, assets: Arc<dyn AssetResolver>) -> Self {
        Self {
            api,
            assets,
            shared: Arc::new(Mutex::new(Shared::default())),
            pending: None,
            debounce: DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Record a new query and (re)start the debounce timer
    ///
    /// Must be called inside a Tokio runtime when the query is long enough
    /// to search.
    pub fn set_query(&mut self, query: &str) {
        self.cancel_pending();

        let trimmed = query.trim().to_string();
        let generation = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.query = query.to_string();
            shared.focused = None;

            if trimmed.chars().count() < MIN_QUERY_LENGTH {
                shared.state = AutocompleteState::Empty;
                return;
            }
            shared.state = AutocompleteState::Debouncing;
            shared.generation
        };

        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.shared);
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            {
                let mut state = lock(&shared);
                if state.generation != generation {
                    return;
                }
                state.state = AutocompleteState::Searching;
            }

            debug!("Autocomplete lookup for {:?}", trimmed);
            let result = api.search_broad(&trimmed).await;

            let mut state = lock(&shared);
            if state.generation != generation {
                trace!("Dropping superseded suggestions for {:?}", trimmed);
                return;
            }
            state.state = match result {
                Ok(list) if list.is_empty() => AutocompleteState::Failed(MSG_NO_RESULTS.into()),
                Ok(list) => AutocompleteState::Settled(list),
                Err(e) if e.is_not_found() => AutocompleteState::Failed(MSG_NO_RESULTS.into()),
                Err(e) => AutocompleteState::Failed(e.to_string()),
            };
        }));
    }

    pub fn query(&self) -> String {
        lock(&self.shared).query.clone()
    }

    pub fn state(&self) -> AutocompleteState {
        lock(&self.shared).state.clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            lock(&self.shared).state,
            AutocompleteState::Debouncing | AutocompleteState::Searching
        )
    }

    /// Render-ready view; snippets use the query as it is now
    pub fn snapshot(&self) -> SuggestionsView {
        let shared = lock(&self.shared);
        let (items, message) = match &shared.state {
            AutocompleteState::Settled(list) => (
                annotate_suggestions(list, &shared.query, self.assets.as_ref()),
                None,
            ),
            AutocompleteState::Failed(message) => (Vec::new(), Some(message.clone())),
            _ => (Vec::new(), None),
        };

        SuggestionsView {
            query: shared.query.clone(),
            items,
            message,
            loading: matches!(
                shared.state,
                AutocompleteState::Debouncing | AutocompleteState::Searching
            ),
            focused: shared.focused,
        }
    }

    pub fn focused(&self) -> Option<usize> {
        lock(&self.shared).focused
    }

    /// Move focus down, wrapping to the top
    pub fn focus_next(&self) -> Option<usize> {
        let mut shared = lock(&self.shared);
        let len = shared.visible_len();
        if len == 0 {
            return None;
        }
        let next = match shared.focused {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        shared.focused = Some(next);
        Some(next)
    }

    /// Move focus up, wrapping to the bottom
    pub fn focus_previous(&self) -> Option<usize> {
        let mut shared = lock(&self.shared);
        let len = shared.visible_len();
        if len == 0 {
            return None;
        }
        let prev = match shared.focused {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        shared.focused = Some(prev);
        Some(prev)
    }

    /// Focus a row directly (mouse hover); out-of-range clears focus
    pub fn set_focus(&self, index: Option<usize>) {
        let mut shared = lock(&self.shared);
        shared.focused = index.filter(|i| *i < shared.visible_len());
    }

    /// Take the focused suggestion and close the list
    pub fn select_focused(&mut self) -> Option<SearchSuggestion> {
        let picked = {
            let shared = lock(&self.shared);
            match (&shared.state, shared.focused) {
                (AutocompleteState::Settled(list), Some(i)) if i < MAX_SUGGESTIONS => {
                    list.get(i).cloned()
                }
                _ => None,
            }
        };
        if picked.is_some() {
            self.clear_suggestions();
        }
        picked
    }

    /// Close the list and hand back the trimmed query for a full search
    pub fn submit(&mut self) -> Option<String> {
        self.clear_suggestions();
        let query = lock(&self.shared).query.trim().to_string();
        (!query.is_empty()).then_some(query)
    }

    /// Drop the list and any in-flight lookup; the query is kept
    pub fn clear_suggestions(&mut self) {
        self.cancel_pending();
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        shared.state = AutocompleteState::Empty;
        shared.focused = None;
    }
}

impl Drop for AutocompleteCoordinator {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
