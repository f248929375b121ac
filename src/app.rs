//! App state and core application logic
//!
//! Owns the query editor and wires keystrokes into the autocomplete and
//! detail coordinators. Network work is never done here; key handling
//! returns an [`Action`] and the event loop spawns it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{AssetResolver, MovieApi};
use crate::config::{ThemeMode, ThemePreference};
use crate::detail::DetailCoordinator;
use crate::models::{DetailViewState, SearchSuggestion, TabId};
use crate::search::{AutocompleteCoordinator, SuggestionsView};

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Actions
// =============================================================================

/// Work a keystroke asks the event loop to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Full search by typed title
    Submit(String),
    /// Detail fetch for a picked suggestion
    Select(SearchSuggestion),
}

// =============================================================================
// Query Editor
// =============================================================================

/// Search box text with a cursor counted in characters
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    pub query: String,
    pub cursor: usize,
}

impl QueryInput {
    fn byte_index(&self, char_index: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn len_chars(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        true
    }

    /// Delete character at cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len_chars() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.len_chars() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.len_chars();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Text before and after the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index(self.cursor))
    }
}

// =============================================================================
// Main Application State
// =============================================================================

pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Search box contents
    pub input: QueryInput,
    /// Global error message (shown as a popup, cleared on next key)
    pub error: Option<String>,

    pub suggestions: AutocompleteCoordinator,
    pub detail: Arc<DetailCoordinator>,
    pub theme: ThemePreference,

    api: Arc<dyn MovieApi>,
    assets: Arc<dyn AssetResolver>,
}

impl App {
    pub fn new(
        api: Arc<dyn MovieApi>,
        assets: Arc<dyn AssetResolver>,
        theme: ThemePreference,
    ) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Editing,
            input: QueryInput::default(),
            error: None,
            suggestions: AutocompleteCoordinator::new(Arc::clone(&api), Arc::clone(&assets)),
            detail: Arc::new(DetailCoordinator::new()),
            theme,
            api,
            assets,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.current()
    }

    pub fn suggestions_view(&self) -> SuggestionsView {
        self.suggestions.snapshot()
    }

    pub fn detail_state(&self) -> DetailViewState {
        self.detail.state()
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    /// Start an action on the runtime; the coordinator applies the result
    pub fn spawn_action(&self, action: Action) -> JoinHandle<()> {
        let detail = Arc::clone(&self.detail);
        let api = Arc::clone(&self.api);
        let assets = Arc::clone(&self.assets);

        tokio::spawn(async move {
            match action {
                Action::Submit(query) => {
                    if let Err(e) = detail
                        .search_movie(api.as_ref(), assets.as_ref(), &query)
                        .await
                    {
                        debug!("Title lookup for {:?} failed: {:?}", query, e.kind());
                    }
                }
                Action::Select(suggestion) => {
                    let id = suggestion.imdb_id.clone();
                    if let Err(e) = detail
                        .search_movie_detail(api.as_ref(), assets.as_ref(), &id, Some(suggestion))
                        .await
                    {
                        debug!("Id lookup for {} failed: {:?}", id, e.kind());
                    }
                }
            }
        })
    }

    /// Push the edited query to autocomplete; an emptied query, or any edit
    /// while a detail view is showing, returns the detail view to Idle
    fn query_changed(&mut self) {
        self.suggestions.set_query(&self.input.query);
        if self.input.query.trim().is_empty() || !self.detail.state().is_idle() {
            self.detail.clear();
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returning any work to start
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Clear error on any keypress
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key);
            None
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                let view = self.suggestions.snapshot();
                if view.items.is_empty() && view.message.is_none() {
                    self.input_mode = InputMode::Normal;
                } else {
                    self.suggestions.clear_suggestions();
                }
            }
            KeyCode::Enter => {
                if let Some(suggestion) = self.suggestions.select_focused() {
                    self.input_mode = InputMode::Normal;
                    return Some(Action::Select(suggestion));
                }
                if let Some(query) = self.suggestions.submit() {
                    self.input_mode = InputMode::Normal;
                    return Some(Action::Submit(query));
                }
            }
            KeyCode::Down => {
                self.suggestions.focus_next();
            }
            KeyCode::Up => {
                self.suggestions.focus_previous();
            }
            KeyCode::Char(c) => {
                self.input.insert(c);
                self.query_changed();
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    self.query_changed();
                }
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    self.query_changed();
                }
            }
            KeyCode::Left => self.input.cursor_left(),
            KeyCode::Right => self.input.cursor_right(),
            KeyCode::Home => self.input.cursor_home(),
            KeyCode::End => self.input.cursor_end(),
            KeyCode::Tab => {
                self.input_mode = InputMode::Normal;
                self.detail.cycle_tab(true);
            }
            _ => {}
        }
        None
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('/') | KeyCode::Char('s') => self.focus_search(),
            KeyCode::Char('t') => {
                if let Err(e) = self.theme.toggle() {
                    self.set_error(format!("Could not save theme: {}", e));
                }
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.detail.cycle_tab(true);
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.detail.cycle_tab(false);
            }
            KeyCode::Char(c @ '1'..='3') => {
                let idx = (c as usize) - ('1' as usize);
                self.detail.set_active_tab(TabId::ALL[idx]);
            }
            KeyCode::Esc => {
                if !self.detail.state().is_idle() {
                    self.detail.clear();
                } else if !self.input.query.is_empty() {
                    self.input.clear();
                    self.query_changed();
                }
            }
            _ => {}
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
