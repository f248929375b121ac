//! Autocomplete coordinator tests
//!
//! Runs on a paused clock so debounce timing is exact.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeApi, FakeAssets};
use reelscout::search::{AutocompleteCoordinator, AutocompleteState, MSG_NO_RESULTS};

fn coordinator(api: &Arc<FakeApi>) -> AutocompleteCoordinator {
    AutocompleteCoordinator::new(api.clone(), Arc::new(FakeAssets))
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(350)).await;
}

#[tokio::test(start_paused = true)]
async fn test_short_query_never_searches() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("b");
    assert_eq!(ac.state(), AutocompleteState::Empty);
    settle().await;

    assert!(api.calls().is_empty());
    let view = ac.snapshot();
    assert!(view.items.is_empty());
    assert!(!view.loading);
    assert!(view.message.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_whitespace_padded_query_counts_trimmed_length() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("  b  ");
    settle().await;

    assert!(api.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_debounce_waits_for_quiet_period() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("bat");
    tokio::time::sleep(Duration::from_millis(299)).await;
    assert!(api.calls().is_empty());
    assert_eq!(ac.state(), AutocompleteState::Debouncing);
    assert!(ac.snapshot().loading);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(api.broad_calls(), vec!["bat".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_edits_coalesce() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("ba");
    tokio::time::sleep(Duration::from_millis(100)).await;
    ac.set_query("bat");
    tokio::time::sleep(Duration::from_millis(100)).await;
    ac.set_query("batm");
    settle().await;

    assert_eq!(api.broad_calls(), vec!["batm".to_string()]);
    assert_eq!(ac.snapshot().query, "batm");
}

#[tokio::test(start_paused = true)]
async fn test_results_truncated_with_snippets() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("bat");
    settle().await;

    let view = ac.snapshot();
    assert!(!view.loading);
    assert_eq!(view.items.len(), 5);

    let first = &view.items[0];
    assert_eq!(first.suggestion.title, "The Batman");
    assert_eq!(first.poster_candidates, vec!["poster://tt1877830".to_string()]);

    let snippet = first.snippet.as_ref().unwrap();
    assert_eq!(snippet.prefix, "The ");
    assert_eq!(snippet.matched, "Bat");
    assert_eq!(snippet.suffix, "man");
}

#[tokio::test(start_paused = true)]
async fn test_empty_results_show_hint() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("zzqxv");
    settle().await;

    let view = ac.snapshot();
    assert!(view.items.is_empty());
    assert_eq!(view.message.as_deref(), Some(MSG_NO_RESULTS));
}

#[tokio::test(start_paused = true)]
async fn test_not_found_error_shows_hint() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("xyzzy");
    tokio::time::sleep(Duration::from_millis(400)).await;

    let view = ac.snapshot();
    assert_eq!(api.broad_calls(), vec!["xyzzy".to_string()]);
    assert!(view.items.is_empty());
    assert!(!view.loading);
    assert_eq!(view.message.as_deref(), Some(MSG_NO_RESULTS));
}

#[tokio::test(start_paused = true)]
async fn test_lookup_failure_shows_retry_message() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("fail");
    settle().await;

    let view = ac.snapshot();
    assert!(view.items.is_empty());
    assert_eq!(view.message.as_deref(), Some("Search hiccup—retry soon"));
}

#[tokio::test(start_paused = true)]
async fn test_slow_lookup_superseded_by_newer_query() {
    let api = Arc::new(FakeApi::new().with_delay("slow", Duration::from_secs(2)));
    let mut ac = coordinator(&api);

    ac.set_query("slow");
    settle().await;
    assert_eq!(ac.state(), AutocompleteState::Searching);

    ac.set_query("inception");
    settle().await;
    tokio::time::sleep(Duration::from_secs(3)).await;

    let view = ac.snapshot();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].suggestion.imdb_id, "tt1375666");
}

#[tokio::test(start_paused = true)]
async fn test_shrinking_query_clears_list() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("bat");
    settle().await;
    assert!(!ac.snapshot().items.is_empty());

    ac.set_query("b");
    let view = ac.snapshot();
    assert!(view.items.is_empty());
    assert!(!view.loading);
}

#[tokio::test(start_paused = true)]
async fn test_focus_wraps_both_ways() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    assert_eq!(ac.focus_next(), None);

    ac.set_query("bat");
    settle().await;

    assert_eq!(ac.focus_previous(), Some(4));
    assert_eq!(ac.focus_next(), Some(0));
    for _ in 0..4 {
        ac.focus_next();
    }
    assert_eq!(ac.focused(), Some(4));
    assert_eq!(ac.focus_next(), Some(0));
    assert_eq!(ac.focus_previous(), Some(4));

    ac.set_focus(Some(9));
    assert_eq!(ac.focused(), None);
}

#[tokio::test(start_paused = true)]
async fn test_select_focused_closes_list() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("bat");
    settle().await;

    assert!(ac.select_focused().is_none());

    ac.focus_next();
    ac.focus_next();
    let picked = ac.select_focused().unwrap();
    assert_eq!(picked.title, "Batman Begins");

    let view = ac.snapshot();
    assert!(view.items.is_empty());
    assert_eq!(view.query, "bat");
}

#[tokio::test(start_paused = true)]
async fn test_submit_returns_trimmed_query() {
    let api = Arc::new(FakeApi::new());
    let mut ac = coordinator(&api);

    ac.set_query("  Inception ");
    assert_eq!(ac.submit().as_deref(), Some("Inception"));
    settle().await;

    // Submitting cancels the pending lookup
    assert!(api.broad_calls().is_empty());
    assert!(ac.snapshot().items.is_empty());

    ac.set_query("   ");
    assert!(ac.submit().is_none());
}
