//! UI component tests for reelscout
//!
//! Renders full frames into a `TestBackend` and checks what lands on
//! screen.
//!
//! ## Test Cases
//! - Layout renders at 80x24 (min) and 200x50 (large)
//! - Welcome, loading, error and ready detail states
//! - Suggestion dropdown with the matched part of each title

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeApi, FakeAssets};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use reelscout::app::App;
use reelscout::config::{ThemeMode, ThemePreference};

// =============================================================================
// Helpers
// =============================================================================

fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(app: &App, width: u16, height: u16) -> String {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| reelscout::ui::render(frame, app))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn new_app(mode: ThemeMode) -> App {
    App::new(
        Arc::new(FakeApi::new()),
        Arc::new(FakeAssets),
        ThemePreference::in_memory(mode),
    )
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

async fn open(app: &mut App, title: &str) {
    type_text(app, title);
    let action = app
        .handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        .unwrap();
    app.spawn_action(action).await.unwrap();
}

// =============================================================================
// LAYOUT TESTS
// =============================================================================

#[tokio::test]
async fn test_layout_min_size_idle() {
    let app = new_app(ThemeMode::Light);
    let screen = draw(&app, 80, 24);

    assert!(screen.contains("REELSCOUT"));
    assert!(screen.contains("Welcome to reelscout"));
    assert!(screen.contains("INSERT"));
    assert!(screen.contains("light"));
}

#[tokio::test]
async fn test_layout_large_ready() {
    let mut app = new_app(ThemeMode::Dark);
    open(&mut app, "Inception").await;

    let screen = draw(&app, 200, 50);
    assert!(screen.contains("Inception"));
    assert!(screen.contains("2010"));
    assert!(screen.contains("Overview"));
    assert!(screen.contains("Ratings"));
    assert!(screen.contains("NORMAL"));
    assert!(screen.contains("dark"));
}

#[tokio::test]
async fn test_ready_view_fits_min_size() {
    let mut app = new_app(ThemeMode::Light);
    open(&mut app, "The Dark Knight").await;

    let screen = draw(&app, 80, 24);
    assert!(screen.contains("The Dark Knight"));
}

// =============================================================================
// DETAIL STATE TESTS
// =============================================================================

#[tokio::test]
async fn test_error_state_message() {
    let mut app = new_app(ThemeMode::Light);
    open(&mut app, "Nonexistent Film").await;

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Movie not found—try another!"));
}

#[tokio::test]
async fn test_loading_state_names_selection() {
    let app = new_app(ThemeMode::Light);
    app.detail
        .begin_request(Some(common::suggestion("The Batman", "2022", "tt1877830")));

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Loading The Batman..."));
}

#[tokio::test]
async fn test_ratings_tab_uses_fallback_text() {
    let mut app = new_app(ThemeMode::Light);
    open(&mut app, "Inception").await;
    press(&mut app, KeyCode::Char('3'));

    let screen = draw(&app, 120, 40);
    assert!(screen.contains("IMDb"));
    assert!(screen.contains("Unavailable"));
}

#[tokio::test]
async fn test_error_popup_overlays() {
    let mut app = new_app(ThemeMode::Dark);
    app.set_error("No OMDb API key");

    let screen = draw(&app, 80, 24);
    assert!(screen.contains("ERROR"));
    assert!(screen.contains("No OMDb API key"));
}

// =============================================================================
// DROPDOWN TESTS
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_dropdown_lists_suggestions() {
    let mut app = new_app(ThemeMode::Light);
    type_text(&mut app, "bat");
    tokio::time::sleep(Duration::from_millis(350)).await;

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("The Batman (2022)"));
    assert!(screen.contains("Batman Begins (2005)"));
    assert!(!screen.contains("The Lego Batman Movie"));
}

#[tokio::test(start_paused = true)]
async fn test_dropdown_shows_empty_hint() {
    let mut app = new_app(ThemeMode::Light);
    type_text(&mut app, "zzqxv");
    tokio::time::sleep(Duration::from_millis(350)).await;

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("No movies found—try broader terms!"));
}

#[tokio::test]
async fn test_dropdown_hidden_outside_search_box() {
    let mut app = new_app(ThemeMode::Light);
    press(&mut app, KeyCode::Esc);

    let screen = draw(&app, 80, 24);
    assert!(screen.contains("NORMAL"));
    assert!(!screen.contains("Searching"));
}
