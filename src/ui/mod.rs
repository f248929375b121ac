//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first; every frame is drawn from
//! coordinator snapshots taken at the start of the draw.

pub mod detail;
pub mod search;
pub mod theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, InputMode};
use crate::config::ThemeMode;
pub use theme::Palette;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = Palette::for_mode(app.theme_mode());
    let suggestions = app.suggestions_view();
    let detail = app.detail_state();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(palette.background()), area);

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(15), Constraint::Min(1)])
        .split(chunks[0]);

    render_logo(frame, header[0], &palette);
    search::render_search_box(frame, header[1], &app.input, &app.input_mode, &palette);
    detail::render_detail(frame, chunks[1], &detail, &palette);
    render_status_bar(frame, chunks[2], app, &palette);

    // Dropdown overlays the detail panel
    if app.input_mode == InputMode::Editing {
        search::render_suggestions(frame, header[1], &suggestions, &palette);
    }

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error, &palette);
    }
}

fn render_logo(frame: &mut Frame, area: Rect, palette: &Palette) {
    let logo = Paragraph::new(Line::from(vec![
        Span::styled("REEL", palette.title()),
        Span::styled(
            "SCOUT",
            Style::default()
                .fg(palette.secondary)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border()),
    );
    frame.render_widget(logo, area);
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(palette.background).bg(palette.primary),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(palette.background).bg(palette.accent),
        ),
    };

    let theme_indicator = match app.theme_mode() {
        ThemeMode::Light => Span::styled(" ☀ light ", palette.dimmed()),
        ThemeMode::Dark => Span::styled(" ☾ dark ", palette.dimmed()),
    };

    let help = Span::styled(
        " q:quit  /:search  ↑↓:pick  tab:tabs  t:theme  esc:back ",
        palette.dimmed(),
    );

    let status_line = Line::from(vec![mode_indicator, theme_indicator, Span::raw("│"), help]);
    frame.render_widget(Paragraph::new(status_line).style(palette.status_bar()), area);
}

/// Render error popup overlay
fn render_error_popup(frame: &mut Frame, area: Rect, error: &str, palette: &Palette) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, palette.error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(palette.error())
            .title(Span::styled(" ✗ ERROR ", palette.error()))
            .style(palette.background()),
    );

    frame.render_widget(error_block, popup_area);
}
