//! Detail view: hero summary, tab bar and the active section
//!
//! Rendering only reads a [`DetailViewState`] snapshot; every string shown
//! was already derived by the metadata builders.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap},
};

use crate::metadata::with_na_fallback;
use crate::models::{
    DetailPayload, DetailSection, DetailStatus, DetailViewState, MediaAsset, SectionContent,
};
use crate::ui::theme::{hex_color, Palette};

/// Render whichever detail state is current
pub fn render_detail(frame: &mut Frame, area: Rect, state: &DetailViewState, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border())
        .style(palette.background());

    match &state.status {
        DetailStatus::Idle => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            render_welcome(frame, inner, palette);
        }
        DetailStatus::Loading => {
            let title = state
                .selected_suggestion
                .as_ref()
                .map(|s| format!("⟳ Loading {}...", s.title))
                .unwrap_or_else(|| "⟳ Loading...".to_string());
            let loading = Paragraph::new(title)
                .style(palette.loading())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, area);
        }
        DetailStatus::Error { message } => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(format!("✗ {}", message), palette.error())),
                Line::from(""),
                Line::from(Span::styled("Edit the search to try again", palette.dimmed())),
            ];
            let error = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(error, area);
        }
        DetailStatus::Ready(payload) => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            render_ready(frame, inner, payload, state, palette);
        }
    }
}

fn render_welcome(frame: &mut Frame, area: Rect, palette: &Palette) {
    let keys = [
        ("  /  ", "Search for a movie"),
        ("  ↑↓ ", "Move through suggestions"),
        ("  ↵  ", "Open suggestion or search title"),
        (" TAB ", "Switch detail tab"),
        ("  t  ", "Toggle light/dark"),
        ("  q  ", "Quit"),
    ];

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Welcome to ", palette.text()),
            Span::styled("reelscout", palette.title()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Quick Start:", palette.accent())),
        Line::from(""),
    ];
    lines.extend(keys.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(*key, palette.keybind()),
            Span::styled(*desc, palette.dimmed()),
        ])
    }));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_ready(
    frame: &mut Frame,
    area: Rect,
    payload: &DetailPayload,
    state: &DetailViewState,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Hero
            Constraint::Length(1), // Tabs
            Constraint::Min(1),    // Section
        ])
        .split(area);

    let hero_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(1)])
        .split(rows[0]);

    render_poster(frame, hero_cols[0], &payload.poster, &payload.hero.title, palette);
    frame.render_widget(
        Paragraph::new(hero_lines(payload, palette)).wrap(Wrap { trim: true }),
        hero_cols[1],
    );

    let titles: Vec<Line> = payload
        .sections
        .iter()
        .map(|s| Line::from(format!(" {} ", s.label())))
        .collect();
    let selected = payload
        .sections
        .iter()
        .position(|s| s.id() == state.active_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(palette.tab_inactive())
        .highlight_style(palette.tab_active())
        .divider(Span::styled("│", palette.dimmed()));
    frame.render_widget(tabs, rows[1]);

    if let Some(section) = payload.section(state.active_tab) {
        frame.render_widget(
            Paragraph::new(section_lines(section, palette)).wrap(Wrap { trim: true }),
            rows[2],
        );
    }
}

/// Poster box: the resolved URL when there is one, otherwise initials on
/// the dominant color
fn render_poster(frame: &mut Frame, area: Rect, asset: &MediaAsset, title: &str, palette: &Palette) {
    let bg = hex_color(&asset.dominant_color).unwrap_or(palette.surface);
    let initials: String = title
        .split_whitespace()
        .take(2)
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    let caption = if asset.is_available() {
        "▣ poster"
    } else {
        "no poster"
    };
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            initials,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(caption, Style::default().fg(Color::Gray))),
    ];

    let poster = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.border()),
        );
    frame.render_widget(poster, area);
}

/// Title, facts line, genres and clamped plot
pub fn hero_lines(payload: &DetailPayload, palette: &Palette) -> Vec<Line<'static>> {
    let hero = &payload.hero;

    let mut facts = vec![Span::styled(hero.release_year.clone(), palette.year())];
    if let Some(runtime) = &hero.runtime {
        facts.push(Span::styled(" │ ", palette.dimmed()));
        facts.push(Span::styled(runtime.clone(), palette.secondary()));
    }
    if let Some(rating) = &hero.primary_rating {
        facts.push(Span::styled(" │ ", palette.dimmed()));
        facts.push(Span::styled(format!("★ {}", rating), palette.success()));
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled("▶ ", palette.accent()),
            Span::styled(hero.title.clone(), palette.title()),
        ]),
        Line::from(facts),
    ];
    if !hero.genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genre: ", palette.dimmed()),
            Span::styled(hero.genres.join(", "), palette.text()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hero.plot_snippet.clone(), palette.text())));
    lines
}

fn field(label: &str, value: String, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), palette.dimmed()),
        Span::styled(value, palette.text()),
    ])
}

fn joined_or_fallback(values: &[String]) -> String {
    if values.is_empty() {
        with_na_fallback(None)
    } else {
        values.join(", ")
    }
}

/// Body text for one tab
pub fn section_lines(section: &DetailSection, palette: &Palette) -> Vec<Line<'static>> {
    match &section.content {
        SectionContent::Overview(overview) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(overview.expanded_plot.clone(), palette.text())),
            ];
            if !overview.highlight_bullets.is_empty() {
                lines.push(Line::from(""));
                lines.extend(overview.highlight_bullets.iter().map(|b| {
                    Line::from(vec![
                        Span::styled("• ", palette.accent()),
                        Span::styled(b.clone(), palette.text()),
                    ])
                }));
            }
            lines
        }
        SectionContent::Info(info) => vec![
            Line::from(""),
            field("Released", with_na_fallback(info.release_date.as_deref()), palette),
            field("Runtime", with_na_fallback(info.runtime.as_deref()), palette),
            field("Cast", joined_or_fallback(&info.cast_preview), palette),
            field("Languages", joined_or_fallback(&info.languages), palette),
            field("Awards", with_na_fallback(info.awards.as_deref()), palette),
        ],
        SectionContent::Ratings(ratings) => vec![
            Line::from(""),
            field("IMDb", with_na_fallback(ratings.imdb_rating.as_deref()), palette),
            field("Metacritic", with_na_fallback(ratings.metacritic.as_deref()), palette),
            field(
                "Rotten Tomatoes",
                with_na_fallback(ratings.rotten_tomatoes.as_deref()),
                palette,
            ),
            field("Votes", with_na_fallback(ratings.user_score.as_deref()), palette),
            field("Last updated", with_na_fallback(ratings.last_updated.as_deref()), palette),
        ],
    }
}
