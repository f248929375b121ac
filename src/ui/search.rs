//! Search box and suggestion dropdown

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::{InputMode, QueryInput};
use crate::models::SuggestionItem;
use crate::search::SuggestionsView;
use crate::ui::theme::Palette;

/// Render the query editor
pub fn render_search_box(
    frame: &mut Frame,
    area: Rect,
    input: &QueryInput,
    mode: &InputMode,
    palette: &Palette,
) {
    let editing = *mode == InputMode::Editing;
    let border_style = if editing {
        palette.border_focused()
    } else {
        palette.border()
    };

    let text = if editing {
        let (before, after) = input.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if input.query.is_empty() {
        "⌕ Type / to search movies...".to_string()
    } else {
        format!("⌕ {}", input.query)
    };

    let search_box = Paragraph::new(text)
        .style(if editing {
            palette.input().fg(palette.primary)
        } else {
            palette.input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(Span::styled(" SEARCH ", palette.title())),
        );
    frame.render_widget(search_box, area);
}

/// Rows needed to show the dropdown (borders included), zero when hidden
pub fn dropdown_height(view: &SuggestionsView) -> u16 {
    if !view.items.is_empty() {
        view.items.len() as u16 + 2
    } else if view.loading || view.message.is_some() {
        3
    } else {
        0
    }
}

/// Title with the matched span emphasised
fn title_spans(item: &SuggestionItem, focused: bool, palette: &Palette) -> Vec<Span<'static>> {
    let base = if focused {
        palette.highlighted()
    } else {
        palette.text()
    };

    match &item.snippet {
        Some(snippet) => vec![
            Span::styled(snippet.prefix.clone(), base),
            Span::styled(snippet.matched.clone(), base.patch(palette.matched())),
            Span::styled(snippet.suffix.clone(), base),
        ],
        None => vec![Span::styled(item.suggestion.title.clone(), base)],
    }
}

/// One dropdown row: `▸ [TB] The Batman (2022) movie`
pub fn suggestion_line(item: &SuggestionItem, focused: bool, palette: &Palette) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let mut spans = vec![
        Span::styled(
            marker,
            if focused {
                palette.accent()
            } else {
                palette.dimmed()
            },
        ),
        Span::styled(format!("[{}] ", item.initials()), palette.secondary()),
    ];
    spans.extend(title_spans(item, focused, palette));
    spans.push(Span::styled(
        format!(" ({})", item.suggestion.year),
        palette.year(),
    ));
    spans.push(Span::styled(
        format!(" {}", item.suggestion.media_type),
        palette.dimmed(),
    ));
    Line::from(spans)
}

/// Render the dropdown as an overlay anchored under the search box
pub fn render_suggestions(frame: &mut Frame, anchor: Rect, view: &SuggestionsView, palette: &Palette) {
    let height = dropdown_height(view);
    if height == 0 {
        return;
    }

    let screen = frame.area();
    let top = anchor.y + anchor.height;
    let area = Rect {
        x: anchor.x,
        y: top,
        width: anchor.width,
        height: height.min(screen.height.saturating_sub(top)),
    };
    if area.height == 0 {
        return;
    }

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_focused())
        .style(palette.background());

    if view.items.is_empty() {
        let (text, style) = match &view.message {
            Some(message) => (message.clone(), palette.warning()),
            None => ("⟳ Searching...".to_string(), palette.loading()),
        };
        let paragraph = Paragraph::new(text).style(style).block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = view
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| ListItem::new(suggestion_line(item, view.focused == Some(i), palette)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
