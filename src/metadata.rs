//! Derived-field builders for the detail view
//!
//! OMDb fills unknown fields with the `"N/A"` sentinel. Everything here
//! normalizes that away before formatting, so the view never shows it.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{
    DetailSection, HeroSummary, InfoContent, MatchSnippet, MediaAsset, Movie, OverviewContent,
    RatingsContent, SectionContent,
};

/// Sentinel OMDb uses for unknown values
pub const NA_VALUE: &str = "N/A";

/// Display text for a value that is unknown
pub const UNAVAILABLE: &str = "Unavailable";

/// Plot shown when OMDb has none
pub const FALLBACK_PLOT_TEXT: &str = "Plot synopsis unavailable.";

/// Maximum characters in the hero plot snippet
pub const HERO_PLOT_LIMIT: usize = 360;

/// A space must sit past this index to be used as a soft break
const SOFT_BREAK_FLOOR: usize = 200;

const MAX_HIGHLIGHTS: usize = 3;
const MAX_CAST: usize = 5;

/// Minimum query length (in characters) for snippets and lookups
pub const MIN_QUERY_LENGTH: usize = 2;

// =============================================================================
// Sentinel Normalization
// =============================================================================

/// Trim a raw value and drop it if empty or the `"N/A"` sentinel
pub fn sanitize(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NA_VALUE) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize a value for display, substituting [`UNAVAILABLE`] when unknown
///
/// Idempotent: feeding the output back in returns it unchanged.
pub fn with_na_fallback(value: Option<&str>) -> String {
    sanitize(value).unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Split a comma-delimited OMDb list ("Action, Drama") into trimmed items
pub fn split_list(value: Option<&str>) -> Vec<String> {
    sanitize(value)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(NA_VALUE))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// Hero Fields
// =============================================================================

fn year_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}").ok()).as_ref()
}

/// Pull the first 4-digit group out of an OMDb year ("2010–2014" → "2010")
///
/// Falls back to the raw value when no group exists, and to "Unknown" when
/// the field is absent.
pub fn extract_release_year(raw: Option<&str>) -> String {
    match sanitize(raw) {
        Some(value) => year_regex()
            .and_then(|re| re.find(&value))
            .map(|m| m.as_str().to_string())
            .unwrap_or(value),
        None => "Unknown".to_string(),
    }
}

/// Clamp a plot to [`HERO_PLOT_LIMIT`] characters without cutting a word
/// when a late enough space exists
pub fn clamp_plot(plot: Option<&str>) -> String {
    let value = sanitize(plot).unwrap_or_else(|| FALLBACK_PLOT_TEXT.to_string());
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= HERO_PLOT_LIMIT {
        return value;
    }

    let truncated = &chars[..HERO_PLOT_LIMIT];
    let cut = match truncated.iter().rposition(|c| *c == ' ') {
        Some(space) if space > SOFT_BREAK_FLOOR => space,
        _ => HERO_PLOT_LIMIT,
    };

    let kept: String = truncated[..cut].iter().collect();
    format!("{}…", kept.trim())
}

fn suffixed(raw: Option<&str>, prefix: &str, suffix: &str) -> Option<String> {
    sanitize(raw).map(|v| format!("{}{}{}", prefix, v, suffix))
}

/// Build the headline block
pub fn build_hero_summary(movie: &Movie, asset: &MediaAsset) -> HeroSummary {
    HeroSummary {
        title: movie.title.clone(),
        release_year: extract_release_year(movie.year.as_deref()),
        runtime: sanitize(movie.runtime.as_deref()),
        genres: split_list(movie.genre.as_deref()),
        plot_snippet: clamp_plot(movie.plot.as_deref()),
        primary_rating: suffixed(movie.imdb_rating.as_deref(), "IMDb ", ""),
        backdrop_url: sanitize(movie.poster.as_deref()),
        backdrop_color: asset.dominant_color.clone(),
    }
}

// =============================================================================
// Tab Sections
// =============================================================================

/// Up to three short facts, in fixed priority: awards, genre, director,
/// box office
pub fn build_highlight_bullets(movie: &Movie) -> Vec<String> {
    [
        sanitize(movie.awards.as_deref()),
        sanitize(movie.genre.as_deref()),
        suffixed(movie.director.as_deref(), "Directed by ", ""),
        suffixed(movie.box_office.as_deref(), "Box office ", ""),
    ]
    .into_iter()
    .flatten()
    .take(MAX_HIGHLIGHTS)
    .collect()
}

/// First few names from the comma-delimited actors field
pub fn build_cast_preview(actors: Option<&str>) -> Vec<String> {
    split_list(actors).into_iter().take(MAX_CAST).collect()
}

/// Find a rating whose source name contains `source` (case-insensitive)
pub fn pick_rating_value(movie: &Movie, source: &str) -> Option<String> {
    let needle = source.to_lowercase();
    movie
        .ratings
        .iter()
        .find(|r| r.source.to_lowercase().contains(&needle))
        .and_then(|r| sanitize(Some(&r.value)))
}

pub fn build_ratings_content(movie: &Movie) -> RatingsContent {
    RatingsContent {
        imdb_rating: suffixed(movie.imdb_rating.as_deref(), "", "/10"),
        metacritic: pick_rating_value(movie, "metacritic")
            .or_else(|| suffixed(movie.metascore.as_deref(), "", "/100")),
        rotten_tomatoes: pick_rating_value(movie, "rotten tomatoes"),
        user_score: suffixed(movie.imdb_votes.as_deref(), "", " votes"),
        last_updated: sanitize(movie.released.as_deref()),
    }
}

/// The three fixed tabs, ordered by priority
pub fn build_detail_sections(movie: &Movie) -> Vec<DetailSection> {
    let mut sections = vec![
        DetailSection {
            priority: 0,
            content: SectionContent::Overview(OverviewContent {
                expanded_plot: sanitize(movie.plot.as_deref())
                    .unwrap_or_else(|| FALLBACK_PLOT_TEXT.to_string()),
                highlight_bullets: build_highlight_bullets(movie),
            }),
        },
        DetailSection {
            priority: 1,
            content: SectionContent::Info(InfoContent {
                release_date: sanitize(movie.released.as_deref()),
                runtime: sanitize(movie.runtime.as_deref()),
                cast_preview: build_cast_preview(movie.actors.as_deref()),
                languages: split_list(movie.language.as_deref()),
                awards: sanitize(movie.awards.as_deref()),
            }),
        },
        DetailSection {
            priority: 2,
            content: SectionContent::Ratings(build_ratings_content(movie)),
        },
    ];
    sections.sort_by_key(|s| s.priority);
    sections
}

// =============================================================================
// Match Snippets
// =============================================================================

/// Locate `query` inside `title` ignoring case
///
/// Returns `None` when the trimmed query is shorter than
/// [`MIN_QUERY_LENGTH`] or does not occur in the title.
pub fn match_snippet(title: &str, query: &str) -> Option<MatchSnippet> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LENGTH {
        return None;
    }
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();

    let indexed: Vec<(usize, char)> = title.char_indices().collect();
    for start in 0..indexed.len() {
        let mut lowered = Vec::with_capacity(needle.len());
        let mut taken = 0;
        for (_, c) in &indexed[start..] {
            if lowered.len() >= needle.len() {
                break;
            }
            lowered.extend(c.to_lowercase());
            taken += 1;
        }

        if lowered == needle {
            let begin = indexed[start].0;
            let end = indexed
                .get(start + taken)
                .map(|(i, _)| *i)
                .unwrap_or(title.len());
            return Some(MatchSnippet {
                prefix: title[..begin].to_string(),
                matched: title[begin..end].to_string(),
                suffix: title[end..].to_string(),
            });
        }
    }
    None
}
