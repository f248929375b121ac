//! Light and dark palettes for reelscout
//!
//! Color palette and style helpers for the TUI. The active palette follows
//! the persisted [`ThemeMode`].

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Colors for one theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    /// Slightly offset background for panels and inputs
    pub surface: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
}

impl Palette {
    // ═══════════════════════════════════════════════════════════════════════
    // PALETTES
    // ═══════════════════════════════════════════════════════════════════════

    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(0xf8, 0xfa, 0xfc),
        surface: Color::Rgb(0xe2, 0xe8, 0xf0),
        primary: Color::Rgb(0x1d, 0x4e, 0xd8),
        secondary: Color::Rgb(0x6d, 0x28, 0xd9),
        accent: Color::Rgb(0xb4, 0x53, 0x09),
        text: Color::Rgb(0x0f, 0x17, 0x2a),
        dim: Color::Rgb(0x47, 0x55, 0x69),
        success: Color::Rgb(0x15, 0x80, 0x3d),
        warning: Color::Rgb(0xa1, 0x62, 0x07),
        error: Color::Rgb(0xb9, 0x1c, 0x1c),
        border: Color::Rgb(0x94, 0xa3, 0xb8),
    };

    pub const DARK: Palette = Palette {
        background: Color::Rgb(0x0b, 0x11, 0x20),
        surface: Color::Rgb(0x1e, 0x29, 0x3b),
        primary: Color::Rgb(0x38, 0xbd, 0xf8),
        secondary: Color::Rgb(0xc0, 0x84, 0xfc),
        accent: Color::Rgb(0xfb, 0xbf, 0x24),
        text: Color::Rgb(0xe2, 0xe8, 0xf0),
        dim: Color::Rgb(0x94, 0xa3, 0xb8),
        success: Color::Rgb(0x4a, 0xde, 0x80),
        warning: Color::Rgb(0xfb, 0x92, 0x3c),
        error: Color::Rgb(0xf8, 0x71, 0x71),
        border: Color::Rgb(0x33, 0x41, 0x55),
    };

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::LIGHT,
            ThemeMode::Dark => Self::DARK,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn background(&self) -> Style {
        Style::default().bg(self.background)
    }

    /// Highlighted text (inverted with primary color)
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Matched part of a suggestion title
    pub fn matched(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn input(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Keybinding hint style
    pub fn keybind(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Loading/spinner indicator
    pub fn loading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    /// Active tab label
    pub fn tab_active(&self) -> Style {
        self.highlighted()
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.dim)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Parse "#rrggbb" into a terminal color
pub fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, from 1 (same) to 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
