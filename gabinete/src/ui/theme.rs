//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Color marking the card being dragged and the drop target column.
pub const DRAG: Color = Color::LightMagenta;

/// Success indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning indicator color.
pub const WARNING: Color = Color::Yellow;

/// Error indicator color.
pub const ERROR: Color = Color::Red;

/// Card background used when a task color cannot be parsed.
pub const CARD_FALLBACK: Color = Color::Rgb(0xe2, 0xe8, 0xf0);

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style.
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused column borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Border style of the drop target column and the dragged card.
#[must_use]
pub fn dragging() -> Style {
    Style::default().fg(DRAG).add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for the read-only badge in the status bar.
#[must_use]
pub fn read_only_badge() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(WARNING)
        .add_modifier(Modifier::BOLD)
}

/// Parses a `#rrggbb` or `#rgb` card color.
#[must_use]
pub fn parse_hex(color: &str) -> Option<Color> {
    let hex = color.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some(Color::Rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

/// Card body style: the task color as background with a readable foreground.
#[must_use]
pub fn card(color: &str) -> Style {
    let background = parse_hex(color).unwrap_or(CARD_FALLBACK);
    Style::default().bg(background).fg(contrast(background))
}

/// Card title style: the card style in bold.
#[must_use]
pub fn card_title(color: &str) -> Style {
    card(color).add_modifier(Modifier::BOLD)
}

/// Black on light backgrounds, white on dark ones.
fn contrast(background: Color) -> Color {
    match background {
        Color::Rgb(r, g, b) => {
            let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
            if luma >= 128_000 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => Color::Black,
    }
}
