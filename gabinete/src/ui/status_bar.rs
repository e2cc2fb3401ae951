//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Mode, NoticeLevel};
use crate::store::Storage;

/// Render the status bar at the bottom of the screen.
pub fn render<S: Storage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let help_text = match app.mode {
        Mode::Browse if app.is_read_only() => "←→/hl: column | ↑↓/jk: card | q: quit",
        Mode::Browse => {
            "←→: column | ↑↓: card | a: add | d: delete | e: edit | space: move | q: quit"
        }
        Mode::EditTitle { .. } => "Enter: save | Esc: discard | ←→: move cursor",
        Mode::Carry => "↑↓: reorder | ←→: target column | Enter: drop | Esc: cancel",
    };

    let mut spans = vec![Span::styled("Gabinete", theme::bold()), Span::raw(" | ")];
    if app.is_read_only() {
        spans.push(Span::styled(" READ-ONLY ", theme::read_only_badge()));
        spans.push(Span::raw(" | "));
    }
    if let Some(notice) = &app.notice {
        let color = match notice.level {
            NoticeLevel::Info => theme::SUCCESS,
            NoticeLevel::Warning => theme::WARNING,
            NoticeLevel::Error => theme::ERROR,
        };
        spans.push(Span::styled("●", theme::normal().fg(color)));
        spans.push(Span::raw(format!(" {} | ", notice.text)));
    }
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
