//! Full-screen notice shown when the access gate refuses the board.

use gabinete_model::access::RouteAccess;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme;

/// Render the denial notice for `access`. Draws nothing for a grant.
pub fn render(frame: &mut Frame, area: Rect, access: RouteAccess) {
    let (title, body) = match access {
        RouteAccess::Granted { .. } => return,
        RouteAccess::NoPermission => (
            "No permission",
            "Your role does not grant access to the task board. Ask an office administrator.",
        ),
        RouteAccess::NoTenantBond => (
            "No office",
            "Your account is not bound to any office yet. Ask to be added to one.",
        ),
    };

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(60),
        Constraint::Fill(1),
    ])
    .areas(middle);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(theme::dragging());
    let text = vec![
        Line::from(body),
        Line::default(),
        Line::styled("Press q to quit.", theme::dimmed()),
    ];
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, center);
}
