//! Terminal UI rendering.

pub mod board;
pub mod layout;
pub mod notice;
pub mod status_bar;
pub mod theme;

use ratatui::Frame;

use crate::app::App;
use crate::store::Storage;

/// Main draw function for the entire UI.
pub fn draw<S: Storage>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    if !app.access().is_granted() {
        notice::render(frame, area, app.access());
        return;
    }

    let (board_area, status_area) = layout::split_screen(area);
    let board_layout = layout::BoardLayout::compute_scrolled(board_area, &app.board, app.scroll);
    board::render(frame, app, &board_layout);
    status_bar::render(frame, status_area, app);
}
