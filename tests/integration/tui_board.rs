//! Integration tests rendering the board into an in-memory terminal.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gabinete::app::App;
use gabinete::board::BoardLimits;
use gabinete::store::{MemoryStorage, TaskStore};
use gabinete::ui;
use gabinete_model::access::RouteAccess;
use ratatui::{Terminal, backend::TestBackend, layout::Rect};

const WIDTH: u16 = 100;
const HEIGHT: u16 = 24;

fn app(access: RouteAccess) -> App<MemoryStorage> {
    let mut app = App::new(
        TaskStore::with_default_key(MemoryStorage::new()),
        BoardLimits::default(),
        access,
    );
    app.set_viewport(Rect::new(0, 0, WIDTH, HEIGHT));
    app
}

/// Draws `app` and returns the screen as text, one line per row.
fn render(app: &App<MemoryStorage>) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect()
        })
        .collect()
}

fn press(app: &mut App<MemoryStorage>, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

#[test]
fn columns_show_labels_and_counts() {
    let screen = render(&app(RouteAccess::Granted { read_only: false }));
    for title in ["To-Do (1)", "Doing (1)", "Blocked (1)", "Done (1)"] {
        assert!(screen[0].contains(title), "missing {title:?} in {:?}", screen[0]);
    }
}

#[test]
fn cards_show_title_and_assignee() {
    let screen = render(&app(RouteAccess::Granted { read_only: false })).join("\n");
    assert!(screen.contains("Schedule neighbour"));
    assert!(screen.contains("office · P1"));
}

#[test]
fn status_bar_shows_help_for_mode() {
    let mut app = app(RouteAccess::Granted { read_only: false });
    let screen = render(&app);
    let status = &screen[usize::from(HEIGHT) - 1];
    assert!(status.contains("Gabinete"));
    assert!(status.contains("a: add"));

    press(&mut app, KeyCode::Char(' '));
    let screen = render(&app);
    assert!(screen[usize::from(HEIGHT) - 1].contains("Esc: cancel"));
}

#[test]
fn added_card_appears_on_top() {
    let mut app = app(RouteAccess::Granted { read_only: false });
    press(&mut app, KeyCode::Char('a'));
    let screen = render(&app);
    assert!(screen[0].contains("To-Do (2)"));
    assert!(screen[2].contains("New To-Do task"));
}

#[test]
fn read_only_badge_and_refusal_notice() {
    let mut app = app(RouteAccess::Granted { read_only: true });
    press(&mut app, KeyCode::Char('a'));
    let status = render(&app).pop().unwrap();
    assert!(status.contains("READ-ONLY"));
    assert!(status.contains("changes are disabled"));
}

#[test]
fn denied_access_replaces_board() {
    let screen = render(&app(RouteAccess::NoPermission)).join("\n");
    assert!(screen.contains("No permission"));
    assert!(screen.contains("Press q to quit."));
    assert!(!screen.contains("To-Do"));

    let screen = render(&app(RouteAccess::NoTenantBond)).join("\n");
    assert!(screen.contains("No office"));
}
