//! Application state and event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use gabinete_model::access::RouteAccess;
use gabinete_model::{Column, Task, TaskBoard, TaskId, TaskPatch};
use ratatui::layout::Rect;

use crate::board::{Board, BoardLimits, CardPosition, DragEffect, DragEvent, DragState, DropTarget};
use crate::store::{Storage, StoreError, TaskStore};
use crate::ui::layout::{self, BoardLayout, CARD_HEIGHT, Hit};

/// What the keyboard currently drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Moving the selection around the board.
    Browse,
    /// Editing the title of a card.
    EditTitle {
        /// Column holding the card.
        column: Column,
        /// Card being edited.
        id: TaskId,
        /// Title being typed.
        buffer: String,
        /// Cursor position in `buffer` (character index).
        cursor: usize,
    },
    /// A card is picked up (keyboard or mouse).
    Carry,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational.
    Info,
    /// Something was refused.
    Warning,
    /// A change could not be saved.
    Error,
}

/// One-line message shown in the status bar until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message.
    pub text: String,
}

/// Main application state.
pub struct App<S: Storage> {
    store: TaskStore<S>,
    limits: BoardLimits,
    access: RouteAccess,
    /// Board as last read from the store.
    pub board: TaskBoard,
    /// Focused column.
    pub column: Column,
    /// Selected card index per column.
    pub rows: [usize; 4],
    /// First visible card index per column.
    pub scroll: [usize; 4],
    /// Keyboard mode.
    pub mode: Mode,
    /// In-flight drag gesture.
    pub drag: DragState,
    /// Column a carried card will be dropped into.
    pub carry_target: Column,
    /// Latest notice.
    pub notice: Option<Notice>,
    /// Terminal area the board was last laid out in.
    pub viewport: Rect,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<S: Storage> App<S> {
    /// Create the app over `store`.
    ///
    /// The board is only read when `access` grants the screen.
    #[must_use]
    pub fn new(store: TaskStore<S>, limits: BoardLimits, access: RouteAccess) -> Self {
        let board = if access.is_granted() {
            Board::with_limits(&store, limits).mount()
        } else {
            tracing::info!(?access, "task board access denied");
            TaskBoard::new()
        };
        Self {
            store,
            limits,
            access,
            board,
            column: Column::ToDo,
            rows: [0; 4],
            scroll: [0; 4],
            mode: Mode::Browse,
            drag: DragState::Idle,
            carry_target: Column::ToDo,
            notice: None,
            viewport: Rect::default(),
            should_quit: false,
        }
    }

    /// The task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    /// Outcome of the access gate.
    #[must_use]
    pub const fn access(&self) -> RouteAccess {
        self.access
    }

    /// Whether mutations are refused.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self.access, RouteAccess::Granted { read_only: true })
    }

    /// Selected card index in the focused column.
    #[must_use]
    pub const fn selected_row(&self) -> usize {
        self.rows[self.column.index()]
    }

    /// Selected task, if the focused column has any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.board.tasks(self.column).get(self.selected_row())
    }

    /// Record the terminal size and keep the selection on screen.
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
        self.keep_selection_visible();
    }

    /// Geometry of the board for the current viewport and scroll offsets.
    #[must_use]
    pub fn layout(&self) -> BoardLayout {
        let (board_area, _) = layout::split_screen(self.viewport);
        BoardLayout::compute_scrolled(board_area, &self.board, self.scroll)
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.notice = None;

        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.quit();
            return;
        }

        if !self.access.is_granted() {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.quit();
            }
            return;
        }

        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::EditTitle { .. } => self.handle_edit_key(key),
            Mode::Carry => self.handle_carry_key(key),
        }
    }

    /// Handle a mouse event: press picks a card up, drag hovers, release
    /// drops.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if !self.access.is_granted() || matches!(self.mode, Mode::EditTitle { .. }) {
            return;
        }
        let hit = self.layout().hit(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.notice = None;
                if let Some(Hit::Card { column, index, .. }) = hit {
                    self.select(column, index);
                    self.pick_up();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.drag.is_dragging() => match hit {
                Some(Hit::Card {
                    column,
                    index,
                    offset,
                    height,
                }) => {
                    self.carry_target = column;
                    self.apply_drag(DragEvent::Hover {
                        target: CardPosition::new(column, index),
                        offset,
                        height,
                    });
                }
                Some(Hit::Column { column }) => self.carry_target = column,
                None => {}
            },
            MouseEventKind::Up(MouseButton::Left) if self.drag.is_dragging() => {
                let event = match hit {
                    Some(Hit::Card { column, index, .. }) => DragEvent::Drop {
                        target: DropTarget { column, index },
                    },
                    Some(Hit::Column { column }) => DragEvent::Drop {
                        target: DropTarget {
                            column,
                            index: self.board.tasks(column).len(),
                        },
                    },
                    None => DragEvent::Cancel,
                };
                self.apply_drag(event);
            }
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Left | KeyCode::Char('h') => self.focus_column(self.column.prev()),
            KeyCode::Right | KeyCode::Char('l') => self.focus_column(self.column.next()),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Char('a') => self.add_task(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('e') | KeyCode::Enter => self.begin_edit(),
            KeyCode::Char(' ' | 'm') => self.pick_up(),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Mode::EditTitle { buffer, cursor, .. } = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Char(c) => {
                let at = byte_index(buffer, *cursor);
                buffer.insert(at, c);
                *cursor += 1;
            }
            KeyCode::Backspace if *cursor > 0 => {
                *cursor -= 1;
                let at = byte_index(buffer, *cursor);
                buffer.remove(at);
            }
            KeyCode::Delete if *cursor < buffer.chars().count() => {
                let at = byte_index(buffer, *cursor);
                buffer.remove(at);
            }
            KeyCode::Left => *cursor = cursor.saturating_sub(1),
            KeyCode::Right => *cursor = (*cursor + 1).min(buffer.chars().count()),
            KeyCode::Home => *cursor = 0,
            KeyCode::End => *cursor = buffer.chars().count(),
            _ => {}
        }
    }

    fn handle_carry_key(&mut self, key: KeyEvent) {
        let Some(current) = self.drag.gesture().map(|g| g.current) else {
            self.mode = Mode::Browse;
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') if current.index > 0 => {
                self.apply_drag(DragEvent::Hover {
                    target: CardPosition::new(current.column, current.index - 1),
                    offset: 0,
                    height: CARD_HEIGHT,
                });
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.apply_drag(DragEvent::Hover {
                    target: CardPosition::new(current.column, current.index + 1),
                    offset: CARD_HEIGHT - 1,
                    height: CARD_HEIGHT,
                });
            }
            KeyCode::Left | KeyCode::Char('h') => self.carry_target = self.carry_target.prev(),
            KeyCode::Right | KeyCode::Char('l') => self.carry_target = self.carry_target.next(),
            KeyCode::Enter | KeyCode::Char(' ' | 'm') => {
                self.apply_drag(DragEvent::Drop {
                    target: DropTarget {
                        column: self.carry_target,
                        index: current.index,
                    },
                });
            }
            KeyCode::Esc => self.apply_drag(DragEvent::Cancel),
            _ => {}
        }
    }

    const fn quit(&mut self) {
        self.should_quit = true;
    }

    fn focus_column(&mut self, column: Column) {
        self.column = column;
        self.clamp_rows();
        self.keep_selection_visible();
    }

    fn select(&mut self, column: Column, index: usize) {
        self.column = column;
        self.rows[column.index()] = index;
        self.clamp_rows();
        self.keep_selection_visible();
    }

    fn move_selection_up(&mut self) {
        let row = &mut self.rows[self.column.index()];
        *row = row.saturating_sub(1);
        self.keep_selection_visible();
    }

    fn move_selection_down(&mut self) {
        let last = self.board.tasks(self.column).len().saturating_sub(1);
        let row = &mut self.rows[self.column.index()];
        *row = (*row + 1).min(last);
        self.keep_selection_visible();
    }

    /// Refuses the action with a notice when the session is read-only.
    fn ensure_editable(&mut self) -> bool {
        if self.is_read_only() {
            self.set_notice(NoticeLevel::Warning, "Read-only access: changes are disabled");
            false
        } else {
            true
        }
    }

    fn add_task(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        let column = self.column;
        let result = Board::with_limits(&self.store, self.limits)
            .column(column)
            .add_empty_task();
        match result {
            Ok(Some(_)) => self.rows[column.index()] = 0,
            Ok(None) => self.set_notice(
                NoticeLevel::Warning,
                format!("{column} is full, finish some tasks first"),
            ),
            Err(err) => {
                self.rows[column.index()] = 0;
                self.report_store_error(&err);
            }
        }
        self.refresh();
    }

    fn delete_selected(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        let Some(id) = self.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        let result = Board::with_limits(&self.store, self.limits)
            .column(self.column)
            .delete_task(&id);
        if let Err(err) = result {
            self.report_store_error(&err);
        }
        self.refresh();
    }

    fn begin_edit(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        let Some(task) = self.selected_task() else {
            return;
        };
        self.mode = Mode::EditTitle {
            column: self.column,
            id: task.id.clone(),
            cursor: task.title.chars().count(),
            buffer: task.title.clone(),
        };
    }

    fn commit_edit(&mut self) {
        let Mode::EditTitle {
            column, id, buffer, ..
        } = std::mem::replace(&mut self.mode, Mode::Browse)
        else {
            return;
        };
        let title = buffer.trim();
        if title.is_empty() {
            self.set_notice(NoticeLevel::Warning, "Task title cannot be empty");
            return;
        }
        let result = Board::with_limits(&self.store, self.limits)
            .column(column)
            .update_task(&id, &TaskPatch::title(title));
        match result {
            Ok(true) => {}
            Ok(false) if self.store.current().get(column, &id).is_none() => {
                self.set_notice(NoticeLevel::Warning, "Task no longer exists");
            }
            Ok(false) => {}
            Err(err) => self.report_store_error(&err),
        }
        self.refresh();
    }

    fn pick_up(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        let Some(id) = self.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        self.carry_target = self.column;
        self.apply_drag(DragEvent::Start { id });
    }

    /// Feeds one event to the drag coordinator and follows the dragged card.
    fn apply_drag(&mut self, event: DragEvent) {
        let result = Board::with_limits(&self.store, self.limits).drag(&mut self.drag, event);
        match result {
            Ok(effect) => self.follow_drag(effect),
            Err(err) => self.report_store_error(&err),
        }

        self.mode = if self.drag.is_dragging() {
            Mode::Carry
        } else {
            Mode::Browse
        };
        if let Some(current) = self.drag.gesture().map(|g| g.current) {
            self.column = current.column;
            self.rows[current.column.index()] = current.index;
        }
        self.refresh();
    }

    fn follow_drag(&mut self, effect: DragEffect) {
        match effect {
            DragEffect::Transferred { to, .. } => {
                self.column = to.column;
                self.rows[to.column.index()] = to.index;
                self.set_notice(NoticeLevel::Info, format!("Moved to {}", to.column));
            }
            DragEffect::Abandoned => {
                self.set_notice(NoticeLevel::Warning, "Task no longer exists");
            }
            DragEffect::None
            | DragEffect::PickedUp
            | DragEffect::Swapped { .. }
            | DragEffect::Dropped
            | DragEffect::Cancelled => {}
        }
    }

    fn report_store_error(&mut self, err: &StoreError) {
        tracing::error!(error = %err, "task board change not saved");
        self.set_notice(
            NoticeLevel::Error,
            format!("Not saved, kept for this session only: {err}"),
        );
    }

    fn set_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            text: text.into(),
        });
    }

    /// Re-reads the board from the store and fixes up the selection.
    fn refresh(&mut self) {
        self.board = self.store.current();
        self.clamp_rows();
        self.keep_selection_visible();
    }

    fn clamp_rows(&mut self) {
        for column in Column::ALL {
            let last = self.board.tasks(column).len().saturating_sub(1);
            let row = &mut self.rows[column.index()];
            *row = (*row).min(last);
        }
    }

    fn keep_selection_visible(&mut self) {
        let (board_area, _) = layout::split_screen(self.viewport);
        let capacity = layout::card_capacity(board_area);
        if capacity == 0 {
            return;
        }
        for column in Column::ALL {
            let i = column.index();
            let row = self.rows[i];
            if row < self.scroll[i] {
                self.scroll[i] = row;
            } else if row >= self.scroll[i] + capacity {
                self.scroll[i] = row + 1 - capacity;
            }
        }
    }
}

/// Byte offset of the `chars`-th character of `s`.
fn byte_index(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}
