//! Board geometry.
//!
//! Drawing and mouse hit-testing both go through [`BoardLayout`] so a click
//! always lands on the card that was drawn there.

use gabinete_model::{Column, TaskBoard};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Rows taken by one card: border, title, owner/priority, border.
pub const CARD_HEIGHT: u16 = 4;

/// Splits the screen into the board area and the one-line status bar.
#[must_use]
pub fn split_screen(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Number of whole cards that fit in one column of `board_area`.
#[must_use]
pub fn card_capacity(board_area: Rect) -> usize {
    usize::from(board_area.height.saturating_sub(2) / CARD_HEIGHT)
}

/// A drawn card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    /// Index of the task in its column.
    pub index: usize,
    /// Screen area of the card, borders included.
    pub area: Rect,
}

/// A drawn column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSlot {
    /// Which column.
    pub column: Column,
    /// Bordered block area.
    pub area: Rect,
    /// Visible cards, top to bottom.
    pub cards: Vec<CardSlot>,
    /// Cards scrolled off above the first visible one.
    pub hidden_above: usize,
    /// Cards that did not fit below the last visible one.
    pub hidden_below: usize,
}

/// What sits under a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A card.
    Card {
        /// Its column.
        column: Column,
        /// Its index in the column.
        index: usize,
        /// Rows from the card's top edge to the pointer.
        offset: u16,
        /// Card height.
        height: u16,
    },
    /// Inside a column but not on a card.
    Column {
        /// The column.
        column: Column,
    },
}

/// Screen geometry of the whole board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    columns: Vec<ColumnSlot>,
}

impl BoardLayout {
    /// Geometry with per-column scroll offsets (index of the first visible
    /// card, in board column order).
    #[must_use]
    pub fn compute_scrolled(area: Rect, board: &TaskBoard, scroll: [usize; 4]) -> Self {
        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);
        let capacity = card_capacity(area);

        let columns = Column::ALL
            .into_iter()
            .zip(column_areas.iter())
            .map(|(column, &column_area)| {
                let count = board.tasks(column).len();
                let first = scroll[column.index()].min(count);
                let shown = capacity.min(count - first);
                let inner_x = column_area.x.saturating_add(1);
                let inner_width = column_area.width.saturating_sub(2);
                let mut y = column_area.y.saturating_add(1);
                let cards = (first..first + shown)
                    .map(|index| {
                        let slot = CardSlot {
                            index,
                            area: Rect::new(inner_x, y, inner_width, CARD_HEIGHT),
                        };
                        y = y.saturating_add(CARD_HEIGHT);
                        slot
                    })
                    .collect();
                ColumnSlot {
                    column,
                    area: column_area,
                    cards,
                    hidden_above: first,
                    hidden_below: count - first - shown,
                }
            })
            .collect();
        Self { columns }
    }

    /// Geometry of one column.
    #[must_use]
    pub fn column(&self, column: Column) -> Option<&ColumnSlot> {
        self.columns.iter().find(|slot| slot.column == column)
    }

    /// All columns, in board order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSlot] {
        &self.columns
    }

    /// What is drawn at `(x, y)`, `None` outside every column.
    #[must_use]
    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        let position = Position::new(x, y);
        let slot = self
            .columns
            .iter()
            .find(|slot| slot.area.contains(position))?;
        let card = slot.cards.iter().find(|card| card.area.contains(position));
        Some(card.map_or(Hit::Column { column: slot.column }, |card| Hit::Card {
            column: slot.column,
            index: card.index,
            offset: y - card.area.y,
            height: card.area.height,
        }))
    }
}
