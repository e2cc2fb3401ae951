//! The kanban board: four column accessors and the drag coordinator over one
//! shared task store.

pub mod column;
pub mod drag;

pub use column::ColumnTasks;
pub use drag::{CardPosition, DragEffect, DragEvent, DragGesture, DragState, DropTarget};

use gabinete_model::{Column, TaskBoard};

use crate::store::{Storage, StoreError, TaskStore};

/// Default cap checked before adding a task to a column.
pub const DEFAULT_MAX_TASKS_PER_COLUMN: usize = 100;

/// Limits applied by the column accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLimits {
    /// Adding is refused once a column holds more than this many tasks.
    pub max_tasks_per_column: usize,
}

impl Default for BoardLimits {
    fn default() -> Self {
        Self {
            max_tasks_per_column: DEFAULT_MAX_TASKS_PER_COLUMN,
        }
    }
}

/// The four columns of one store, plus drag handling across them.
pub struct Board<'a, S: Storage> {
    store: &'a TaskStore<S>,
    limits: BoardLimits,
}

impl<'a, S: Storage> Board<'a, S> {
    /// Board over `store` with default limits.
    #[must_use]
    pub fn new(store: &'a TaskStore<S>) -> Self {
        Self::with_limits(store, BoardLimits::default())
    }

    /// Board over `store` with explicit limits.
    #[must_use]
    pub const fn with_limits(store: &'a TaskStore<S>, limits: BoardLimits) -> Self {
        Self { store, limits }
    }

    /// Re-reads the persisted board, as happens when the screen is mounted.
    pub fn mount(&self) -> TaskBoard {
        self.store.load()
    }

    /// Accessor for one column.
    #[must_use]
    pub const fn column(&self, column: Column) -> ColumnTasks<'a, S> {
        ColumnTasks::new(self.store, column, self.limits)
    }

    /// Accessors for all columns, in board order.
    #[must_use]
    pub fn columns(&self) -> [ColumnTasks<'a, S>; 4] {
        Column::ALL.map(|c| self.column(c))
    }

    /// Current board.
    #[must_use]
    pub fn snapshot(&self) -> TaskBoard {
        self.store.current()
    }

    /// Feeds one event to the drag coordinator and persists the result.
    ///
    /// `state` is advanced before persisting, so it is up to date even when
    /// this returns an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the changed board could not be persisted.
    pub fn drag(&self, state: &mut DragState, event: DragEvent) -> Result<DragEffect, StoreError> {
        let board = self.store.current();
        let step = drag::step(&board, state, event);
        *state = step.drag;
        match step.effect {
            DragEffect::None | DragEffect::PickedUp => {}
            effect => tracing::debug!(?effect, "drag step"),
        }
        if let Some(next) = step.board {
            self.store.replace(next)?;
        }
        Ok(step.effect)
    }
}
