//! Per-column task accessor.
//!
//! `ColumnTasks` is a borrowed view of one column of the shared store. Each
//! mutation reads the full current board, replaces only its own column's
//! sequence, and writes the whole board back.

use gabinete_model::{Column, Task, TaskBoard, TaskId, TaskPatch};

use super::BoardLimits;
use crate::store::{Storage, StoreError, TaskStore};

/// Read/write access to the tasks of a single column.
pub struct ColumnTasks<'a, S: Storage> {
    store: &'a TaskStore<S>,
    column: Column,
    limits: BoardLimits,
}

impl<'a, S: Storage> ColumnTasks<'a, S> {
    /// View of `column` in `store`.
    #[must_use]
    pub const fn new(store: &'a TaskStore<S>, column: Column, limits: BoardLimits) -> Self {
        Self {
            store,
            column,
            limits,
        }
    }

    /// Column this accessor is bound to.
    #[must_use]
    pub const fn column(&self) -> Column {
        self.column
    }

    /// Ordered tasks of the column.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.store.current().tasks(self.column).to_vec()
    }

    /// Prepends a blank task to the column.
    ///
    /// Returns `Ok(None)` without writing anything when the column already
    /// holds more than the configured maximum.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the board could not be persisted. The task
    /// is still on the in-memory board in that case.
    pub fn add_empty_task(&self) -> Result<Option<Task>, StoreError> {
        let mut board = self.store.current();
        let mut tasks = board.tasks(self.column).to_vec();
        if tasks.len() > self.limits.max_tasks_per_column {
            tracing::debug!(
                column = %self.column,
                count = tasks.len(),
                "column full, add ignored"
            );
            return Ok(None);
        }

        let task = Task::blank(self.column);
        tasks.insert(0, task.clone());
        self.commit(&mut board, tasks)?;
        tracing::info!(column = %self.column, task = %task.id, "task added");
        Ok(Some(task))
    }

    /// Merges `patch` into the task with `id` in this column.
    ///
    /// Returns `Ok(false)` without writing when the task is not in this
    /// column or the patch changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the board could not be persisted.
    pub fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<bool, StoreError> {
        let mut board = self.store.current();
        let mut tasks = board.tasks(self.column).to_vec();
        let Some(task) = tasks.iter_mut().find(|t| &t.id == id) else {
            tracing::debug!(column = %self.column, task = %id, "update of unknown task ignored");
            return Ok(false);
        };
        if !task.apply(patch) {
            return Ok(false);
        }

        self.commit(&mut board, tasks)?;
        tracing::info!(column = %self.column, task = %id, "task updated");
        Ok(true)
    }

    /// Removes the task with `id` from this column.
    ///
    /// Returns `Ok(false)` without writing when it is not there.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the board could not be persisted.
    pub fn delete_task(&self, id: &TaskId) -> Result<bool, StoreError> {
        let mut board = self.store.current();
        let mut tasks = board.tasks(self.column).to_vec();
        let before = tasks.len();
        tasks.retain(|t| &t.id != id);
        if tasks.len() == before {
            tracing::debug!(column = %self.column, task = %id, "delete of unknown task ignored");
            return Ok(false);
        }

        self.commit(&mut board, tasks)?;
        tracing::info!(column = %self.column, task = %id, "task deleted");
        Ok(true)
    }

    fn commit(&self, board: &mut TaskBoard, tasks: Vec<Task>) -> Result<(), StoreError> {
        board.replace_column(self.column, tasks)?;
        self.store.replace(board.clone())
    }
}
