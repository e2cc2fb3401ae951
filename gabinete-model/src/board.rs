//! The column-partitioned task mapping.
//!
//! [`TaskBoard`] is the whole value the task store persists: every column
//! with its ordered tasks. It is a plain value; callers clone it, change it
//! and hand it back to the store in one piece.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::column::Column;
use crate::task::{Task, TaskId};

/// Ways a board can violate the column invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    /// A task is stored under a column other than its own `column` field.
    #[error("task {id} is stored under {stored_under} but says it belongs to {column}")]
    MisplacedTask {
        /// The offending task.
        id: TaskId,
        /// Column whose sequence holds the task.
        stored_under: Column,
        /// Column the task claims.
        column: Column,
    },
    /// A task has an empty identifier.
    #[error("task with empty id in column {0}")]
    EmptyId(Column),
}

/// Column → ordered tasks. All four columns are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBoard {
    todo: Vec<Task>,
    doing: Vec<Task>,
    blocked: Vec<Task>,
    done: Vec<Task>,
}

impl TaskBoard {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The default board written on first use: one sample task per column.
    #[must_use]
    pub fn seed() -> Self {
        let mut board = Self::new();
        for column in Column::ALL {
            board.push_task(seed_task(column));
        }
        board
    }

    /// Ordered tasks of a column.
    #[must_use]
    pub fn tasks(&self, column: Column) -> &[Task] {
        match column {
            Column::ToDo => &self.todo,
            Column::Doing => &self.doing,
            Column::Blocked => &self.blocked,
            Column::Done => &self.done,
        }
    }

    const fn tasks_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::ToDo => &mut self.todo,
            Column::Doing => &mut self.doing,
            Column::Blocked => &mut self.blocked,
            Column::Done => &mut self.done,
        }
    }

    /// Iterates columns in board order with their tasks.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &[Task])> {
        Column::ALL.into_iter().map(move |c| (c, self.tasks(c)))
    }

    /// Total number of tasks across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(|(_, tasks)| tasks.len()).sum()
    }

    /// Whether every column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the first task with `id`, scanning columns in board order.
    #[must_use]
    pub fn locate(&self, id: &TaskId) -> Option<(Column, usize)> {
        self.iter().find_map(|(column, tasks)| {
            tasks
                .iter()
                .position(|t| &t.id == id)
                .map(|index| (column, index))
        })
    }

    /// Index of the task with `id` inside one column.
    #[must_use]
    pub fn position_in(&self, column: Column, id: &TaskId) -> Option<usize> {
        self.tasks(column).iter().position(|t| &t.id == id)
    }

    /// Task with `id` inside one column.
    #[must_use]
    pub fn get(&self, column: Column, id: &TaskId) -> Option<&Task> {
        self.tasks(column).iter().find(|t| &t.id == id)
    }

    /// Appends a task to the column named by its own `column` field.
    pub fn push_task(&mut self, task: Task) {
        self.tasks_mut(task.column).push(task);
    }

    /// Replaces one column's sequence, leaving the others untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] (and leaves the board unchanged) if any
    /// task in `tasks` does not belong to `column` or has an empty id.
    pub fn replace_column(
        &mut self,
        column: Column,
        tasks: Vec<Task>,
    ) -> Result<(), ConsistencyError> {
        check_sequence(column, &tasks)?;
        *self.tasks_mut(column) = tasks;
        Ok(())
    }

    /// Moves the task at `from` to `to` inside a column, shifting the tasks
    /// in between by one. Adjacent positions simply trade places.
    ///
    /// Returns `false` (and does nothing) if either index is out of range.
    pub fn reorder(&mut self, column: Column, from: usize, to: usize) -> bool {
        let tasks = self.tasks_mut(column);
        if from >= tasks.len() || to >= tasks.len() {
            return false;
        }
        let task = tasks.remove(from);
        tasks.insert(to, task);
        true
    }

    /// Moves the task at `(from, from_index)` into column `to` at `to_index`,
    /// rewriting its `column` field.
    ///
    /// `to_index` is clamped to the destination length. Returns the index the
    /// task ended up at, or `None` if `from_index` is out of range.
    pub fn transfer(
        &mut self,
        from: Column,
        from_index: usize,
        to: Column,
        to_index: usize,
    ) -> Option<usize> {
        let source = self.tasks_mut(from);
        if from_index >= source.len() {
            return None;
        }
        let mut task = source.remove(from_index);
        task.column = to;
        let destination = self.tasks_mut(to);
        let index = to_index.min(destination.len());
        destination.insert(index, task);
        Some(index)
    }

    /// Verifies the column invariant for every task.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConsistencyError`] found, in board order.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.iter()
            .try_for_each(|(column, tasks)| check_sequence(column, tasks))
    }
}

fn check_sequence(column: Column, tasks: &[Task]) -> Result<(), ConsistencyError> {
    for task in tasks {
        if task.id.is_empty() {
            return Err(ConsistencyError::EmptyId(column));
        }
        if task.column != column {
            return Err(ConsistencyError::MisplacedTask {
                id: task.id.clone(),
                stored_under: column,
                column: task.column,
            });
        }
    }
    Ok(())
}

fn seed_task(column: Column) -> Task {
    let (title, description, color) = match column {
        Column::ToDo => (
            "Schedule neighbourhood visit",
            "Agree on a date with the community association.",
            "#fef3c7",
        ),
        Column::Doing => (
            "Answer pending demands",
            "Reply to the constituent requests opened this week.",
            "#dbeafe",
        ),
        Column::Blocked => (
            "Street lighting request",
            "Waiting for the city works department to respond.",
            "#fee2e2",
        ),
        Column::Done => (
            "Update voter registry",
            "Imported the contacts collected at the last event.",
            "#dcfce7",
        ),
    };
    Task {
        id: TaskId::new(format!("seed-{}", column.key())),
        title: title.to_string(),
        description: description.to_string(),
        column,
        color: color.to_string(),
        priority: 1,
        owner: "office".to_string(),
        responsible: "office".to_string(),
    }
}
