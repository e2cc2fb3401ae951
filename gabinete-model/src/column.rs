//! The four fixed workflow stages of the board.

use serde::{Deserialize, Serialize};

/// A workflow stage. The set is closed: the board always has exactly these
/// four columns, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Work not started yet.
    ToDo,
    /// Work in progress.
    Doing,
    /// Work waiting on something outside the team.
    Blocked,
    /// Finished work.
    Done,
}

impl Column {
    /// All columns in board order (left to right).
    pub const ALL: [Self; 4] = [Self::ToDo, Self::Doing, Self::Blocked, Self::Done];

    /// Storage name, used as the JSON key and as the `column` field value.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ToDo => "todo",
            Self::Doing => "doing",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To-Do",
            Self::Doing => "Doing",
            Self::Blocked => "Blocked",
            Self::Done => "Done",
        }
    }

    /// Position of the column on the board, `0..4`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::ToDo => 0,
            Self::Doing => 1,
            Self::Blocked => 2,
            Self::Done => 3,
        }
    }

    /// Column to the right, or `self` on the last column.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::ToDo => Self::Doing,
            Self::Doing => Self::Blocked,
            Self::Blocked | Self::Done => Self::Done,
        }
    }

    /// Column to the left, or `self` on the first column.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::ToDo | Self::Doing => Self::ToDo,
            Self::Blocked => Self::Doing,
            Self::Done => Self::Blocked,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
