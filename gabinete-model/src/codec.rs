//! JSON encoding of the persisted board.
//!
//! The stored value is a single JSON object keyed by column storage name
//! (`todo`, `doing`, `blocked`, `done`), each holding an array of task
//! records. Decoding enforces the column invariant so that a board read back
//! from storage is always consistent.

use crate::board::{ConsistencyError, TaskBoard};

/// Error type for board encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The payload parsed but violates the column invariant.
    #[error("inconsistent board: {0}")]
    Inconsistent(#[from] ConsistencyError),
}

/// Encodes a board as compact JSON.
///
/// # Errors
///
/// Returns `CodecError::Inconsistent` if the board violates the column
/// invariant, or `CodecError::Serialization` if serde fails.
pub fn encode(board: &TaskBoard) -> Result<String, CodecError> {
    board.check_consistency()?;
    serde_json::to_string(board).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a board from JSON.
///
/// # Errors
///
/// Returns `CodecError::Serialization` for malformed JSON, unknown column
/// names, or missing columns, and `CodecError::Inconsistent` when a task's
/// `column` disagrees with the key it is stored under.
pub fn decode(text: &str) -> Result<TaskBoard, CodecError> {
    let board: TaskBoard =
        serde_json::from_str(text).map_err(|e| CodecError::Serialization(e.to_string()))?;
    board.check_consistency()?;
    Ok(board)
}
