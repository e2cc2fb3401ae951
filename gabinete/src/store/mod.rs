//! Durable, column-partitioned task storage.
//!
//! [`TaskStore`] owns the whole [`TaskBoard`] value for one storage key. It
//! reads it once per board mount, writes it back in one piece on every
//! mutation, and seeds it on first use.
//!
//! # Failure policy
//!
//! - A missing value is seeded and the seed is persisted.
//! - An unreadable or corrupted value degrades to the seed (logged, never
//!   fatal). The corrupted value is left in place until the next write.
//! - A failed write is returned to the caller, but the store's working copy
//!   already holds the new board so the session keeps working. A restart may
//!   lose those changes.

pub mod backend;

use gabinete_model::board::ConsistencyError;
use gabinete_model::codec::{self, CodecError};
use gabinete_model::TaskBoard;
use parking_lot::Mutex;

pub use backend::{FileStorage, MemoryStorage, Storage};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "gabinete.tasks";

/// Errors that can occur during task storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying storage is missing or unavailable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A write operation failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// A read operation failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// The board could not be serialized.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The board violates the column invariant and was not stored.
    #[error("refusing to store inconsistent board: {0}")]
    Inconsistent(#[from] ConsistencyError),

    /// The storage key cannot be used by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl From<CodecError> for StoreError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Serialization(msg) => Self::Encode(msg),
            CodecError::Inconsistent(inner) => Self::Inconsistent(inner),
        }
    }
}

/// The task board persisted under a single key of a [`Storage`] backend.
pub struct TaskStore<S: Storage> {
    storage: S,
    key: String,
    /// Board for the current session; `None` until first loaded.
    working: Mutex<Option<TaskBoard>>,
}

impl<S: Storage> TaskStore<S> {
    /// Create a store over `storage` using `key`.
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            working: Mutex::new(None),
        }
    }

    /// Create a store over `storage` using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn with_default_key(storage: S) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    /// Storage key of this store.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted board, seeding it when nothing is stored yet.
    ///
    /// Never fails: unreadable or corrupted values yield the seed. The result
    /// becomes the working copy.
    pub fn load(&self) -> TaskBoard {
        let board = self.read_persisted();
        *self.working.lock() = Some(board.clone());
        board
    }

    /// The working copy, loading it on first use.
    pub fn current(&self) -> TaskBoard {
        let cached = self.working.lock().clone();
        cached.unwrap_or_else(|| self.load())
    }

    /// Replace the whole board.
    ///
    /// Inconsistent boards are refused up front and change nothing.
    /// Otherwise the working copy is updated before the backend write, so it
    /// holds `board` even when this returns a write error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Inconsistent`] for boards violating the column
    /// invariant, or the backend's error if persisting failed.
    pub fn replace(&self, board: TaskBoard) -> Result<(), StoreError> {
        let text = codec::encode(&board)?;
        *self.working.lock() = Some(board);
        self.storage.write(&self.key, &text).inspect_err(|err| {
            tracing::warn!(
                key = %self.key,
                error = %err,
                "task board write failed, keeping in-memory copy"
            );
        })
    }

    fn read_persisted(&self) -> TaskBoard {
        match self.storage.read(&self.key) {
            Ok(Some(text)) => match codec::decode(&text) {
                Ok(board) => {
                    tracing::debug!(key = %self.key, tasks = board.len(), "task board loaded");
                    board
                }
                Err(err) => {
                    tracing::warn!(
                        key = %self.key,
                        error = %err,
                        "stored task board is corrupted, falling back to seed"
                    );
                    TaskBoard::seed()
                }
            },
            Ok(None) => {
                let seed = TaskBoard::seed();
                match codec::encode(&seed) {
                    Ok(text) => {
                        if let Err(err) = self.storage.write(&self.key, &text) {
                            tracing::warn!(key = %self.key, error = %err, "could not persist seed");
                        } else {
                            tracing::info!(key = %self.key, "task board seeded");
                        }
                    }
                    Err(err) => tracing::warn!(error = %err, "could not encode seed"),
                }
                seed
            }
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "task storage unavailable, falling back to seed"
                );
                TaskBoard::seed()
            }
        }
    }
}
