//! Shared data model for the `Gabinete` task board.
//!
//! Everything here is plain data: no I/O, no clocks, no terminal. The
//! `gabinete` crate layers storage, drag handling and rendering on top.

pub mod access;
pub mod board;
pub mod codec;
pub mod column;
pub mod task;

pub use board::TaskBoard;
pub use column::Column;
pub use task::{Task, TaskId, TaskPatch};
