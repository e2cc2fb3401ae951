//! `Gabinete` — terminal kanban board for a legislative office.

pub mod app;
pub mod board;
pub mod config;
pub mod store;
pub mod ui;
