//! Integration tests for drag and drop across the shared store.
//!
//! Every step goes through `Board::drag`, so each live swap and transfer is
//! checked against what actually reached the backend.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use gabinete::board::{Board, CardPosition, DragEffect, DragEvent, DragState, DropTarget};
use gabinete::store::{DEFAULT_STORAGE_KEY, MemoryStorage, TaskStore};
use gabinete::ui::layout::CARD_HEIGHT;
use gabinete_model::codec;
use gabinete_model::{Column, Task, TaskBoard, TaskId};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn task(id: &str, column: Column) -> Task {
    let mut task = Task::blank(column);
    task.id = TaskId::new(id);
    task.title = id.to_uppercase();
    task
}

fn store_with(columns: &[(Column, &[&str])]) -> TaskStore<MemoryStorage> {
    let mut board = TaskBoard::new();
    for (column, ids) in columns {
        for id in *ids {
            board.push_task(task(id, *column));
        }
    }
    let storage = MemoryStorage::new();
    storage.insert_raw(DEFAULT_STORAGE_KEY, &codec::encode(&board).unwrap());
    let store = TaskStore::with_default_key(storage);
    store.load();
    store
}

fn persisted_ids(store: &TaskStore<MemoryStorage>, column: Column) -> Vec<String> {
    codec::decode(&store.storage().raw(DEFAULT_STORAGE_KEY).unwrap())
        .unwrap()
        .tasks(column)
        .iter()
        .map(|t| t.id.to_string())
        .collect()
}

fn start(id: &str) -> DragEvent {
    DragEvent::Start {
        id: TaskId::new(id),
    }
}

/// Pointer three quarters of the way down the card at `index`.
fn hover_low(column: Column, index: usize) -> DragEvent {
    DragEvent::Hover {
        target: CardPosition::new(column, index),
        offset: CARD_HEIGHT - 1,
        height: CARD_HEIGHT,
    }
}

/// Pointer on the top edge of the card at `index`.
fn hover_high(column: Column, index: usize) -> DragEvent {
    DragEvent::Hover {
        target: CardPosition::new(column, index),
        offset: 0,
        height: CARD_HEIGHT,
    }
}

fn drop_on(column: Column, index: usize) -> DragEvent {
    DragEvent::Drop {
        target: DropTarget { column, index },
    }
}

// ===========================================================================
// Intra-column reorder
// ===========================================================================

#[test]
fn reorder_follows_midpoint_crossings() {
    let store = store_with(&[(Column::ToDo, &["a", "b", "c"])]);
    let board = Board::new(&store);
    let mut drag = DragState::Idle;

    assert_eq!(board.drag(&mut drag, start("a")).unwrap(), DragEffect::PickedUp);
    board.drag(&mut drag, hover_low(Column::ToDo, 1)).unwrap();
    assert_eq!(persisted_ids(&store, Column::ToDo), vec!["b", "a", "c"]);

    board.drag(&mut drag, hover_low(Column::ToDo, 2)).unwrap();
    assert_eq!(persisted_ids(&store, Column::ToDo), vec!["b", "c", "a"]);

    assert_eq!(
        board.drag(&mut drag, drop_on(Column::ToDo, 2)).unwrap(),
        DragEffect::Dropped
    );
    assert_eq!(drag, DragState::Idle);
    assert_eq!(persisted_ids(&store, Column::ToDo), vec!["b", "c", "a"]);
}

#[test]
fn moving_back_up_reverses_the_swap() {
    let store = store_with(&[(Column::Doing, &["a", "b", "c"])]);
    let board = Board::new(&store);
    let mut drag = DragState::Idle;

    board.drag(&mut drag, start("c")).unwrap();
    // Lower half of the card above: not yet crossed.
    assert_eq!(
        board.drag(&mut drag, hover_low(Column::Doing, 1)).unwrap(),
        DragEffect::None
    );
    board.drag(&mut drag, hover_high(Column::Doing, 1)).unwrap();
    assert_eq!(persisted_ids(&store, Column::Doing), vec!["a", "c", "b"]);
    board.drag(&mut drag, hover_low(Column::Doing, 2)).unwrap();
    assert_eq!(persisted_ids(&store, Column::Doing), vec!["a", "b", "c"]);
}

#[test]
fn fast_pointer_skipping_cards_keeps_their_order() {
    let store = store_with(&[(Column::ToDo, &["a", "b", "c"])]);
    let board = Board::new(&store);
    let mut drag = DragState::Idle;

    board.drag(&mut drag, start("a")).unwrap();
    // One pointer report lands straight on the last card.
    board.drag(&mut drag, hover_low(Column::ToDo, 2)).unwrap();
    assert_eq!(persisted_ids(&store, Column::ToDo), vec!["b", "c", "a"]);

    board.drag(&mut drag, drop_on(Column::ToDo, 2)).unwrap();
    assert_eq!(persisted_ids(&store, Column::ToDo), vec!["b", "c", "a"]);
}

#[test]
fn cancel_keeps_live_swaps() {
    let store = store_with(&[(Column::ToDo, &["a", "b", "c"])]);
    let board = Board::new(&store);
    let mut drag = DragState::Idle;

    board.drag(&mut drag, start("a")).unwrap();
    board.drag(&mut drag, hover_low(Column::ToDo, 1)).unwrap();
    assert_eq!(
        board.drag(&mut drag, DragEvent::Cancel).unwrap(),
        DragEffect::Cancelled
    );
    assert_eq!(drag, DragState::Idle);
    assert_eq!(persisted_ids(&store, Column::ToDo), vec!["b", "a", "c"]);
}

// ===========================================================================
// Cross-column transfer
// ===========================================================================

#[test]
fn cross_column_transfer() {
    let store = store_with(&[(Column::ToDo, &["a", "b"]), (Column::Doing, &["c"])]);
    let board = Board::new(&store);
    let mut drag = DragState::Idle;

    board.drag(&mut drag, start("a")).unwrap();
    let effect = board.drag(&mut drag, drop_on(Column::Doing, 0)).unwrap();
    assert_eq!(
        effect,
        DragEffect::Transferred {
            from: CardPosition::new(Column::ToDo, 0),
            to: CardPosition::new(Column::Doing, 0),
        }
    );

    assert_eq!(persisted_ids(&store, Column::ToDo), vec!["b"]);
    assert_eq!(persisted_ids(&store, Column::Doing), vec!["a", "c"]);
    let moved = board.snapshot().tasks(Column::Doing)[0].clone();
    assert_eq!(moved.column, Column::Doing);
    assert_eq!(moved.title, "A");
}

#[test]
fn drop_into_empty_column() {
    let store = store_with(&[(Column::Blocked, &["x"])]);
    let board = Board::new(&store);
    let mut drag = DragState::Idle;

    board.drag(&mut drag, start("x")).unwrap();
    board.drag(&mut drag, drop_on(Column::Done, 3)).unwrap();
    assert!(persisted_ids(&store, Column::Blocked).is_empty());
    assert_eq!(persisted_ids(&store, Column::Done), vec!["x"]);
}

#[test]
fn reorder_then_transfer_then_reorder_again() {
    let store = store_with(&[(Column::ToDo, &["a", "b"]), (Column::Done, &["c", "d"])]);
    let board = Board::new(&store);
    let mut drag = DragState::Idle;

    board.drag(&mut drag, start("a")).unwrap();
    board.drag(&mut drag, hover_low(Column::ToDo, 1)).unwrap();
    board.drag(&mut drag, drop_on(Column::Done, 1)).unwrap();
    assert_eq!(persisted_ids(&store, Column::Done), vec!["c", "a", "d"]);

    // A second gesture in the destination column.
    board.drag(&mut drag, start("a")).unwrap();
    board.drag(&mut drag, hover_high(Column::Done, 0)).unwrap();
    assert_eq!(persisted_ids(&store, Column::Done), vec!["a", "c", "d"]);
    board.drag(&mut drag, drop_on(Column::Done, 0)).unwrap();
    assert!(board.snapshot().check_consistency().is_ok());
}

// ===========================================================================
// Concurrent changes
// ===========================================================================

#[test]
fn drag_abandoned_when_task_deleted_mid_gesture() {
    let store = store_with(&[(Column::ToDo, &["a", "b"]), (Column::Doing, &["c"])]);
    let board = Board::new(&store);
    let mut drag = DragState::Idle;

    board.drag(&mut drag, start("a")).unwrap();
    board
        .column(Column::ToDo)
        .delete_task(&TaskId::new("a"))
        .unwrap();
    let before = store.storage().raw(DEFAULT_STORAGE_KEY);

    assert_eq!(
        board.drag(&mut drag, drop_on(Column::Doing, 0)).unwrap(),
        DragEffect::Abandoned
    );
    assert_eq!(drag, DragState::Idle);
    assert_eq!(store.storage().raw(DEFAULT_STORAGE_KEY), before);
}

#[test]
fn drag_follows_task_shifted_by_add() {
    let store = store_with(&[(Column::ToDo, &["a", "b"]), (Column::Done, &[])]);
    let board = Board::new(&store);
    let mut drag = DragState::Idle;

    board.drag(&mut drag, start("b")).unwrap();
    // Prepending shifts "b" from index 1 to 2.
    board.column(Column::ToDo).add_empty_task().unwrap();
    board.drag(&mut drag, drop_on(Column::Done, 0)).unwrap();

    assert_eq!(persisted_ids(&store, Column::Done), vec!["b"]);
    assert_eq!(board.snapshot().tasks(Column::ToDo).len(), 2);
}

#[test]
fn events_without_gesture_change_nothing() {
    let store = store_with(&[(Column::ToDo, &["a", "b"])]);
    let board = Board::new(&store);
    let before = store.storage().raw(DEFAULT_STORAGE_KEY);
    let mut drag = DragState::Idle;

    for event in [
        hover_low(Column::ToDo, 1),
        drop_on(Column::Done, 0),
        DragEvent::Cancel,
    ] {
        assert_eq!(board.drag(&mut drag, event).unwrap(), DragEffect::None);
    }
    assert_eq!(store.storage().raw(DEFAULT_STORAGE_KEY), before);
}
