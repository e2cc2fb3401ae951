//! Property-based tests for board operations.
//!
//! Uses proptest to verify, for arbitrary sequences of add, update, delete
//! and drag events:
//! 1. Every task sits in the column named by its own `column` field.
//! 2. What the backend holds always decodes to the in-memory board.
//! 3. Drag steps never create or lose tasks.
//! 4. Adds stop once a column holds more than the cap.

#![allow(clippy::unwrap_used)]

use gabinete::board::{Board, BoardLimits, CardPosition, DragEvent, DragState, DropTarget};
use gabinete::store::{DEFAULT_STORAGE_KEY, MemoryStorage, TaskStore};
use gabinete_model::codec;
use gabinete_model::{Column, TaskId, TaskPatch};
use proptest::prelude::*;

const CAP: usize = 6;

#[derive(Debug, Clone)]
enum Op {
    Add(Column),
    Update(Column, usize, String),
    Delete(Column, usize),
    Start(Column, usize),
    Hover(Column, usize, u16),
    Drop(Column, usize),
    Cancel,
}

fn arb_column() -> impl Strategy<Value = Column> {
    prop::sample::select(Column::ALL.to_vec())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_column().prop_map(Op::Add),
        1 => (arb_column(), 0..8usize, "[a-z ]{1,12}").prop_map(|(c, i, t)| Op::Update(c, i, t)),
        1 => (arb_column(), 0..8usize).prop_map(|(c, i)| Op::Delete(c, i)),
        2 => (arb_column(), 0..8usize).prop_map(|(c, i)| Op::Start(c, i)),
        3 => (arb_column(), 0..8usize, 0..4u16).prop_map(|(c, i, o)| Op::Hover(c, i, o)),
        2 => (arb_column(), 0..10usize).prop_map(|(c, i)| Op::Drop(c, i)),
        1 => Just(Op::Cancel),
    ]
}

fn id_at(board: &Board<'_, MemoryStorage>, column: Column, index: usize) -> Option<TaskId> {
    board
        .snapshot()
        .tasks(column)
        .get(index)
        .map(|t| t.id.clone())
}

fn apply(board: &Board<'_, MemoryStorage>, drag: &mut DragState, op: Op) {
    let before = board.snapshot().len();
    match op {
        Op::Add(column) => {
            board.column(column).add_empty_task().unwrap();
        }
        Op::Update(column, index, title) => {
            if let Some(id) = id_at(board, column, index) {
                board
                    .column(column)
                    .update_task(&id, &TaskPatch::title(title))
                    .unwrap();
            }
        }
        Op::Delete(column, index) => {
            if let Some(id) = id_at(board, column, index) {
                board.column(column).delete_task(&id).unwrap();
            }
        }
        Op::Start(column, index) => {
            if let Some(id) = id_at(board, column, index) {
                board.drag(drag, DragEvent::Start { id }).unwrap();
            }
        }
        Op::Hover(column, index, offset) => {
            board
                .drag(
                    drag,
                    DragEvent::Hover {
                        target: CardPosition::new(column, index),
                        offset,
                        height: 4,
                    },
                )
                .unwrap();
            assert_eq!(board.snapshot().len(), before);
        }
        Op::Drop(column, index) => {
            board
                .drag(
                    drag,
                    DragEvent::Drop {
                        target: DropTarget { column, index },
                    },
                )
                .unwrap();
            assert_eq!(board.snapshot().len(), before);
        }
        Op::Cancel => {
            board.drag(drag, DragEvent::Cancel).unwrap();
        }
    }
}

proptest! {
    #[test]
    fn operations_preserve_board_invariants(ops in prop::collection::vec(arb_op(), 1..80)) {
        let store = TaskStore::with_default_key(MemoryStorage::new());
        let board = Board::with_limits(&store, BoardLimits { max_tasks_per_column: CAP });
        board.mount();
        let mut drag = DragState::Idle;

        for op in ops {
            apply(&board, &mut drag, op);

            let snapshot = board.snapshot();
            prop_assert!(snapshot.check_consistency().is_ok());
            for (column, tasks) in snapshot.iter() {
                prop_assert!(tasks.iter().all(|t| t.column == column));
            }

            let raw = store.storage().raw(DEFAULT_STORAGE_KEY).unwrap();
            prop_assert_eq!(codec::decode(&raw).unwrap(), snapshot);
        }
    }

    #[test]
    fn adds_stop_at_cap(column in arb_column(), attempts in 1..20usize) {
        let store = TaskStore::with_default_key(MemoryStorage::new());
        let board = Board::with_limits(&store, BoardLimits { max_tasks_per_column: CAP });
        board.mount();

        for _ in 0..attempts {
            board.column(column).add_empty_task().unwrap();
        }
        let count = board.snapshot().tasks(column).len();
        // One seeded task plus the adds, stopping once the column exceeds CAP.
        prop_assert_eq!(count, (1 + attempts).min(CAP + 1));
    }
}
