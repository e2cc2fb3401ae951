//! Drag gesture state machine.
//!
//! [`step`] is a pure function of the current board and drag state plus one
//! [`DragEvent`]; it returns the next board (when it changed), the next drag
//! state, and what happened. Keyboard carrying, mouse dragging and tests all
//! drive the same function.
//!
//! Live swaps are committed as they happen: every midpoint crossing yields a
//! new board that the caller persists immediately. Cancelling only stops
//! further swaps; it never rolls earlier ones back.

use gabinete_model::{Column, TaskBoard, TaskId};

/// A card slot on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPosition {
    /// Column holding the card.
    pub column: Column,
    /// Index inside the column.
    pub index: usize,
}

impl CardPosition {
    /// Shorthand constructor.
    #[must_use]
    pub const fn new(column: Column, index: usize) -> Self {
        Self { column, index }
    }
}

/// An in-flight drag. Holds a reference to the task, never the task itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    /// Dragged task.
    pub id: TaskId,
    /// Where the gesture started.
    pub origin: CardPosition,
    /// Where the task is now, after any live swaps.
    pub current: CardPosition,
}

/// Drag state carried between events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A card is being dragged.
    Dragging(DragGesture),
}

impl DragState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// The in-flight gesture, if any.
    #[must_use]
    pub const fn gesture(&self) -> Option<&DragGesture> {
        match self {
            Self::Idle => None,
            Self::Dragging(gesture) => Some(gesture),
        }
    }
}

/// Where a card is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Destination column.
    pub column: Column,
    /// Insertion index, clamped to the destination length.
    pub index: usize,
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    /// Pick up the card with `id`.
    Start {
        /// Task to drag.
        id: TaskId,
    },
    /// The pointer is `offset` rows into the card at `target`, which is
    /// `height` rows tall.
    Hover {
        /// Card under the pointer.
        target: CardPosition,
        /// Pointer offset from the card's top edge.
        offset: u16,
        /// Card height.
        height: u16,
    },
    /// Release over a card or a column.
    Drop {
        /// Where the card lands.
        target: DropTarget,
    },
    /// Release outside any drop target, or an explicit abort.
    Cancel,
}

/// What a step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEffect {
    /// Nothing changed.
    None,
    /// A gesture started.
    PickedUp,
    /// Live swap inside a column.
    Swapped {
        /// Column where the swap happened.
        column: Column,
        /// Previous index of the dragged task.
        from: usize,
        /// New index of the dragged task.
        to: usize,
    },
    /// The task moved to another column.
    Transferred {
        /// Position it left.
        from: CardPosition,
        /// Position it landed at.
        to: CardPosition,
    },
    /// Released in its own column; the gesture ended with no further change.
    Dropped,
    /// The gesture was cancelled.
    Cancelled,
    /// The dragged task disappeared; the gesture ended without mutation.
    Abandoned,
}

/// Result of [`step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStep {
    /// New board, `Some` only when it differs from the input board.
    pub board: Option<TaskBoard>,
    /// Next drag state.
    pub drag: DragState,
    /// What happened.
    pub effect: DragEffect,
}

impl DragStep {
    const fn unchanged(drag: DragState) -> Self {
        Self {
            board: None,
            drag,
            effect: DragEffect::None,
        }
    }

    const fn ended(effect: DragEffect) -> Self {
        Self {
            board: None,
            drag: DragState::Idle,
            effect,
        }
    }
}

/// Advance the drag state machine by one event.
#[must_use]
pub fn step(board: &TaskBoard, drag: &DragState, event: DragEvent) -> DragStep {
    match (drag, event) {
        (DragState::Idle, DragEvent::Start { id }) => start(board, id),
        (DragState::Idle, _) => DragStep::unchanged(DragState::Idle),
        (DragState::Dragging(_), DragEvent::Start { .. }) => DragStep::unchanged(drag.clone()),
        (
            DragState::Dragging(gesture),
            DragEvent::Hover {
                target,
                offset,
                height,
            },
        ) => hover(board, gesture, target, offset, height),
        (DragState::Dragging(gesture), DragEvent::Drop { target }) => drop_at(board, gesture, target),
        (DragState::Dragging(_), DragEvent::Cancel) => DragStep::ended(DragEffect::Cancelled),
    }
}

fn start(board: &TaskBoard, id: TaskId) -> DragStep {
    let Some((column, index)) = board.locate(&id) else {
        tracing::debug!(task = %id, "drag start on unknown task ignored");
        return DragStep::ended(DragEffect::Abandoned);
    };
    let position = CardPosition::new(column, index);
    DragStep {
        board: None,
        drag: DragState::Dragging(DragGesture {
            id,
            origin: position,
            current: position,
        }),
        effect: DragEffect::PickedUp,
    }
}

/// Current index of the dragged task, re-checked against the board.
fn locate_dragged(board: &TaskBoard, gesture: &DragGesture) -> Option<usize> {
    let column = gesture.current.column;
    let at_recorded = board
        .tasks(column)
        .get(gesture.current.index)
        .is_some_and(|t| t.id == gesture.id);
    if at_recorded {
        Some(gesture.current.index)
    } else {
        board.position_in(column, &gesture.id)
    }
}

fn abandon(gesture: &DragGesture) -> DragStep {
    tracing::debug!(task = %gesture.id, "dragged task vanished, gesture abandoned");
    DragStep::ended(DragEffect::Abandoned)
}

fn hover(
    board: &TaskBoard,
    gesture: &DragGesture,
    target: CardPosition,
    offset: u16,
    height: u16,
) -> DragStep {
    let Some(from) = locate_dragged(board, gesture) else {
        return abandon(gesture);
    };
    let column = gesture.current.column;
    let mut next_gesture = gesture.clone();
    next_gesture.current.index = from;

    let sibling_exists = target.index < board.tasks(column).len();
    if target.column != column || target.index == from || !sibling_exists {
        return DragStep::unchanged(DragState::Dragging(next_gesture));
    }

    // Downward moves once the pointer reaches the hovered card's midpoint,
    // upward once it is back at or above it. Cards skipped in between count
    // as crossed.
    let twice_offset = u32::from(offset) * 2;
    let crossed = if target.index > from {
        twice_offset >= u32::from(height)
    } else {
        twice_offset <= u32::from(height)
    };
    if !crossed {
        return DragStep::unchanged(DragState::Dragging(next_gesture));
    }

    let mut next = board.clone();
    next.reorder(column, from, target.index);
    next_gesture.current.index = target.index;
    DragStep {
        board: Some(next),
        drag: DragState::Dragging(next_gesture),
        effect: DragEffect::Swapped {
            column,
            from,
            to: target.index,
        },
    }
}

fn drop_at(board: &TaskBoard, gesture: &DragGesture, target: DropTarget) -> DragStep {
    let Some(from) = locate_dragged(board, gesture) else {
        return abandon(gesture);
    };
    let column = gesture.current.column;
    if target.column == column {
        return DragStep::ended(DragEffect::Dropped);
    }

    let mut next = board.clone();
    let Some(index) = next.transfer(column, from, target.column, target.index) else {
        return abandon(gesture);
    };
    DragStep {
        board: Some(next),
        drag: DragState::Idle,
        effect: DragEffect::Transferred {
            from: CardPosition::new(column, from),
            to: CardPosition::new(target.column, index),
        },
    }
}
