use crate::action::ActionKind;
use crate::state::Phase;
use crate::types::{DraggableId, DroppableId};

/// A contract violation: an action the current phase does not accept.
///
/// These point at an integration bug. The state passed to `transition` is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("{action} is not valid while {phase}")]
    InvalidPhase { action: ActionKind, phase: Phase },
    #[error("a drop is already pending and waiting for collection to finish")]
    DropAlreadyPending,
    #[error("draggable {0} is not in the dimension map")]
    MissingDraggable(DraggableId),
    #[error("droppable {0} is not in the dimension map")]
    MissingDroppable(DroppableId),
    #[error("initial publish is for {found}, but {expected} was lifted")]
    CriticalMismatch {
        expected: DraggableId,
        found: DraggableId,
    },
}
