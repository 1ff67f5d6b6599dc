//! Edge scrolling while dragging.
//!
//! Pointer drags use [`FluidScroller`]: a per-frame speed that ramps up towards an edge.
//! Keyboard drags use [`jump_scroll`]: one discrete scroll per move that lands off screen.

mod can_scroll;
mod fluid;
mod jump;
mod speed;

use kurbo::Vec2;

use crate::types::DroppableId;

pub use can_scroll::{
    can_partially_scroll, can_scroll_droppable, can_scroll_window, droppable_overlap, overlap,
    window_overlap,
};
pub use fluid::FluidScroller;
pub use jump::{JumpScroll, jump_scroll};
pub use speed::{Dampening, scroll_speed};

/// A scroll the host should perform.
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollRequest {
    Window { change: Vec2 },
    Droppable { id: DroppableId, change: Vec2 },
}

impl ScrollRequest {
    pub fn change(&self) -> Vec2 {
        match self {
            Self::Window { change } | Self::Droppable { change, .. } => *change,
        }
    }
}
