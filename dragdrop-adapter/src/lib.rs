//! Adapter utilities for the `dragdrop` crate.
//!
//! The `dragdrop` crate is UI-agnostic and focuses on the drag state machine and its math. This
//! crate provides the framework-neutral driver adapters usually need around it:
//!
//! - [`DragController`]: owns the single live drag and applies actions to it
//! - [`Registry`]: the view layer's side (measurement, scrolling)
//! - [`Responders`]: host callbacks and screen reader announcements
//! - [`TaskQueue`]: deferred work drained by `tick(now_ms)`
//!
//! This crate is framework-agnostic (no ratatui/egui bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod publisher;
mod registry;
mod responders;
mod scheduler;
mod staging;


pub use controller::{ControllerError, DragController, Subscription};
pub use dragdrop;
pub use publisher::Publisher;
pub use registry::Registry;
pub use responders::{
    Announce, BeforeCapture, Responders, default_end_message, default_start_message,
    default_update_message,
};
pub use scheduler::{Due, TaskKind, TaskQueue};
pub use staging::{StagedChanges, Staging};
