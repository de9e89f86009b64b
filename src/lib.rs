//! Path Trace: Pfad-Geometrie und Drag-Zustandsautomat.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    DragEvent, DragHandle, DragInput, DragPresenter, FailureReason, FailureScheduler,
    HandleDefinition, HandleManager, HandleState, HandleStatus, NullPresenter, TimerId,
    TimerQueue,
};
pub use core::{PathConfig, PathGeometry, PathShape};
pub use shared::{DragOptions, DragOverrides, ManagerOptions, ValidationMode};
