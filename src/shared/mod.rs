//! Geteilte Konfiguration für `core` und `app`.

pub mod options;

pub use options::{DragOptions, DragOverrides, ManagerOptions, ValidationMode};
pub use options::{
    COMPLETION_THRESHOLD, HANDLE_HIT_RADIUS, MAX_ADVANCEMENT_PER_SAMPLE,
};
