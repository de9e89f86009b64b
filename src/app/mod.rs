//! Application-Layer: Timer, Drag-Zustandsautomat, Presenter und Handle-Manager.

pub mod drag_handle;
pub mod event_log;
/// Orchestrierung benannter Handles
///
/// Registry, Neuerstellung nach Fehlschlag und Zeiger-Routing.
pub mod handle_manager;
pub mod presenter;
pub mod timer;

pub use drag_handle::{DragEvent, DragHandle, DragInput, FailureReason, HandleLayout, HandleState};
pub use event_log::{EventLog, ManagerEvent};
pub use handle_manager::{
    GridLayout, HandleDefinition, HandleManager, HandleStatus, RingLayout, TimerTask,
};
pub use presenter::{pulse_scale, DragPresenter, NullPresenter, PresenterCall, RecordingPresenter};
pub use timer::{FailureScheduler, TimerId, TimerQueue};
