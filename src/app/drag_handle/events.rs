//! Ein- und Ausgaben des Drag-Zustandsautomaten.

use glam::Vec2;

/// Lebenszyklus-Zustand eines Handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleState {
    /// Wartet auf Engagement
    #[default]
    Idle,
    /// Zeiger gedrückt, Bewegungen werden validiert
    Dragging,
    /// Pfad erfolgreich abgefahren (terminal)
    Completed,
    /// Abgebrochen oder abseits des Pfads (terminal)
    Failed,
}

impl HandleState {
    /// `Completed` oder `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, HandleState::Completed | HandleState::Failed)
    }
}

/// Zeiger-Eingaben für ein Handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragInput {
    /// Drag-Start oder Pointer-Down auf dem Handle
    Engage,
    /// Drag- oder Pointer-Move-Sample
    Move(Vec2),
    /// Drag-End oder Pointer-Up auf dem Handle
    Release,
    /// Globales Pointer-Up (auch außerhalb der Zeichenfläche)
    GlobalRelease,
}

/// Grund eines Fehlschlags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Losgelassen vor Erreichen des Pfadendes
    Released,
    /// Globales Loslassen während das Handle gegriffen war
    GlobalRelease,
    /// Zu lange abseits des Pfads
    Timeout,
}

/// Benachrichtigungen an Präsentation und Orchestrierung.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// Pfad wurde (neu) erzeugt
    PathChanged {
        /// Neue Punktfolge
        points: Vec<Vec2>,
    },
    /// Fortschritt bzw. Handle-Position hat sich geändert
    Moved {
        /// Neuer Fortschritt
        progress: f32,
        /// Daraus abgeleitete Position
        position: Vec2,
    },
    /// Pfadende erreicht
    Completed {
        /// Letzter Pfadpunkt
        end_point: Vec2,
    },
    /// Handle fehlgeschlagen
    Failed {
        /// Handle-Position beim Fehlschlag
        position: Vec2,
        /// Auslöser
        reason: FailureReason,
    },
}
