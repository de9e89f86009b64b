//! Begrenztes Protokoll der Registry-Ereignisse eines `HandleManager`.

use super::drag_handle::FailureReason;

/// Ein Registry-Ereignis.
#[derive(Debug, Clone, PartialEq)]
pub enum ManagerEvent {
    /// Handle erstellt
    Created { id: String },
    /// Handle erfolgreich abgeschlossen
    Completed { id: String },
    /// Handle fehlgeschlagen; `recreate_in_ms` gesetzt, falls Neuerstellung geplant
    Failed {
        id: String,
        reason: FailureReason,
        recreate_in_ms: Option<u64>,
    },
    /// Handle nach Fehlschlag neu erstellt
    Recreated { id: String },
    /// Handle samt Definition entfernt
    Removed { id: String },
}

impl ManagerEvent {
    /// Betroffene Handle-ID.
    pub fn id(&self) -> &str {
        match self {
            ManagerEvent::Created { id }
            | ManagerEvent::Completed { id }
            | ManagerEvent::Failed { id, .. }
            | ManagerEvent::Recreated { id }
            | ManagerEvent::Removed { id } => id,
        }
    }
}

/// Speichert Registry-Ereignisse in Reihenfolge.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<ManagerEvent>,
}

impl EventLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Protokoll.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt ein Ereignis hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    pub fn record(&mut self, event: ManagerEvent) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(event);
    }

    /// Anzahl der Einträge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Einträge vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[ManagerEvent] {
        &self.entries
    }

    /// Alle Einträge zu einer Handle-ID.
    pub fn for_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ManagerEvent> + 'a {
        self.entries.iter().filter(move |e| e.id() == id)
    }

    /// Verwirft alle Einträge.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
