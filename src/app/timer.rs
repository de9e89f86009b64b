//! Deterministische Timer-Queue mit Millisekunden-Uhr.
//!
//! Timer sind abbrechbare, einmalige Ressourcen: `schedule` vergibt eine
//! `TimerId`, `cancel` entfernt den Timer, `pop_due` liefert fällige Timer in
//! Fälligkeitsreihenfolge (bei gleicher Fälligkeit in Anlage-Reihenfolge).

use std::collections::{BTreeMap, HashMap};

/// Eindeutige ID eines geplanten Timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Planungs-Schnittstelle, die ein `DragHandle` für seinen Fehler-Timer nutzt.
pub trait FailureScheduler {
    /// Plant den Fehler-Timer in `delay_ms` Millisekunden.
    fn schedule_failure(&mut self, delay_ms: u64) -> TimerId;

    /// Bricht einen geplanten Timer ab (No-op, falls bereits gefeuert).
    fn cancel(&mut self, id: TimerId);
}

/// Timer-Queue mit Payload `T` pro Timer.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    /// (Fälligkeit, ID) → Payload
    pending: BTreeMap<(u64, TimerId), T>,
    /// ID → Fälligkeit (für `cancel`)
    due_by_id: HashMap<TimerId, u64>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Erstellt eine leere Queue bei Zeitpunkt 0.
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            pending: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }

    /// Aktuelle Uhrzeit der Queue.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Plant `payload` in `delay_ms` Millisekunden.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now_ms.saturating_add(delay_ms);
        self.pending.insert((due, id), payload);
        self.due_by_id.insert(id, due);
        id
    }

    /// Bricht einen Timer ab. Gibt `true` zurück, wenn er noch ausstand.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.due_by_id.remove(&id) {
            Some(due) => self.pending.remove(&(due, id)).is_some(),
            None => false,
        }
    }

    /// Prüft, ob der Timer noch aussteht.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_by_id.contains_key(&id)
    }

    /// Anzahl ausstehender Timer.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Gibt `true` zurück, wenn keine Timer ausstehen.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Entnimmt den frühesten Timer, der spätestens bei `until_ms` fällig ist,
    /// und stellt die Uhr auf dessen Fälligkeit vor.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, T)> {
        let (&(due, id), _) = self.pending.first_key_value()?;
        if due > until_ms {
            return None;
        }
        let payload = self.pending.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        self.now_ms = self.now_ms.max(due);
        Some((id, payload))
    }

    /// Stellt die Uhr auf `until_ms` vor (nie zurück).
    pub fn set_now(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Rückt die Uhr um `delta_ms` vor und liefert alle dabei fälligen Timer.
    ///
    /// Für Aufrufer, die während der Verarbeitung keine neuen Timer planen.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<(TimerId, T)> {
        let until = self.now_ms.saturating_add(delta_ms);
        let mut fired = Vec::new();
        while let Some(entry) = self.pop_due(until) {
            fired.push(entry);
        }
        self.set_now(until);
        fired
    }

    /// Verwirft alle ausstehenden Timer.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.due_by_id.clear();
    }
}

/// Einzelnes Handle ohne Manager: die Queue trägt nur Fehler-Timer.
impl FailureScheduler for TimerQueue<()> {
    fn schedule_failure(&mut self, delay_ms: u64) -> TimerId {
        self.schedule(delay_ms, ())
    }

    fn cancel(&mut self, id: TimerId) {
        TimerQueue::cancel(self, id);
    }
}
