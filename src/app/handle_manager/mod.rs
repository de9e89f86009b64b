//! Handle-Manager: Registry benannter Drag-Handles.
//!
//! Aufgeteilt in:
//! - `definition` — `HandleDefinition` (Vorlage für Erstellen/Neuerstellen)
//! - `layouts`    — Komfort-Erzeugung (einfach, Grad, Raster, Ring)
//!
//! Der Manager besitzt alle Handles, eine gemeinsame `TimerQueue` und den
//! Presenter. Er übersetzt `DragEvent`s in Presenter-Aufrufe und führt die
//! Registry-Buchhaltung (Entfernen bei Erfolg, Neuerstellen nach Fehlschlag).

mod definition;
mod layouts;

pub use definition::{DefinitionCallback, HandleDefinition};
pub use layouts::{GridLayout, RingLayout};

use super::drag_handle::{DragEvent, DragHandle, DragInput, FailureReason, HandleState};
use super::event_log::{EventLog, ManagerEvent};
use super::presenter::{DragPresenter, NullPresenter};
use super::timer::{FailureScheduler, TimerId, TimerQueue};
use crate::shared::ManagerOptions;
use glam::Vec2;
use indexmap::IndexMap;

/// Payload der gemeinsamen Timer-Queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    /// Fehler-Timer eines Handles
    FailureTimeout(String),
    /// Verzögerte Neuerstellung nach Fehlschlag
    Recreate(String),
}

/// Sicht eines Handles auf die gemeinsame Queue.
struct HandleTimers<'a> {
    queue: &'a mut TimerQueue<TimerTask>,
    id: &'a str,
}

impl FailureScheduler for HandleTimers<'_> {
    fn schedule_failure(&mut self, delay_ms: u64) -> TimerId {
        self.queue
            .schedule(delay_ms, TimerTask::FailureTimeout(self.id.to_owned()))
    }

    fn cancel(&mut self, id: TimerId) {
        self.queue.cancel(id);
    }
}

/// Aggregierter Status einer Definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleStatus {
    /// Es existiert ein lebendes Handle
    pub active: bool,
    /// Erfolgreich abgeschlossen (kein lebendes Handle, keine Neuerstellung ausstehend)
    pub completed: bool,
    /// Zustand des lebenden Handles
    pub state: Option<HandleState>,
}

/// Orchestrator aller Drag-Handles einer Szene.
pub struct HandleManager<P: DragPresenter = NullPresenter> {
    options: ManagerOptions,
    presenter: P,
    /// Lebende Handles
    handles: IndexMap<String, DragHandle>,
    /// Alle bekannten Definitionen (bleiben nach Erfolg erhalten)
    definitions: IndexMap<String, HandleDefinition>,
    timers: TimerQueue<TimerTask>,
    /// ID → ausstehender Neuerstellungs-Timer
    pending_recreate: IndexMap<String, TimerId>,
    scale: f32,
    engaged: Option<String>,
    log: EventLog,
}

impl<P: DragPresenter> std::fmt::Debug for HandleManager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleManager")
            .field("handles", &self.handles.keys().collect::<Vec<_>>())
            .field("definitions", &self.definitions.len())
            .field("pending_recreate", &self.pending_recreate.keys().collect::<Vec<_>>())
            .field("scale", &self.scale)
            .field("engaged", &self.engaged)
            .field("now_ms", &self.timers.now_ms())
            .finish_non_exhaustive()
    }
}

impl Default for HandleManager<NullPresenter> {
    fn default() -> Self {
        Self::new(ManagerOptions::default())
    }
}

impl HandleManager<NullPresenter> {
    /// Manager ohne Darstellung.
    pub fn new(options: ManagerOptions) -> Self {
        Self::with_presenter(options, NullPresenter)
    }
}

impl<P: DragPresenter> HandleManager<P> {
    /// Manager mit eigenem Presenter.
    pub fn with_presenter(options: ManagerOptions, presenter: P) -> Self {
        Self {
            options,
            presenter,
            handles: IndexMap::new(),
            definitions: IndexMap::new(),
            timers: TimerQueue::new(),
            pending_recreate: IndexMap::new(),
            scale: 1.0,
            engaged: None,
            log: EventLog::new(),
        }
    }

    // ── Erstellen / Entfernen ────────────────────────────────────

    /// Registriert eine Definition und erstellt das Handle mit der aktuellen Skalierung.
    ///
    /// Eine bestehende Registrierung mit gleicher ID wird ersetzt.
    pub fn create_handle(&mut self, definition: HandleDefinition) {
        let id = definition.id.clone();
        self.discard_live(&id);
        self.cancel_recreate(&id);
        self.definitions.insert(id.clone(), definition);
        if self.instantiate(&id) {
            self.log.record(ManagerEvent::Created { id });
        }
    }

    /// Entfernt Handle, Definition und eine ausstehende Neuerstellung.
    ///
    /// Gibt `true` zurück, wenn zu der ID etwas registriert war.
    pub fn remove(&mut self, id: &str) -> bool {
        let had_live = self.discard_live(id);
        let had_recreate = self.cancel_recreate(id);
        let had_definition = self.definitions.shift_remove(id).is_some();
        let removed = had_live || had_recreate || had_definition;
        if removed {
            log::info!("Handle {} entfernt", id);
            self.log.record(ManagerEvent::Removed { id: id.to_owned() });
        }
        removed
    }

    /// Entfernt alle Handles und Definitionen.
    pub fn remove_all(&mut self) {
        let ids: Vec<String> = self.definitions.keys().cloned().collect();
        for id in ids {
            self.remove(&id);
        }
        self.timers.clear();
        self.pending_recreate.clear();
        self.engaged = None;
    }

    /// Erzeugt die Pfade aller lebenden, nicht-terminalen Handles für `scale` neu.
    ///
    /// Der Fortschritt jedes Handles bleibt erhalten; spätere (Neu-)Erstellungen
    /// nutzen ebenfalls `scale`.
    pub fn update_layout(&mut self, scale: f32) {
        self.scale = scale;
        let ids: Vec<String> = self.handles.keys().cloned().collect();
        for id in ids {
            let Some(definition) = self.definitions.get(&id) else {
                continue;
            };
            let (position, config) = (definition.position, definition.path_config);
            let events = match self.handles.get_mut(&id) {
                Some(handle) if !handle.is_finished() => {
                    handle.update_layout(position, scale, &config)
                }
                _ => continue,
            };
            self.dispatch(&id, events);
        }
    }

    // ── Zeiger-Routing ───────────────────────────────────────────

    /// Pointer-Down: greift das erste lebende `idle`-Handle im Greif-Radius.
    ///
    /// Solange ein Handle gegriffen ist, wird kein weiteres gegriffen.
    pub fn pointer_down(&mut self, point: Vec2) -> Option<String> {
        if self.engaged.is_some() {
            return None;
        }
        let id = self
            .handles
            .iter()
            .find(|(_, handle)| handle.state() == HandleState::Idle && handle.hit_test(point))
            .map(|(id, _)| id.clone())?;

        self.input(&id, DragInput::Engage);
        Some(id)
    }

    /// Pointer-Move: leitet das Sample an das gegriffene Handle weiter.
    pub fn pointer_move(&mut self, point: Vec2) {
        if let Some(id) = self.engaged.clone() {
            self.input(&id, DragInput::Move(point));
        }
    }

    /// Pointer-Up auf dem gegriffenen Handle.
    pub fn pointer_up(&mut self) {
        if let Some(id) = self.engaged.take() {
            self.input(&id, DragInput::Release);
        }
    }

    /// Pointer-Up irgendwo (auch außerhalb der Zeichenfläche).
    pub fn global_pointer_up(&mut self) {
        if let Some(id) = self.engaged.take() {
            self.input(&id, DragInput::GlobalRelease);
        }
    }

    /// Leitet eine Eingabe direkt an das Handle `id`.
    ///
    /// Gibt `false` zurück, wenn kein lebendes Handle mit dieser ID existiert
    /// oder `Engage` abgewiesen wird, weil bereits ein anderes Handle gegriffen ist.
    pub fn input(&mut self, id: &str, input: DragInput) -> bool {
        if matches!(input, DragInput::Engage)
            && self.engaged.as_deref().is_some_and(|engaged| engaged != id)
        {
            log::debug!("Greifen von '{}' ignoriert, Handle bereits gegriffen", id);
            return false;
        }
        let Some(handle) = self.handles.get_mut(id) else {
            return false;
        };
        let mut timers = HandleTimers {
            queue: &mut self.timers,
            id,
        };
        let events = handle.handle_input(input, &mut timers);
        if matches!(input, DragInput::Engage) && handle.state() == HandleState::Dragging {
            self.engaged = Some(id.to_owned());
        }
        self.dispatch(id, events);
        true
    }

    // ── Zeit ─────────────────────────────────────────────────────

    /// Rückt die Uhr um `delta_ms` vor und verarbeitet alle fälligen Timer.
    ///
    /// Timer feuern in Fälligkeitsreihenfolge; innerhalb des Intervalls neu
    /// geplante Timer werden im selben Aufruf verarbeitet.
    pub fn advance(&mut self, delta_ms: u64) {
        let until = self.timers.now_ms().saturating_add(delta_ms);
        while let Some((timer_id, task)) = self.timers.pop_due(until) {
            match task {
                TimerTask::FailureTimeout(id) => self.fire_failure_timer(&id, timer_id),
                TimerTask::Recreate(id) => self.fire_recreate(&id, timer_id),
            }
        }
        self.timers.set_now(until);
    }

    fn fire_failure_timer(&mut self, id: &str, timer_id: TimerId) {
        let Some(handle) = self.handles.get_mut(id) else {
            return;
        };
        let mut timers = HandleTimers {
            queue: &mut self.timers,
            id,
        };
        let events = handle.on_timer(timer_id, &mut timers);
        self.dispatch(id, events);
    }

    fn fire_recreate(&mut self, id: &str, timer_id: TimerId) {
        if self.pending_recreate.get(id) != Some(&timer_id) {
            return;
        }
        self.pending_recreate.shift_remove(id);

        // Prüfung zum Feuer-Zeitpunkt: zwischenzeitlich entfernt oder neu erstellt?
        if !self.definitions.contains_key(id) || self.handles.contains_key(id) {
            log::debug!("Neuerstellung von {} übersprungen", id);
            return;
        }
        if self.instantiate(id) {
            log::info!("Handle {} neu erstellt", id);
            self.log.record(ManagerEvent::Recreated { id: id.to_owned() });
        }
    }

    // ── Abfragen ─────────────────────────────────────────────────

    /// Status aller Definitionen in Registrierungsreihenfolge.
    pub fn handle_states(&self) -> IndexMap<String, HandleStatus> {
        self.definitions
            .keys()
            .map(|id| (id.clone(), self.status(id)))
            .collect()
    }

    /// Status einer einzelnen Definition.
    pub fn status(&self, id: &str) -> HandleStatus {
        match self.handles.get(id) {
            Some(handle) => HandleStatus {
                active: true,
                completed: handle.is_completed(),
                state: Some(handle.state()),
            },
            None => HandleStatus {
                active: false,
                completed: self.definitions.contains_key(id)
                    && !self.pending_recreate.contains_key(id),
                state: None,
            },
        }
    }

    /// Anzahl lebender Handles.
    pub fn active_count(&self) -> usize {
        self.handles.len()
    }

    /// Anzahl abgeschlossener Definitionen.
    pub fn completed_count(&self) -> usize {
        self.definitions
            .keys()
            .filter(|id| self.status(id).completed)
            .count()
    }

    /// Sind alle Definitionen abgeschlossen? (`true` bei leerer Registry)
    pub fn are_all_completed(&self) -> bool {
        self.definitions.keys().all(|id| self.status(id).completed)
    }

    /// Lebendes Handle zu einer ID.
    pub fn handle(&self, id: &str) -> Option<&DragHandle> {
        self.handles.get(id)
    }

    /// Registrierte Definition zu einer ID.
    pub fn definition(&self, id: &str) -> Option<&HandleDefinition> {
        self.definitions.get(id)
    }

    /// Ist für `id` eine Neuerstellung geplant?
    pub fn is_recreate_pending(&self, id: &str) -> bool {
        self.pending_recreate.contains_key(id)
    }

    /// ID des aktuell gegriffenen Handles.
    pub fn engaged_id(&self) -> Option<&str> {
        self.engaged.as_deref()
    }

    /// Aktuelle Layout-Skalierung.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Aktuelle Uhrzeit der Timer-Queue.
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Anzahl ausstehender Timer (Fehler und Neuerstellung).
    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Aktive Optionen.
    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    /// Protokoll der Registry-Ereignisse.
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Presenter (read-only).
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Presenter (mutable).
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // ── Interna ──────────────────────────────────────────────────

    /// Erstellt das lebende Handle aus der gespeicherten Definition.
    fn instantiate(&mut self, id: &str) -> bool {
        let Some(definition) = self.definitions.get(id) else {
            return false;
        };
        let options = definition.overrides.apply_to(self.options.default_drag);
        let mut handle = DragHandle::new(options);
        if let Some(callback) = definition.on_complete.clone() {
            handle.set_on_complete(move || callback());
        }
        if let Some(callback) = definition.on_failure.clone() {
            handle.set_on_failure(move || callback());
        }
        let events = handle.create(
            definition.position,
            self.scale,
            &definition.path_config,
            definition.rotation,
        );
        self.handles.insert(id.to_owned(), handle);
        log::info!("Handle {} erstellt", id);
        self.dispatch(id, events);
        true
    }

    /// Zerstört das lebende Handle (Timer, Callbacks, Grafik).
    fn discard_live(&mut self, id: &str) -> bool {
        let Some(mut handle) = self.handles.shift_remove(id) else {
            return false;
        };
        let mut timers = HandleTimers {
            queue: &mut self.timers,
            id,
        };
        handle.destroy(&mut timers);
        self.presenter.teardown(id);
        if self.engaged.as_deref() == Some(id) {
            self.engaged = None;
        }
        true
    }

    fn cancel_recreate(&mut self, id: &str) -> bool {
        match self.pending_recreate.shift_remove(id) {
            Some(timer_id) => {
                self.timers.cancel(timer_id);
                true
            }
            None => false,
        }
    }

    /// Übersetzt Handle-Events in Presenter-Aufrufe und Registry-Buchhaltung.
    fn dispatch(&mut self, id: &str, events: Vec<DragEvent>) {
        for event in events {
            match event {
                DragEvent::PathChanged { points } => self.presenter.draw_path(id, &points),
                DragEvent::Moved { progress, position } => {
                    let Some(handle) = self.handles.get(id) else {
                        continue;
                    };
                    let done = handle.path().progress_polyline(progress);
                    let dragging = handle.state() == HandleState::Dragging;
                    self.presenter.draw_progress(id, &done, position, progress);
                    if dragging {
                        self.presenter.pulse(id, progress);
                    }
                }
                DragEvent::Completed { end_point } => {
                    self.presenter.completion_effect(id, end_point);
                    self.on_completed(id);
                }
                DragEvent::Failed { position, reason } => {
                    self.presenter.failure_effect(id, position);
                    self.on_failed(id, reason);
                }
            }
        }
    }

    /// Erfolg: lebendes Handle entfernen, Definition bleibt (zählt als abgeschlossen).
    fn on_completed(&mut self, id: &str) {
        self.discard_live(id);
        self.log.record(ManagerEvent::Completed { id: id.to_owned() });
    }

    /// Fehlschlag: Neuerstellung planen oder endgültig entfernen.
    fn on_failed(&mut self, id: &str, reason: FailureReason) {
        let Some(definition) = self.definitions.get(id) else {
            self.discard_live(id);
            return;
        };
        let auto_recreate = definition
            .auto_recreate
            .unwrap_or(self.options.default_auto_recreate);
        let delay_ms = definition
            .recreate_delay_ms
            .unwrap_or(self.options.default_recreate_delay_ms);

        self.discard_live(id);
        if auto_recreate {
            self.cancel_recreate(id);
            let timer_id = self
                .timers
                .schedule(delay_ms, TimerTask::Recreate(id.to_owned()));
            self.pending_recreate.insert(id.to_owned(), timer_id);
            log::info!("Handle {} fehlgeschlagen, Neuerstellung in {} ms", id, delay_ms);
            self.log.record(ManagerEvent::Failed {
                id: id.to_owned(),
                reason,
                recreate_in_ms: Some(delay_ms),
            });
        } else {
            self.definitions.shift_remove(id);
            log::info!("Handle {} fehlgeschlagen und entfernt", id);
            self.log.record(ManagerEvent::Failed {
                id: id.to_owned(),
                reason,
                recreate_in_ms: None,
            });
        }
    }
}

#[cfg(test)]
mod tests;
