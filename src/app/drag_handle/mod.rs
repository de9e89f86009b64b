//! Drag-Handle: Zustandsautomat für eine Trace-the-Path-Interaktion.
//!
//! Aufgeteilt in:
//! - `events`   — Zustände, Eingaben und ausgehende Events
//! - `movement` — Validierung einzelner Zeiger-Samples
//!
//! Das Handle hält nur numerischen Zustand. Jede Transition liefert
//! `DragEvent`s zurück; die Darstellung abonniert diese und rendert selbst.

mod events;
mod movement;

pub use events::{DragEvent, DragInput, FailureReason, HandleState};

use super::timer::{FailureScheduler, TimerId};
use crate::core::{PathConfig, PathGeometry};
use crate::shared::{DragOptions, COMPLETION_THRESHOLD, HANDLE_HIT_RADIUS};
use glam::Vec2;

/// Callback bei Erreichen eines terminalen Zustands.
pub type TerminalCallback = Box<dyn FnMut()>;

/// Layout, mit dem der aktuelle Pfad erzeugt wurde.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    /// Zentrum (vor Versatz)
    pub center: Vec2,
    /// Skalierung von Größe und Versatz
    pub scale: f32,
    /// Pfad-Konfiguration wie übergeben
    pub config: PathConfig,
    /// Zusätzliche Rotation des gesamten Handles (Radiant)
    pub rotation: f32,
}

impl HandleLayout {
    /// Konfiguration mit eingerechneter Handle-Rotation.
    pub fn effective_config(&self) -> PathConfig {
        self.config.with_rotation(self.config.rotation + self.rotation)
    }
}

/// Zustandsautomat eines einzelnen Drag-Handles.
///
/// `idle → dragging → completed | failed`. Beide Endzustände sind terminal
/// und idempotent; erst `reset()` führt zurück nach `idle`.
pub struct DragHandle {
    pub(crate) options: DragOptions,
    pub(crate) path: PathGeometry,
    pub(crate) layout: Option<HandleLayout>,
    pub(crate) state: HandleState,
    pub(crate) progress: f32,
    pub(crate) pointer_down: bool,
    pub(crate) pending_failure_timer: Option<TimerId>,
    on_complete: Option<TerminalCallback>,
    on_failure: Option<TerminalCallback>,
}

impl std::fmt::Debug for DragHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragHandle")
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("pointer_down", &self.pointer_down)
            .field("pending_failure_timer", &self.pending_failure_timer)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl DragHandle {
    /// Erstellt ein Handle ohne Pfad. Vor der ersten Eingabe muss `create` laufen.
    pub fn new(options: DragOptions) -> Self {
        Self {
            options,
            path: PathGeometry::new(),
            layout: None,
            state: HandleState::Idle,
            progress: 0.0,
            pointer_down: false,
            pending_failure_timer: None,
            on_complete: None,
            on_failure: None,
        }
    }

    // ── Lebenszyklus ─────────────────────────────────────────────

    /// Erzeugt den Pfad und platziert das Handle an dessen Start.
    ///
    /// `rotation` dreht das gesamte Handle zusätzlich zu `config.rotation`.
    /// Auf einem terminalen Handle ohne Wirkung.
    pub fn create(
        &mut self,
        center: Vec2,
        scale: f32,
        config: &PathConfig,
        rotation: f32,
    ) -> Vec<DragEvent> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        self.apply_layout(HandleLayout {
            center,
            scale,
            config: *config,
            rotation,
        })
    }

    /// Erzeugt den Pfad für ein neues Layout; der Fortschritt bleibt erhalten.
    pub fn update_layout(&mut self, center: Vec2, scale: f32, config: &PathConfig) -> Vec<DragEvent> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        let rotation = self.layout.map_or(0.0, |l| l.rotation);
        self.apply_layout(HandleLayout {
            center,
            scale,
            config: *config,
            rotation,
        })
    }

    fn apply_layout(&mut self, layout: HandleLayout) -> Vec<DragEvent> {
        self.path
            .rebuild(layout.center, layout.scale, &layout.effective_config());
        self.layout = Some(layout);
        vec![
            DragEvent::PathChanged {
                points: self.path.points().to_vec(),
            },
            self.moved_event(),
        ]
    }

    /// Setzt das Handle auf einen frischen `idle`-Zustand zurück.
    ///
    /// Pfad und Layout bleiben erhalten, ein ausstehender Timer wird abgebrochen.
    pub fn reset(&mut self, timers: &mut dyn FailureScheduler) {
        self.cancel_failure_timer(timers);
        self.state = HandleState::Idle;
        self.progress = 0.0;
        self.pointer_down = false;
    }

    /// Gibt alle Ressourcen frei: Timer und Callbacks.
    pub fn destroy(&mut self, timers: &mut dyn FailureScheduler) {
        self.cancel_failure_timer(timers);
        self.pointer_down = false;
        self.on_complete = None;
        self.on_failure = None;
    }

    /// Setzt den Callback für erfolgreichen Abschluss.
    pub fn set_on_complete(&mut self, callback: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Setzt den Callback für Fehlschlag.
    pub fn set_on_failure(&mut self, callback: impl FnMut() + 'static) {
        self.on_failure = Some(Box::new(callback));
    }

    // ── Eingaben ─────────────────────────────────────────────────

    /// Verarbeitet eine Zeiger-Eingabe.
    pub fn handle_input(
        &mut self,
        input: DragInput,
        timers: &mut dyn FailureScheduler,
    ) -> Vec<DragEvent> {
        if self.state.is_terminal() {
            return Vec::new();
        }

        match input {
            DragInput::Engage => self.engage(timers),
            DragInput::Move(point) => {
                if self.state == HandleState::Dragging {
                    self.on_move(point, timers)
                } else {
                    Vec::new()
                }
            }
            DragInput::Release => self.release(timers),
            DragInput::GlobalRelease => {
                if self.pointer_down {
                    self.fail(FailureReason::GlobalRelease, timers)
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Meldet einen gefeuerten Timer. Fremde oder veraltete IDs werden ignoriert.
    pub fn on_timer(&mut self, id: TimerId, timers: &mut dyn FailureScheduler) -> Vec<DragEvent> {
        if self.pending_failure_timer != Some(id) {
            return Vec::new();
        }
        self.pending_failure_timer = None;
        if self.state.is_terminal() {
            return Vec::new();
        }
        log::debug!("Fehler-Timer abgelaufen bei Fortschritt {:.3}", self.progress);
        self.fail(FailureReason::Timeout, timers)
    }

    fn engage(&mut self, timers: &mut dyn FailureScheduler) -> Vec<DragEvent> {
        self.cancel_failure_timer(timers);
        self.state = HandleState::Dragging;
        self.progress = 0.0;
        self.pointer_down = true;
        vec![self.moved_event()]
    }

    fn release(&mut self, timers: &mut dyn FailureScheduler) -> Vec<DragEvent> {
        if self.state != HandleState::Dragging {
            return Vec::new();
        }
        self.pointer_down = false;
        if self.progress < COMPLETION_THRESHOLD {
            return self.fail(FailureReason::Released, timers);
        }
        self.state = HandleState::Idle;
        Vec::new()
    }

    // ── Timer ────────────────────────────────────────────────────

    /// Startet den Fehler-Timer, falls keiner aussteht.
    pub(crate) fn arm_failure_timer(&mut self, timers: &mut dyn FailureScheduler) {
        if self.pending_failure_timer.is_none() && self.pointer_down {
            let id = timers.schedule_failure(self.options.failure_timeout_ms);
            log::debug!(
                "Abseits des Pfads, Fehler-Timer {:?} in {} ms",
                id,
                self.options.failure_timeout_ms
            );
            self.pending_failure_timer = Some(id);
        }
    }

    /// Bricht einen ausstehenden Fehler-Timer ab.
    pub(crate) fn cancel_failure_timer(&mut self, timers: &mut dyn FailureScheduler) {
        if let Some(id) = self.pending_failure_timer.take() {
            timers.cancel(id);
        }
    }

    // ── Terminale Transitionen ───────────────────────────────────

    pub(crate) fn complete(&mut self, timers: &mut dyn FailureScheduler) -> Vec<DragEvent> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        self.state = HandleState::Completed;
        self.pointer_down = false;
        self.cancel_failure_timer(timers);
        log::info!("Pfad abgeschlossen (Fortschritt {:.3})", self.progress);

        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
        vec![DragEvent::Completed {
            end_point: self.path.end_point().unwrap_or(Vec2::ZERO),
        }]
    }

    pub(crate) fn fail(
        &mut self,
        reason: FailureReason,
        timers: &mut dyn FailureScheduler,
    ) -> Vec<DragEvent> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        self.state = HandleState::Failed;
        self.pointer_down = false;
        self.cancel_failure_timer(timers);
        log::info!(
            "Pfad fehlgeschlagen ({:?}) bei Fortschritt {:.3}",
            reason,
            self.progress
        );

        if let Some(callback) = self.on_failure.as_mut() {
            callback();
        }
        vec![DragEvent::Failed {
            position: self.position(),
            reason,
        }]
    }

    pub(crate) fn moved_event(&self) -> DragEvent {
        DragEvent::Moved {
            progress: self.progress,
            position: self.position(),
        }
    }

    // ── Abfragen ─────────────────────────────────────────────────

    /// Aktueller Zustand.
    pub fn state(&self) -> HandleState {
        self.state
    }

    /// Aktueller Fortschritt in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Handle-Position, abgeleitet aus dem Fortschritt.
    pub fn position(&self) -> Vec2 {
        self.path.position_at(self.progress)
    }

    /// Ist der Zeiger aktuell gedrückt?
    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Steht ein Fehler-Timer aus?
    pub fn pending_failure_timer(&self) -> Option<TimerId> {
        self.pending_failure_timer
    }

    /// Wurde der Pfad erfolgreich abgeschlossen?
    pub fn is_completed(&self) -> bool {
        self.state == HandleState::Completed
    }

    /// Ist das Handle in einem terminalen Zustand?
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Pfad-Geometrie des Handles.
    pub fn path(&self) -> &PathGeometry {
        &self.path
    }

    /// Aktuelles Layout (nach `create`).
    pub fn layout(&self) -> Option<&HandleLayout> {
        self.layout.as_ref()
    }

    /// Aktive Konfiguration.
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Liegt `point` im Greif-Radius des Handles?
    pub fn hit_test(&self, point: Vec2) -> bool {
        if self.state.is_terminal() || self.layout.is_none() {
            return false;
        }
        let scale = self.layout.map_or(1.0, |l| l.scale);
        self.position().distance(point) <= HANDLE_HIT_RADIUS * scale
    }
}
