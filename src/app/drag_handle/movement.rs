//! Validierung von Zeiger-Samples während eines Drags.

use super::{DragEvent, DragHandle};
use crate::app::timer::FailureScheduler;
use crate::shared::{ValidationMode, COMPLETION_THRESHOLD, MAX_ADVANCEMENT_PER_SAMPLE};
use glam::Vec2;

/// Ergebnis der Validierung eines Samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MoveDecision {
    /// Neuer Fortschritt übernommen (vorwärts oder Korrektur)
    Advance(f32),
    /// Zeiger liegt auf der aktuellen Position, keine Änderung
    Hold,
    /// Zeiger abseits aller erlaubten Fenster
    OffPath,
}

impl DragHandle {
    /// Bewertet ein Sample gemäß dem konfigurierten Validierungsprofil.
    pub(crate) fn decide_move(&self, point: Vec2) -> MoveDecision {
        match self.options.validation {
            ValidationMode::Sequential => self.decide_sequential(point),
            ValidationMode::Projection => self.decide_projection(point),
        }
    }

    /// Vorwärts-Fenster → Stillstand → Rückwärts-Korrektur → abseits.
    fn decide_sequential(&self, point: Vec2) -> MoveDecision {
        let tolerance = self.options.tolerance;

        if let Some(next) = self.path.next_valid_progress(
            point,
            self.progress,
            MAX_ADVANCEMENT_PER_SAMPLE,
            tolerance,
        ) {
            return MoveDecision::Advance(next);
        }

        if self.path.is_position_on_path(point, self.progress, tolerance) {
            return MoveDecision::Hold;
        }

        match self.path.backward_correction(
            point,
            self.progress,
            self.options.max_backward_movement,
            tolerance,
        ) {
            Some(corrected) => MoveDecision::Advance(corrected),
            None => MoveDecision::OffPath,
        }
    }

    /// Freie Projektion auf den nächstgelegenen Pfadpunkt.
    fn decide_projection(&self, point: Vec2) -> MoveDecision {
        let target = self.path.progress_from_position(point);
        let min_allowed = (self.progress - self.options.max_backward_movement).max(0.0);
        let distance = self.path.position_at(target).distance(point);

        if target >= min_allowed && distance <= self.options.tolerance {
            MoveDecision::Advance(target)
        } else {
            MoveDecision::OffPath
        }
    }

    /// Verarbeitet ein Move-Sample im Zustand `Dragging`.
    pub(crate) fn on_move(&mut self, point: Vec2, timers: &mut dyn FailureScheduler) -> Vec<DragEvent> {
        match self.decide_move(point) {
            MoveDecision::Advance(progress) => {
                self.cancel_failure_timer(timers);
                self.progress = progress.clamp(0.0, 1.0);
                log::debug!("Fortschritt {:.3} bei Zeiger {}", self.progress, point);

                let mut events = vec![self.moved_event()];
                if self.progress >= COMPLETION_THRESHOLD {
                    events.extend(self.complete(timers));
                }
                events
            }
            MoveDecision::Hold => {
                self.cancel_failure_timer(timers);
                Vec::new()
            }
            MoveDecision::OffPath => {
                self.arm_failure_timer(timers);
                Vec::new()
            }
        }
    }
}
