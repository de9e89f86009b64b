//! Darstellungs-Schnittstelle für Drag-Handles.
//!
//! Der Manager übersetzt `DragEvent`s in Aufrufe dieses Traits. Alle Methoden
//! sind fire-and-forget; Grafik-Ressourcen gehören ausschließlich dem Presenter.

use glam::Vec2;

/// Effekt-Kollaborator eines `HandleManager`.
///
/// Default-Implementierungen sind No-ops, damit Presenter nur die Effekte
/// implementieren müssen, die sie tatsächlich darstellen.
pub trait DragPresenter {
    /// Zeichnet den vollständigen Pfad eines Handles (neu).
    fn draw_path(&mut self, _id: &str, _points: &[Vec2]) {}

    /// Zeichnet den bereits zurückgelegten Teil des Pfads und das Handle.
    fn draw_progress(&mut self, _id: &str, _done: &[Vec2], _position: Vec2, _progress: f32) {}

    /// Puls-Animation während des Drags.
    fn pulse(&mut self, _id: &str, _progress: f32) {}

    /// Erfolgs-Effekt am Pfadende.
    fn completion_effect(&mut self, _id: &str, _end_point: Vec2) {}

    /// Fehlschlag-Effekt an der Handle-Position.
    fn failure_effect(&mut self, _id: &str, _position: Vec2) {}

    /// Gibt alle Grafik-Ressourcen eines Handles frei.
    fn teardown(&mut self, _id: &str) {}
}

/// Presenter ohne Darstellung (Headless-Betrieb, Tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl DragPresenter for NullPresenter {}

/// Skalierungsfaktor der Puls-Animation für einen Fortschritt.
///
/// Zwei volle Schwingungen über den Pfad, Amplitude ±10 %.
pub fn pulse_scale(progress: f32) -> f32 {
    1.0 + (progress * std::f32::consts::PI * 4.0).sin() * 0.1
}

/// Aufzeichnender Presenter für Tests und Diagnose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingPresenter {
    /// Alle Aufrufe in Reihenfolge
    pub calls: Vec<PresenterCall>,
}

/// Ein einzelner aufgezeichneter Presenter-Aufruf.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCall {
    /// `draw_path`
    DrawPath { id: String, point_count: usize },
    /// `draw_progress`
    DrawProgress { id: String, progress: f32 },
    /// `pulse`
    Pulse { id: String, scale: f32 },
    /// `completion_effect`
    Completion { id: String },
    /// `failure_effect`
    Failure { id: String },
    /// `teardown`
    Teardown { id: String },
}

impl RecordingPresenter {
    /// Erstellt einen leeren Recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der Aufrufe, die `predicate` erfüllen.
    pub fn count(&self, predicate: impl Fn(&PresenterCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl DragPresenter for RecordingPresenter {
    fn draw_path(&mut self, id: &str, points: &[Vec2]) {
        self.calls.push(PresenterCall::DrawPath {
            id: id.to_owned(),
            point_count: points.len(),
        });
    }

    fn draw_progress(&mut self, id: &str, _done: &[Vec2], _position: Vec2, progress: f32) {
        self.calls.push(PresenterCall::DrawProgress {
            id: id.to_owned(),
            progress,
        });
    }

    fn pulse(&mut self, id: &str, progress: f32) {
        self.calls.push(PresenterCall::Pulse {
            id: id.to_owned(),
            scale: pulse_scale(progress),
        });
    }

    fn completion_effect(&mut self, id: &str, _end_point: Vec2) {
        self.calls.push(PresenterCall::Completion { id: id.to_owned() });
    }

    fn failure_effect(&mut self, id: &str, _position: Vec2) {
        self.calls.push(PresenterCall::Failure { id: id.to_owned() });
    }

    fn teardown(&mut self, id: &str) {
        self.calls.push(PresenterCall::Teardown { id: id.to_owned() });
    }
}
