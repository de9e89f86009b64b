//! Pfad-Geometrie mit Arc-Length-Index.
//!
//! `PathGeometry` hält die Punktfolge eines Pfads und die daraus abgeleiteten
//! Segment-Längen und -Startoffsets. Fortschritt (`progress`) ist der Anteil
//! der zurückgelegten Bogenlänge in `[0, 1]`.

use super::path_shape::PathConfig;
use glam::Vec2;

/// Auflösung der globalen Nearest-Point-Suche.
pub const PROJECTION_SAMPLES: usize = 100;
/// Auflösung der Vorwärts-Fenstersuche.
pub const FORWARD_WINDOW_SAMPLES: usize = 50;
/// Auflösung der Rückwärts-Fenstersuche.
pub const BACKWARD_WINDOW_SAMPLES: usize = 20;
/// Auflösung der Fortschritts-Polylinie.
pub const PROGRESS_POLYLINE_SAMPLES: usize = 50;

/// Punktfolge plus Arc-Length-Index eines Pfads.
///
/// Punkte werden nur als Ganzes ersetzt (`rebuild`), der Index wird dabei
/// immer vollständig neu berechnet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathGeometry {
    points: Vec<Vec2>,
    segment_lengths: Vec<f32>,
    segment_starts: Vec<f32>,
    total_length: f32,
}

impl PathGeometry {
    /// Erstellt eine leere Geometrie (alle Abfragen liefern den Ursprung).
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt eine Geometrie direkt aus einer Punktfolge.
    pub fn from_points(points: Vec<Vec2>) -> Self {
        let mut geometry = Self::new();
        geometry.set_points(points);
        geometry
    }

    /// Erzeugt Punkte und Arc-Length-Index für die gegebene Konfiguration neu.
    pub fn rebuild(&mut self, center: Vec2, scale: f32, config: &PathConfig) {
        self.set_points(config.generate_points(center, scale));
    }

    /// Ersetzt die Punktfolge atomar und berechnet den Index neu.
    pub fn set_points(&mut self, points: Vec<Vec2>) {
        let segment_count = points.len().saturating_sub(1);
        let mut segment_lengths = Vec::with_capacity(segment_count);
        let mut segment_starts = Vec::with_capacity(segment_count);
        let mut total = 0.0f32;
        for pair in points.windows(2) {
            let length = pair[0].distance(pair[1]);
            segment_starts.push(total);
            segment_lengths.push(length);
            total += length;
        }

        self.points = points;
        self.segment_lengths = segment_lengths;
        self.segment_starts = segment_starts;
        self.total_length = total;
    }

    /// Alle Pfadpunkte.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Länge jedes Segments.
    pub fn segment_lengths(&self) -> &[f32] {
        &self.segment_lengths
    }

    /// Kumulativer Startoffset jedes Segments.
    pub fn segment_starts(&self) -> &[f32] {
        &self.segment_starts
    }

    /// Gesamtlänge des Pfads.
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Erster Pfadpunkt.
    pub fn start_point(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    /// Letzter Pfadpunkt.
    pub fn end_point(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// Position auf dem Pfad für einen Fortschritt (wird auf `[0, 1]` geklemmt).
    ///
    /// Sucht linear das Segment, dessen Bereich die Ziel-Distanz enthält, und
    /// interpoliert linear. Ohne passendes Segment (leerer oder degenerierter
    /// Pfad) gilt: erster Punkt für `progress < 0.5`, sonst letzter Punkt,
    /// sonst Ursprung.
    pub fn position_at(&self, progress: f32) -> Vec2 {
        let progress = progress.clamp(0.0, 1.0);
        let target = progress * self.total_length;

        for (i, (&start, &length)) in self
            .segment_starts
            .iter()
            .zip(&self.segment_lengths)
            .enumerate()
        {
            if target >= start && target <= start + length {
                let t = if length > f32::EPSILON {
                    (target - start) / length
                } else {
                    0.0
                };
                return self.points[i].lerp(self.points[i + 1], t);
            }
        }

        let fallback = if progress < 0.5 {
            self.points.first()
        } else {
            self.points.last()
        };
        fallback.copied().unwrap_or(Vec2::ZERO)
    }

    /// Fortschritt des Pfadpunkts, der `point` am nächsten liegt.
    ///
    /// Dichte Abtastung mit `PROJECTION_SAMPLES` Schritten; bei Gleichstand
    /// gewinnt der kleinste Fortschritt.
    pub fn progress_from_position(&self, point: Vec2) -> f32 {
        let mut best_progress = 0.0;
        let mut best_distance = f32::INFINITY;
        for i in 0..=PROJECTION_SAMPLES {
            let progress = i as f32 / PROJECTION_SAMPLES as f32;
            let distance = self.position_at(progress).distance(point);
            if distance < best_distance {
                best_distance = distance;
                best_progress = progress;
            }
        }
        best_progress
    }

    /// Nächster gültiger Fortschritt im Vorwärts-Fenster.
    ///
    /// Tastet `[current, min(current + max_advancement, 1)]` mit
    /// `FORWARD_WINDOW_SAMPLES` Schritten ab und liefert den am weitesten
    /// vorangeschrittenen Wert, der strikt größer als `current` ist und
    /// höchstens `tolerance` von `point` entfernt liegt.
    ///
    /// Ein ruhender Zeiger lässt den Fortschritt bei wiederholten Aufrufen bis
    /// an den Rand der Toleranz vorlaufen; weiter nicht.
    pub fn next_valid_progress(
        &self,
        point: Vec2,
        current: f32,
        max_advancement: f32,
        tolerance: f32,
    ) -> Option<f32> {
        let window_end = (current + max_advancement).min(1.0);
        if window_end <= current {
            return None;
        }

        (1..=FORWARD_WINDOW_SAMPLES)
            .rev()
            .map(|i| current + (i as f32 / FORWARD_WINDOW_SAMPLES as f32) * (window_end - current))
            .filter(|&progress| progress > current)
            .find(|&progress| self.position_at(progress).distance(point) <= tolerance)
    }

    /// Bester Korrektur-Fortschritt im Rückwärts-Fenster `[current − max_backward, current)`.
    ///
    /// Liefert den Abtastwert mit dem geringsten Abstand zu `point`, sofern er
    /// innerhalb `tolerance` liegt; bei Gleichstand gewinnt der größere
    /// Fortschritt (geringster Rückschritt).
    pub fn backward_correction(
        &self,
        point: Vec2,
        current: f32,
        max_backward: f32,
        tolerance: f32,
    ) -> Option<f32> {
        let window_start = (current - max_backward).max(0.0);
        if window_start >= current {
            return None;
        }

        let mut best: Option<(f32, f32)> = None;
        for i in 0..BACKWARD_WINDOW_SAMPLES {
            let progress =
                current - (i + 1) as f32 / BACKWARD_WINDOW_SAMPLES as f32 * (current - window_start);
            if progress >= current {
                continue;
            }
            let distance = self.position_at(progress).distance(point);
            if distance > tolerance {
                continue;
            }
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((progress, distance));
            }
        }
        best.map(|(progress, _)| progress)
    }

    /// Prüft, ob `point` höchstens `tolerance` vom Pfadpunkt bei `progress` entfernt liegt.
    pub fn is_position_on_path(&self, point: Vec2, progress: f32, tolerance: f32) -> bool {
        self.position_at(progress).distance(point) <= tolerance
    }

    /// Polylinie vom Start bis `progress` (für die Fortschrittsanzeige).
    pub fn progress_polyline(&self, progress: f32) -> Vec<Vec2> {
        if progress <= 0.0 || self.points.is_empty() {
            return Vec::new();
        }
        let progress = progress.min(1.0);
        (0..=PROGRESS_POLYLINE_SAMPLES)
            .map(|i| self.position_at(i as f32 / PROGRESS_POLYLINE_SAMPLES as f32 * progress))
            .collect()
    }
}
