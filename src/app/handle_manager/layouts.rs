//! Komfort-Erzeugung mehrerer Handles (einfach, Raster, Ring).

use super::{HandleDefinition, HandleManager};
use crate::app::presenter::DragPresenter;
use crate::core::PathShape;
use glam::Vec2;

/// Raster-Anordnung, zeilenweise befüllt.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Zentrum des Handles oben links
    pub origin: Vec2,
    /// Spalten
    pub cols: usize,
    /// Zeilen
    pub rows: usize,
    /// Abstand zwischen benachbarten Zentren
    pub spacing: f32,
    /// Formen, zyklisch verwendet
    pub shapes: Vec<PathShape>,
    /// Pfad-Größe
    pub size: f32,
    /// Rotationen (Radiant), zyklisch verwendet; leer = keine Rotation
    pub rotations: Vec<f32>,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            cols: 1,
            rows: 1,
            spacing: 200.0,
            shapes: PathShape::ALL.to_vec(),
            size: 80.0,
            rotations: Vec::new(),
        }
    }
}

/// Ring-Anordnung um ein Zentrum.
#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    /// Zentrum des Rings
    pub center: Vec2,
    /// Radius des Rings
    pub radius: f32,
    /// Anzahl der Handles
    pub count: usize,
    /// Formen, zyklisch verwendet
    pub shapes: Vec<PathShape>,
    /// Pfad-Größe
    pub size: f32,
    /// Jedes Handle um seinen Ring-Winkel drehen (zeigt nach außen)
    pub auto_rotate: bool,
}

impl Default for RingLayout {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            radius: 200.0,
            count: 4,
            shapes: PathShape::ALL.to_vec(),
            size: 80.0,
            auto_rotate: true,
        }
    }
}

impl<P: DragPresenter> HandleManager<P> {
    /// Erstellt mehrere Handles in Reihenfolge.
    pub fn create_handles(&mut self, definitions: impl IntoIterator<Item = HandleDefinition>) {
        for definition in definitions {
            self.create_handle(definition);
        }
    }

    /// Erstellt ein Handle aus Form, Größe und Rotation (Radiant).
    pub fn create_simple(
        &mut self,
        id: impl Into<String>,
        position: Vec2,
        shape: PathShape,
        size: f32,
        rotation: f32,
    ) {
        self.create_handle(HandleDefinition::simple(id, position, shape, size).with_rotation(rotation));
    }

    /// Wie `create_simple`, Rotation in Grad.
    pub fn create_simple_degrees(
        &mut self,
        id: impl Into<String>,
        position: Vec2,
        shape: PathShape,
        size: f32,
        rotation_degrees: f32,
    ) {
        self.create_simple(id, position, shape, size, rotation_degrees.to_radians());
    }

    /// Erstellt ein Raster mit IDs `grid_{row}_{col}`.
    ///
    /// Gibt die erzeugten IDs zurück; ohne Formen wird nichts erzeugt.
    pub fn create_grid(&mut self, layout: &GridLayout) -> Vec<String> {
        if layout.shapes.is_empty() {
            return Vec::new();
        }
        let mut ids = Vec::with_capacity(layout.rows * layout.cols);
        let mut index = 0;
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let position =
                    layout.origin + Vec2::new(col as f32, row as f32) * layout.spacing;
                let shape = layout.shapes[index % layout.shapes.len()];
                let rotation = if layout.rotations.is_empty() {
                    0.0
                } else {
                    layout.rotations[index % layout.rotations.len()]
                };
                let id = format!("grid_{row}_{col}");
                self.create_simple(id.clone(), position, shape, layout.size, rotation);
                ids.push(id);
                index += 1;
            }
        }
        ids
    }

    /// Erstellt einen Ring mit IDs `ring_{i}`, beginnend bei Winkel 0 (rechts).
    pub fn create_ring(&mut self, layout: &RingLayout) -> Vec<String> {
        if layout.shapes.is_empty() || layout.count == 0 {
            return Vec::new();
        }
        (0..layout.count)
            .map(|i| {
                let angle = i as f32 / layout.count as f32 * std::f32::consts::TAU;
                let position = layout.center + Vec2::from_angle(angle) * layout.radius;
                let shape = layout.shapes[i % layout.shapes.len()];
                let rotation = if layout.auto_rotate { angle } else { 0.0 };
                let id = format!("ring_{i}");
                self.create_simple(id.clone(), position, shape, layout.size, rotation);
                id
            })
            .collect()
    }
}
