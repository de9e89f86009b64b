//! Definition eines verwalteten Drag-Handles.

use crate::core::{PathConfig, PathShape};
use crate::shared::DragOverrides;
use glam::Vec2;
use std::rc::Rc;

/// Geteilter Callback einer Definition.
///
/// `Rc`, weil die Definition bei jeder Neuerstellung erneut verdrahtet wird.
pub type DefinitionCallback = Rc<dyn Fn()>;

/// Alles, was zum (Neu-)Erstellen eines Handles nötig ist.
#[derive(Clone)]
pub struct HandleDefinition {
    /// Eindeutige ID in der Registry
    pub id: String,
    /// Zentrum des Pfads
    pub position: Vec2,
    /// Pfad-Form und -Transformation
    pub path_config: PathConfig,
    /// Abweichungen von den Standard-`DragOptions`
    pub overrides: DragOverrides,
    /// Rotation des gesamten Handles (Radiant), additiv zu `path_config.rotation`
    pub rotation: f32,
    /// Nach Fehlschlag neu erstellen (`None` = Manager-Default)
    pub auto_recreate: Option<bool>,
    /// Verzögerung bis zur Neuerstellung (`None` = Manager-Default)
    pub recreate_delay_ms: Option<u64>,
    /// Aufrufer-Callback bei Erfolg
    pub on_complete: Option<DefinitionCallback>,
    /// Aufrufer-Callback bei Fehlschlag
    pub on_failure: Option<DefinitionCallback>,
}

impl std::fmt::Debug for HandleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleDefinition")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("path_config", &self.path_config)
            .field("overrides", &self.overrides)
            .field("rotation", &self.rotation)
            .field("auto_recreate", &self.auto_recreate)
            .field("recreate_delay_ms", &self.recreate_delay_ms)
            .field("on_complete", &self.on_complete.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

impl HandleDefinition {
    /// Definition mit Standardwerten für alles außer Position und Pfad.
    pub fn new(id: impl Into<String>, position: Vec2, path_config: PathConfig) -> Self {
        Self {
            id: id.into(),
            position,
            path_config,
            overrides: DragOverrides::default(),
            rotation: 0.0,
            auto_recreate: None,
            recreate_delay_ms: None,
            on_complete: None,
            on_failure: None,
        }
    }

    /// Kurzform: Form und Größe ohne weitere Transformation.
    pub fn simple(id: impl Into<String>, position: Vec2, shape: PathShape, size: f32) -> Self {
        Self::new(id, position, PathConfig::new(shape, size))
    }

    /// Setzt die Handle-Rotation (Radiant).
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Setzt die Handle-Rotation in Grad.
    pub fn with_rotation_degrees(self, degrees: f32) -> Self {
        self.with_rotation(degrees.to_radians())
    }

    /// Setzt Options-Überschreibungen.
    pub fn with_overrides(mut self, overrides: DragOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Legt fest, ob nach Fehlschlag neu erstellt wird.
    pub fn with_auto_recreate(mut self, auto_recreate: bool) -> Self {
        self.auto_recreate = Some(auto_recreate);
        self
    }

    /// Setzt die Verzögerung bis zur Neuerstellung.
    pub fn with_recreate_delay_ms(mut self, delay_ms: u64) -> Self {
        self.recreate_delay_ms = Some(delay_ms);
        self
    }

    /// Setzt den Erfolgs-Callback.
    pub fn on_complete(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_complete = Some(Rc::new(callback));
        self
    }

    /// Setzt den Fehlschlag-Callback.
    pub fn on_failure(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_failure = Some(Rc::new(callback));
        self
    }
}
