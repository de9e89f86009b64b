//! Core-Geometrie: Pfad-Formen, Pfad-Geometrie, Arc-Length-Index.

pub mod path;
/// Pfad-Formen und ihre Generatoren
///
/// - PathShape: geschlossene Menge der Formen, je eine reine Generator-Funktion
/// - PathConfig: Form, Größe, Rotation und Versatz eines Pfads
pub mod path_shape;

pub use path::PathGeometry;
pub use path_shape::{rotate_points, PathConfig, PathShape, ShapeGenerator};
