//! Pfad-Formen und ihre Generatoren.
//!
//! Jede Form ist eine reine Funktion `(center, size) → Punktfolge`. Neue Formen
//! werden über eine neue Variante in `PathShape` und einen Eintrag in
//! `PathShape::generator` ergänzt.

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};
use std::f32::consts::TAU;

/// Anzahl Schritte der Spirale.
pub const SPIRAL_STEPS: usize = 20;
/// Windungen der Spirale.
pub const SPIRAL_TURNS: f32 = 2.0;
/// Anzahl Zacken-Segmente.
pub const ZIGZAG_SEGMENTS: usize = 6;
/// Anzahl Schritte des Kreises.
pub const CIRCLE_STEPS: usize = 16;
/// Anzahl Schritte des Herzens.
pub const HEART_STEPS: usize = 30;

/// Verfügbare Pfad-Formen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathShape {
    /// Bogen von links unten nach rechts oben
    #[default]
    CurveUp,
    /// Bogen von links oben nach rechts unten
    CurveDown,
    /// Archimedische Spirale von innen nach außen
    Spiral,
    /// Zickzack-Linie
    Zigzag,
    /// Geschlossener Kreis
    Circle,
    /// Horizontale Gerade
    StraightLine,
    /// Diagonale S-Kurve
    SCurve,
    /// Herz-Kurve
    Heart,
}

/// Signatur eines Form-Generators.
pub type ShapeGenerator = fn(Vec2, f32) -> Vec<Vec2>;

impl PathShape {
    /// Alle Formen in Deklarationsreihenfolge.
    pub const ALL: [PathShape; 8] = [
        PathShape::CurveUp,
        PathShape::CurveDown,
        PathShape::Spiral,
        PathShape::Zigzag,
        PathShape::Circle,
        PathShape::StraightLine,
        PathShape::SCurve,
        PathShape::Heart,
    ];

    /// Gibt den Generator dieser Form zurück.
    pub fn generator(self) -> ShapeGenerator {
        match self {
            PathShape::CurveUp => curve_up,
            PathShape::CurveDown => curve_down,
            PathShape::Spiral => spiral,
            PathShape::Zigzag => zigzag,
            PathShape::Circle => circle,
            PathShape::StraightLine => straight_line,
            PathShape::SCurve => s_curve,
            PathShape::Heart => heart,
        }
    }

    /// Erzeugt die Punktfolge dieser Form um `center`.
    pub fn generate(self, center: Vec2, size: f32) -> Vec<Vec2> {
        (self.generator())(center, size)
    }

    /// Kanonischer Tag (snake_case), identisch zur TOML-Darstellung.
    pub fn tag(self) -> &'static str {
        match self {
            PathShape::CurveUp => "curve_up",
            PathShape::CurveDown => "curve_down",
            PathShape::Spiral => "spiral",
            PathShape::Zigzag => "zigzag",
            PathShape::Circle => "circle",
            PathShape::StraightLine => "straight_line",
            PathShape::SCurve => "s_curve",
            PathShape::Heart => "heart",
        }
    }

    /// Parst einen Form-Tag. Unbekannte Tags fallen auf `CurveUp` zurück.
    ///
    /// Akzeptiert snake_case (`straight_line`) und camelCase (`straightLine`),
    /// zusätzlich `curved_up`/`curved_down`.
    pub fn from_tag(tag: &str) -> Self {
        let normalized: String = tag
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "curveup" | "curvedup" => PathShape::CurveUp,
            "curvedown" | "curveddown" => PathShape::CurveDown,
            "spiral" => PathShape::Spiral,
            "zigzag" => PathShape::Zigzag,
            "circle" => PathShape::Circle,
            "straightline" | "line" => PathShape::StraightLine,
            "scurve" => PathShape::SCurve,
            "heart" => PathShape::Heart,
            _ => {
                log::warn!("Unbekannte Pfad-Form '{}', verwende curve_up", tag);
                PathShape::CurveUp
            }
        }
    }
}

/// Konfiguration eines Pfads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Form; `None` bedeutet Standard-Form (`CurveUp`)
    #[serde(default, deserialize_with = "deserialize_shape")]
    pub shape: Option<PathShape>,
    /// Grundgröße in Pixeln (vor Skalierung), muss > 0 sein
    pub size: f32,
    /// Rotation in Radiant um das (verschobene) Zentrum
    #[serde(default)]
    pub rotation: f32,
    /// Versatz des Zentrums in X (vor Skalierung)
    #[serde(default)]
    pub offset_x: f32,
    /// Versatz des Zentrums in Y (vor Skalierung)
    #[serde(default)]
    pub offset_y: f32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self::new(PathShape::CurveUp, 100.0)
    }
}

impl PathConfig {
    /// Erstellt eine Konfiguration ohne Rotation und Versatz.
    pub fn new(shape: PathShape, size: f32) -> Self {
        Self {
            shape: Some(shape),
            size,
            rotation: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Setzt die Rotation (Radiant).
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Setzt den Versatz des Zentrums.
    pub fn with_offset(mut self, offset_x: f32, offset_y: f32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Effektive Form (Fallback `CurveUp`).
    pub fn resolved_shape(&self) -> PathShape {
        self.shape.unwrap_or_default()
    }

    /// Erzeugt die Punktfolge für `center` und Skalierung `scale`.
    ///
    /// `scale` multipliziert Größe und Versatz. Die Rotation dreht alle Punkte
    /// starr um das verschobene Zentrum.
    pub fn generate_points(&self, center: Vec2, scale: f32) -> Vec<Vec2> {
        let size = self.size * scale;
        let pivot = center + Vec2::new(self.offset_x, self.offset_y) * scale;
        let points = self.resolved_shape().generate(pivot, size);
        if self.rotation != 0.0 {
            rotate_points(&points, pivot, self.rotation)
        } else {
            points
        }
    }
}

/// Liest den Form-Tag tolerant über `PathShape::from_tag`.
fn deserialize_shape<'de, D>(deserializer: D) -> Result<Option<PathShape>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.map(|t| PathShape::from_tag(&t)))
}

/// Dreht alle Punkte um `pivot` (Standard-2D-Rotationsmatrix).
pub fn rotate_points(points: &[Vec2], pivot: Vec2, angle: f32) -> Vec<Vec2> {
    let rotation = Vec2::from_angle(angle);
    points
        .iter()
        .map(|&p| pivot + rotation.rotate(p - pivot))
        .collect()
}

// ── Generatoren ─────────────────────────────────────────────────────

fn curve_up(c: Vec2, size: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(c.x - size, c.y + size),
        Vec2::new(c.x - size * 0.8, c.y + size * 0.6),
        Vec2::new(c.x - size * 0.4, c.y + size * 0.2),
        Vec2::new(c.x, c.y - size * 0.2),
        Vec2::new(c.x + size * 0.4, c.y - size * 0.6),
        Vec2::new(c.x + size * 0.8, c.y - size),
        Vec2::new(c.x + size, c.y - size * 1.4),
    ]
}

fn curve_down(c: Vec2, size: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(c.x - size, c.y - size),
        Vec2::new(c.x - size * 0.8, c.y - size * 0.6),
        Vec2::new(c.x - size * 0.4, c.y - size * 0.2),
        Vec2::new(c.x, c.y + size * 0.2),
        Vec2::new(c.x + size * 0.4, c.y + size * 0.6),
        Vec2::new(c.x + size * 0.8, c.y + size),
        Vec2::new(c.x + size, c.y + size * 1.4),
    ]
}

fn spiral(c: Vec2, size: f32) -> Vec<Vec2> {
    (0..=SPIRAL_STEPS)
        .map(|i| {
            let t = i as f32 / SPIRAL_STEPS as f32;
            c + Vec2::from_angle(t * SPIRAL_TURNS * TAU) * (t * size)
        })
        .collect()
}

fn zigzag(c: Vec2, size: f32) -> Vec<Vec2> {
    (0..=ZIGZAG_SEGMENTS)
        .map(|i| {
            let x = c.x + (i as f32 / ZIGZAG_SEGMENTS as f32 - 0.5) * size * 2.0;
            let y = if i % 2 == 0 {
                c.y - size * 0.5
            } else {
                c.y + size * 0.5
            };
            Vec2::new(x, y)
        })
        .collect()
}

fn circle(c: Vec2, size: f32) -> Vec<Vec2> {
    (0..=CIRCLE_STEPS)
        .map(|i| c + Vec2::from_angle(i as f32 / CIRCLE_STEPS as f32 * TAU) * size)
        .collect()
}

fn straight_line(c: Vec2, size: f32) -> Vec<Vec2> {
    vec![Vec2::new(c.x - size, c.y), Vec2::new(c.x + size, c.y)]
}

fn s_curve(c: Vec2, size: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(c.x - size, c.y + size),
        Vec2::new(c.x - size * 0.5, c.y + size * 0.5),
        c,
        Vec2::new(c.x + size * 0.5, c.y - size * 0.5),
        Vec2::new(c.x + size, c.y - size),
    ]
}

/// x = 16·sin³(t), y = 13·cos(t) − 5·cos(2t) − 2·cos(3t) − cos(4t)
fn heart(c: Vec2, size: f32) -> Vec<Vec2> {
    let scale = size / 16.0;
    (0..=HEART_STEPS)
        .map(|i| {
            let t = i as f32 / HEART_STEPS as f32 * TAU;
            let hx = 16.0 * t.sin().powi(3);
            let hy = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            // Y gespiegelt (Screen-Koordinaten)
            Vec2::new(c.x + hx * scale, c.y - hy * scale)
        })
        .collect()
}
