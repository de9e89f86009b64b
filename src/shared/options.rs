//! Zentrale Konfiguration für Drag-Handles und den Handle-Manager.
//!
//! `ManagerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::Context;
use serde::{Deserialize, Serialize};

// ── Validierung ─────────────────────────────────────────────────────

/// Maximaler Abstand (Pixel) zur Pfadmitte, der noch als "auf dem Pfad" gilt.
pub const DEFAULT_TOLERANCE: f32 = 60.0;
/// Maximal erlaubter Rückschritt als Anteil des Pfads.
pub const DEFAULT_MAX_BACKWARD_MOVEMENT: f32 = 0.05;
/// Karenzzeit abseits des Pfads bis zum automatischen Fehlschlag.
pub const DEFAULT_FAILURE_TIMEOUT_MS: u64 = 300;
/// Maximaler Vorwärtsschritt pro Zeiger-Sample (Anteil des Pfads).
pub const MAX_ADVANCEMENT_PER_SAMPLE: f32 = 0.03;
/// Ab diesem Fortschritt gilt der Pfad als abgeschlossen.
///
/// Kleiner als 1.0, um Interpolationsfehler am Pfadende abzufangen.
pub const COMPLETION_THRESHOLD: f32 = 0.98;

// ── Handle ──────────────────────────────────────────────────────────

/// Greif-Radius des Handles in Pixeln (vor Skalierung).
pub const HANDLE_HIT_RADIUS: f32 = 35.0;

// ── Manager ─────────────────────────────────────────────────────────

/// Fehlgeschlagene Handles standardmäßig neu erstellen.
pub const DEFAULT_AUTO_RECREATE: bool = true;
/// Standard-Verzögerung bis zur Neuerstellung.
pub const DEFAULT_RECREATE_DELAY_MS: u64 = 1000;

/// Validierungsprofil für Zeigerbewegungen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Strikt sequentiell: begrenztes Vorwärts-Fenster pro Sample
    #[default]
    Sequential,
    /// Freie Projektion auf den nächstgelegenen Pfadpunkt
    Projection,
}

/// Konfiguration eines einzelnen Drag-Handles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragOptions {
    /// Toleranz in Pixeln
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// Maximaler Rückschritt (Anteil des Pfads)
    #[serde(default = "default_max_backward_movement")]
    pub max_backward_movement: f32,
    /// Karenzzeit abseits des Pfads
    #[serde(default = "default_failure_timeout_ms")]
    pub failure_timeout_ms: u64,
    /// Validierungsprofil
    #[serde(default)]
    pub validation: ValidationMode,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_backward_movement: DEFAULT_MAX_BACKWARD_MOVEMENT,
            failure_timeout_ms: DEFAULT_FAILURE_TIMEOUT_MS,
            validation: ValidationMode::Sequential,
        }
    }
}

/// Serde-Default für `tolerance`.
fn default_tolerance() -> f32 {
    DEFAULT_TOLERANCE
}

/// Serde-Default für `max_backward_movement`.
fn default_max_backward_movement() -> f32 {
    DEFAULT_MAX_BACKWARD_MOVEMENT
}

/// Serde-Default für `failure_timeout_ms`.
fn default_failure_timeout_ms() -> u64 {
    DEFAULT_FAILURE_TIMEOUT_MS
}

/// Teilweise Überschreibung der `DragOptions` pro Handle-Definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragOverrides {
    /// Abweichende Toleranz
    #[serde(default)]
    pub tolerance: Option<f32>,
    /// Abweichender maximaler Rückschritt
    #[serde(default)]
    pub max_backward_movement: Option<f32>,
    /// Abweichende Karenzzeit
    #[serde(default)]
    pub failure_timeout_ms: Option<u64>,
    /// Abweichendes Validierungsprofil
    #[serde(default)]
    pub validation: Option<ValidationMode>,
}

impl DragOverrides {
    /// Legt die gesetzten Werte über `base`.
    pub fn apply_to(&self, base: DragOptions) -> DragOptions {
        DragOptions {
            tolerance: self.tolerance.unwrap_or(base.tolerance),
            max_backward_movement: self
                .max_backward_movement
                .unwrap_or(base.max_backward_movement),
            failure_timeout_ms: self.failure_timeout_ms.unwrap_or(base.failure_timeout_ms),
            validation: self.validation.unwrap_or(base.validation),
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Manager-Optionen.
/// Wird als `path_trace.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerOptions {
    /// Fehlgeschlagene Handles standardmäßig neu erstellen
    #[serde(default = "default_auto_recreate")]
    pub default_auto_recreate: bool,
    /// Standard-Verzögerung bis zur Neuerstellung
    #[serde(default = "default_recreate_delay_ms")]
    pub default_recreate_delay_ms: u64,
    /// Standard-Konfiguration neuer Handles
    #[serde(default)]
    pub default_drag: DragOptions,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            default_auto_recreate: DEFAULT_AUTO_RECREATE,
            default_recreate_delay_ms: DEFAULT_RECREATE_DELAY_MS,
            default_drag: DragOptions::default(),
        }
    }
}

/// Serde-Default für `default_auto_recreate`.
fn default_auto_recreate() -> bool {
    DEFAULT_AUTO_RECREATE
}

/// Serde-Default für `default_recreate_delay_ms`.
fn default_recreate_delay_ms() -> u64 {
    DEFAULT_RECREATE_DELAY_MS
}

impl ManagerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("Schreiben nach {} fehlgeschlagen", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("path_trace"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("path_trace.toml")
    }
}
