//! Path Trace Simulator.
//!
//! Headless-Durchlauf ohne Darstellung: erstellt ein Raster aller Pfad-Formen,
//! fährt jeden Pfad per Skript ab und protokolliert das Ergebnis.

use anyhow::Context;
use path_trace::app::{GridLayout, ManagerEvent};
use path_trace::{HandleManager, ManagerOptions, PathShape};

/// Abstand zwischen zwei Zeiger-Samples (≈ 60 Hz).
const FRAME_MS: u64 = 16;
/// Zeiger-Samples pro Pfad.
const SAMPLES_PER_PATH: usize = 120;

fn main() -> anyhow::Result<()> {
    SimRunner::run()
}

struct SimRunner;

impl SimRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "Path Trace Simulator v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let config_path = ManagerOptions::config_path();
        let options = ManagerOptions::load_from_file(&config_path);
        if std::env::args().any(|arg| arg == "--save-options") {
            options
                .save_to_file(&config_path)
                .context("Optionen konnten nicht gespeichert werden")?;
        }
        let recreate_delay_ms = options.default_recreate_delay_ms;

        let mut manager = HandleManager::new(options);
        let ids = manager.create_grid(&GridLayout {
            origin: glam::Vec2::new(200.0, 200.0),
            cols: 4,
            rows: 2,
            spacing: 300.0,
            shapes: PathShape::ALL.to_vec(),
            size: 80.0,
            rotations: Vec::new(),
        });
        log::info!("{} Handles erstellt", ids.len());

        // Abgebrochener Versuch auf dem ersten Handle: Fehlschlag + Neuerstellung
        if let Some(first) = ids.first() {
            Self::trace(&mut manager, first, 0.4)?;
            manager.pointer_up();
            manager.advance(recreate_delay_ms);
        }

        for id in &ids {
            Self::trace(&mut manager, id, 1.0)?;
        }

        for (id, status) in manager.handle_states() {
            log::info!(
                "{id}: aktiv={} abgeschlossen={}",
                status.active,
                status.completed
            );
        }
        let recreated = manager
            .event_log()
            .entries()
            .iter()
            .filter(|e| matches!(e, ManagerEvent::Recreated { .. }))
            .count();
        log::info!(
            "{} von {} abgeschlossen, {} Neuerstellung(en), Simulationszeit {} ms",
            manager.completed_count(),
            ids.len(),
            recreated,
            manager.now_ms()
        );

        anyhow::ensure!(
            manager.are_all_completed(),
            "Nicht alle Pfade abgeschlossen"
        );
        Ok(())
    }

    /// Greift das Handle `id` und fährt dessen Pfad bis `until` ab.
    fn trace(manager: &mut HandleManager, id: &str, until: f32) -> anyhow::Result<()> {
        let handle = manager
            .handle(id)
            .with_context(|| format!("Kein lebendes Handle '{id}'"))?;
        let path = handle.path().clone();
        let start = handle.position();

        let engaged = manager
            .pointer_down(start)
            .with_context(|| format!("Handle '{id}' nicht greifbar"))?;
        log::debug!("Handle {engaged} gegriffen");

        for step in 0..=SAMPLES_PER_PATH {
            let progress = step as f32 / SAMPLES_PER_PATH as f32 * until;
            manager.pointer_move(path.position_at(progress));
            manager.advance(FRAME_MS);
            if manager.engaged_id().is_none() {
                break;
            }
        }
        Ok(())
    }
}
