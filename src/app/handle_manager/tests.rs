use super::{GridLayout, HandleDefinition, HandleManager, RingLayout};
use crate::app::drag_handle::{DragInput, FailureReason, HandleState};
use crate::app::event_log::ManagerEvent;
use crate::app::presenter::{PresenterCall, RecordingPresenter};
use crate::core::PathShape;
use crate::shared::{DragOverrides, ManagerOptions};
use approx::assert_relative_eq;
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

/// Gerade von (0,100) nach (200,100).
fn straight(id: &str) -> HandleDefinition {
    HandleDefinition::simple(id, Vec2::new(100.0, 100.0), PathShape::StraightLine, 100.0)
}

fn recording_manager() -> HandleManager<RecordingPresenter> {
    HandleManager::with_presenter(ManagerOptions::default(), RecordingPresenter::new())
}

/// Greift das Handle am Pfadstart und zieht bis `to_x`.
fn drag_to<P: crate::app::presenter::DragPresenter>(manager: &mut HandleManager<P>, to_x: f32) {
    assert!(manager.pointer_down(Vec2::new(0.0, 100.0)).is_some());
    let mut x = 0.0;
    while x <= to_x {
        manager.pointer_move(Vec2::new(x, 100.0));
        x += 2.0;
    }
}

// ── Erstellen ──

#[test]
fn test_create_handle_registers_live_entry() {
    let mut manager = recording_manager();
    manager.create_handle(straight("a"));

    assert_eq!(manager.active_count(), 1);
    let status = manager.status("a");
    assert!(status.active);
    assert!(!status.completed);
    assert_eq!(status.state, Some(HandleState::Idle));
    assert_eq!(
        manager.event_log().entries(),
        &[ManagerEvent::Created { id: "a".into() }]
    );
    assert_eq!(
        manager.presenter().calls[0],
        PresenterCall::DrawPath {
            id: "a".into(),
            point_count: 2
        }
    );
}

#[test]
fn test_create_handle_replaces_same_id() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    manager.create_handle(
        HandleDefinition::simple("a", Vec2::ZERO, PathShape::Circle, 50.0),
    );
    assert_eq!(manager.active_count(), 1);
    assert_eq!(manager.handle_states().len(), 1);
    assert_eq!(manager.handle("a").unwrap().path().points().len(), 17);
}

#[test]
fn test_overrides_are_applied_over_defaults() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a").with_overrides(DragOverrides {
        tolerance: Some(20.0),
        ..DragOverrides::default()
    }));
    let options = manager.handle("a").unwrap().options();
    assert_eq!(options.tolerance, 20.0);
    assert_eq!(options.failure_timeout_ms, 300);
}

#[test]
fn test_definition_rotation_rotates_path() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a").with_rotation_degrees(90.0));
    let start = manager.handle("a").unwrap().path().start_point().unwrap();
    assert_relative_eq!(start.x, 100.0, epsilon = 1e-3);
    assert_relative_eq!(start.y, 0.0, epsilon = 1e-3);
}

// ── Erfolg ──

#[test]
fn test_completion_removes_live_entry_but_counts_as_completed() {
    let completions = Rc::new(Cell::new(0));
    let counter = Rc::clone(&completions);
    let mut manager = recording_manager();
    manager.create_handle(straight("a").on_complete(move || counter.set(counter.get() + 1)));

    drag_to(&mut manager, 200.0);

    assert!(manager.handle("a").is_none());
    assert!(manager.engaged_id().is_none());
    assert_eq!(completions.get(), 1);
    assert_eq!(manager.active_count(), 0);
    assert_eq!(manager.completed_count(), 1);
    assert!(manager.are_all_completed());
    assert!(manager.status("a").completed);

    let presenter = manager.presenter();
    assert_eq!(
        presenter.count(|c| matches!(c, PresenterCall::Completion { .. })),
        1
    );
    assert_eq!(
        presenter.calls.last(),
        Some(&PresenterCall::Teardown { id: "a".into() })
    );
    assert!(presenter.count(|c| matches!(c, PresenterCall::Pulse { .. })) > 0);
}

#[test]
fn test_are_all_completed_tracks_every_definition() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    assert!(manager.are_all_completed());

    manager.create_handle(straight("a"));
    manager.create_handle(
        HandleDefinition::simple("b", Vec2::new(100.0, 400.0), PathShape::StraightLine, 100.0),
    );
    drag_to(&mut manager, 200.0);
    assert_eq!(manager.completed_count(), 1);
    assert!(!manager.are_all_completed());
}

// ── Fehlschlag / Neuerstellung ──

#[test]
fn test_failure_schedules_recreation_after_delay() {
    let failures = Rc::new(Cell::new(0));
    let counter = Rc::clone(&failures);
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(
        straight("a")
            .with_auto_recreate(true)
            .with_recreate_delay_ms(1000)
            .on_failure(move || counter.set(counter.get() + 1)),
    );

    drag_to(&mut manager, 50.0);
    manager.pointer_up();

    assert_eq!(failures.get(), 1);
    assert!(manager.handle("a").is_none());
    assert!(manager.is_recreate_pending("a"));
    let status = manager.status("a");
    assert!(!status.active);
    assert!(!status.completed);
    assert_eq!(manager.completed_count(), 0);

    manager.advance(999);
    assert!(manager.handle("a").is_none());

    manager.advance(1);
    let handle = manager.handle("a").expect("neu erstellt");
    assert_eq!(handle.state(), HandleState::Idle);
    assert_eq!(handle.progress(), 0.0);
    assert!(!manager.is_recreate_pending("a"));
    assert!(matches!(
        manager.event_log().entries().last(),
        Some(ManagerEvent::Recreated { id }) if id == "a"
    ));
}

#[test]
fn test_recreated_handle_keeps_callbacks() {
    let failures = Rc::new(Cell::new(0));
    let counter = Rc::clone(&failures);
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a").on_failure(move || counter.set(counter.get() + 1)));

    for _ in 0..2 {
        drag_to(&mut manager, 20.0);
        manager.pointer_up();
        manager.advance(1000);
    }
    assert_eq!(failures.get(), 2);
    assert!(manager.handle("a").is_some());
}

#[test]
fn test_failure_without_recreate_removes_definition() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a").with_auto_recreate(false));
    drag_to(&mut manager, 20.0);
    manager.global_pointer_up();

    assert!(manager.handle("a").is_none());
    assert!(manager.definition("a").is_none());
    assert!(manager.handle_states().is_empty());
    assert!(matches!(
        manager.event_log().entries().last(),
        Some(ManagerEvent::Failed {
            reason: FailureReason::GlobalRelease,
            recreate_in_ms: None,
            ..
        })
    ));
}

#[test]
fn test_manager_default_recreate_settings_apply() {
    let options = ManagerOptions {
        default_auto_recreate: true,
        default_recreate_delay_ms: 250,
        ..ManagerOptions::default()
    };
    let mut manager = HandleManager::new(options);
    manager.create_handle(straight("a"));
    drag_to(&mut manager, 20.0);
    manager.pointer_up();
    manager.advance(250);
    assert!(manager.handle("a").is_some());
}

#[test]
fn test_off_path_timeout_fails_via_advance() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    manager.pointer_down(Vec2::new(0.0, 100.0));
    manager.pointer_move(Vec2::new(60.0, 300.0));
    assert_eq!(manager.pending_timer_count(), 1);

    manager.advance(299);
    assert!(manager.handle("a").is_some());
    manager.advance(1);
    assert!(manager.handle("a").is_none());
    assert!(matches!(
        manager.event_log().entries().last(),
        Some(ManagerEvent::Failed {
            reason: FailureReason::Timeout,
            recreate_in_ms: Some(1000),
            ..
        })
    ));
}

#[test]
fn test_timers_scheduled_during_advance_fire_in_same_call() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    manager.pointer_down(Vec2::new(0.0, 100.0));
    manager.pointer_move(Vec2::new(60.0, 300.0));

    // Fehler bei 300 ms, Neuerstellung bei 1300 ms
    manager.advance(1500);
    assert_eq!(manager.now_ms(), 1500);
    assert_eq!(
        manager.handle("a").map(|h| h.state()),
        Some(HandleState::Idle)
    );
}

#[test]
fn test_returning_on_path_avoids_timeout() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    manager.pointer_down(Vec2::new(0.0, 100.0));
    manager.pointer_move(Vec2::new(60.0, 300.0));
    manager.advance(200);
    manager.pointer_move(Vec2::new(2.0, 100.0));
    manager.advance(1000);
    assert_eq!(
        manager.handle("a").map(|h| h.state()),
        Some(HandleState::Dragging)
    );
    assert_eq!(manager.pending_timer_count(), 0);
}

#[test]
fn test_remove_cancels_pending_recreation() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    drag_to(&mut manager, 20.0);
    manager.pointer_up();
    assert!(manager.is_recreate_pending("a"));

    assert!(manager.remove("a"));
    assert_eq!(manager.pending_timer_count(), 0);
    manager.advance(5000);
    assert!(manager.handle("a").is_none());
    assert!(manager.definition("a").is_none());
}

#[test]
fn test_recreate_skipped_when_id_recreated_manually() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    drag_to(&mut manager, 20.0);
    manager.pointer_up();

    manager.create_handle(straight("a"));
    assert!(!manager.is_recreate_pending("a"));
    manager.advance(1000);
    assert_eq!(manager.active_count(), 1);
    assert_eq!(
        manager
            .event_log()
            .for_id("a")
            .filter(|e| matches!(e, ManagerEvent::Recreated { .. }))
            .count(),
        0
    );
}

#[test]
fn test_recreated_handle_uses_current_scale() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    drag_to(&mut manager, 20.0);
    manager.pointer_up();

    manager.update_layout(2.0);
    manager.advance(1000);
    let handle = manager.handle("a").unwrap();
    assert_eq!(handle.layout().map(|l| l.scale), Some(2.0));
    assert_relative_eq!(handle.path().total_length(), 400.0, epsilon = 1e-3);
}

// ── Layout ──

#[test]
fn test_update_layout_keeps_progress() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    drag_to(&mut manager, 40.0);
    let progress = manager.handle("a").unwrap().progress();
    assert!(progress > 0.0);

    manager.update_layout(2.0);
    let handle = manager.handle("a").unwrap();
    assert_eq!(handle.progress(), progress);
    assert_eq!(handle.path().end_point(), Some(Vec2::new(300.0, 100.0)));
    assert_eq!(manager.scale(), 2.0);
}

// ── Zeiger-Routing ──

#[test]
fn test_pointer_down_outside_any_handle_is_ignored() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    assert!(manager.pointer_down(Vec2::new(100.0, 100.0)).is_none());
    assert!(manager.engaged_id().is_none());
}

#[test]
fn test_pointer_down_engages_only_one_handle() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    manager.create_handle(straight("b"));
    assert_eq!(manager.pointer_down(Vec2::new(0.0, 100.0)).as_deref(), Some("a"));
    assert!(manager.pointer_down(Vec2::new(0.0, 100.0)).is_none());
    assert_eq!(manager.engaged_id(), Some("a"));
    assert_eq!(manager.status("b").state, Some(HandleState::Idle));
}

#[test]
fn test_direct_engage_keeps_first_engagement() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a").with_auto_recreate(false));
    manager.create_handle(straight("b").with_auto_recreate(false));

    assert!(manager.input("a", DragInput::Engage));
    assert!(!manager.input("b", DragInput::Engage));
    assert_eq!(manager.engaged_id(), Some("a"));
    assert_eq!(manager.status("b").state, Some(HandleState::Idle));

    manager.global_pointer_up();
    assert!(manager.handle("a").is_none());
    assert!(manager.engaged_id().is_none());
    assert_eq!(manager.status("b").state, Some(HandleState::Idle));
    assert_eq!(
        manager.event_log().entries().last(),
        Some(&ManagerEvent::Failed {
            id: "a".to_owned(),
            reason: FailureReason::GlobalRelease,
            recreate_in_ms: None,
        })
    );
}

#[test]
fn test_pointer_move_without_engaged_handle_is_noop() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handle(straight("a"));
    manager.pointer_move(Vec2::new(10.0, 100.0));
    manager.pointer_up();
    manager.global_pointer_up();
    assert_eq!(manager.status("a").state, Some(HandleState::Idle));
}

// ── Komfort-Erzeugung ──

#[test]
fn test_create_grid_ids_positions_and_cycles() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    let ids = manager.create_grid(&GridLayout {
        origin: Vec2::new(100.0, 100.0),
        cols: 3,
        rows: 2,
        spacing: 150.0,
        shapes: vec![PathShape::Circle, PathShape::Zigzag],
        size: 60.0,
        rotations: vec![0.0, 1.0],
    });

    assert_eq!(
        ids,
        vec!["grid_0_0", "grid_0_1", "grid_0_2", "grid_1_0", "grid_1_1", "grid_1_2"]
    );
    let definition = manager.definition("grid_1_2").unwrap();
    assert_eq!(definition.position, Vec2::new(400.0, 250.0));
    // Index 5 → Zigzag, Rotation 1.0
    assert_eq!(definition.path_config.shape, Some(PathShape::Zigzag));
    assert_eq!(definition.rotation, 1.0);
    assert_eq!(
        manager.definition("grid_1_0").unwrap().path_config.shape,
        Some(PathShape::Zigzag)
    );
}

#[test]
fn test_create_grid_without_shapes_creates_nothing() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    let ids = manager.create_grid(&GridLayout {
        shapes: Vec::new(),
        ..GridLayout::default()
    });
    assert!(ids.is_empty());
    assert_eq!(manager.active_count(), 0);
}

#[test]
fn test_create_ring_rotates_outward() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    let ids = manager.create_ring(&RingLayout {
        center: Vec2::new(500.0, 500.0),
        radius: 200.0,
        count: 4,
        shapes: vec![PathShape::CurveUp],
        size: 80.0,
        auto_rotate: true,
    });
    assert_eq!(ids, vec!["ring_0", "ring_1", "ring_2", "ring_3"]);

    let quarter = manager.definition("ring_1").unwrap();
    assert_relative_eq!(quarter.position.x, 500.0, epsilon = 1e-3);
    assert_relative_eq!(quarter.position.y, 700.0, epsilon = 1e-3);
    assert_relative_eq!(quarter.rotation, std::f32::consts::FRAC_PI_2);
}

#[test]
fn test_create_ring_without_auto_rotate() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_ring(&RingLayout {
        count: 3,
        auto_rotate: false,
        ..RingLayout::default()
    });
    assert!(manager
        .handle_states()
        .keys()
        .all(|id| manager.definition(id).unwrap().rotation == 0.0));
}

#[test]
fn test_create_simple_degrees_converts_to_radians() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_simple_degrees("d", Vec2::ZERO, PathShape::Heart, 80.0, 180.0);
    assert_relative_eq!(
        manager.definition("d").unwrap().rotation,
        std::f32::consts::PI
    );
}

#[test]
fn test_handle_states_follow_registration_order() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    manager.create_handles([
        straight("z"),
        straight("a"),
        straight("m"),
    ]);
    let ids: Vec<_> = manager.handle_states().keys().cloned().collect();
    assert_eq!(ids, vec!["z", "a", "m"]);
}

#[test]
fn test_remove_all_clears_everything() {
    let mut manager = recording_manager();
    manager.create_handles([straight("a"), straight("b")]);
    drag_to(&mut manager, 20.0);
    manager.pointer_up();

    manager.remove_all();
    assert_eq!(manager.active_count(), 0);
    assert!(manager.handle_states().is_empty());
    assert_eq!(manager.pending_timer_count(), 0);
    assert!(manager.are_all_completed());
    assert!(
        manager
            .presenter()
            .count(|c| matches!(c, PresenterCall::Teardown { .. }))
            >= 2
    );
}

#[test]
fn test_remove_unknown_id_returns_false() {
    let mut manager = HandleManager::new(ManagerOptions::default());
    assert!(!manager.remove("missing"));
    assert!(manager.event_log().is_empty());
}
