use ahash::AHashSet;
use chrono::{TimeZone, Utc};
use rosary_bridge::{CameraTarget, ChimeCue, Effect, InboundEvent};
use rosary_ids::{ItemID, NodeID};
use rosary_io::{DisabledStorage, MemoryStorage, SessionStorage};
use rosary_project::ProjectConfig;
use rosary_runtime::{
    FixedClock, NavigationError, Runtime, SCHEMA_VERSION, SelectionPhase, SessionRecord,
};
use rosary_scene::{BeadRole, LayoutColors, PathSlot, Scene, Shape, SlotKind};
use rosary_structs::{CameraPose, Color, Ray, Transform3D, Vector3};
use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

const KEY: &str = "currentState";

#[derive(Clone, Default)]
struct SharedStorage(Rc<RefCell<MemoryStorage>>);

impl SharedStorage {
    fn stored(&self) -> Option<serde_json::Value> {
        let raw = self.0.borrow().get(KEY)?.to_string();
        serde_json::from_str(&raw).ok()
    }
}

impl SessionStorage for SharedStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        self.0.borrow().read(key)
    }
    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.0.borrow_mut().write(key, value)
    }
    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.0.borrow_mut().remove(key)
    }
}

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
}

fn config() -> ProjectConfig {
    ProjectConfig::default_for_name("Scenarios")
}

fn boot(storage: &SharedStorage) -> Runtime {
    Runtime::boot(config(), Box::new(storage.clone()), Box::new(clock()), 16.0 / 9.0).unwrap()
}

fn boot_five(storage: &SharedStorage) -> Runtime {
    Runtime::boot_with_layout(
        config(),
        Box::new(storage.clone()),
        Box::new(clock()),
        1.0,
        five_beads,
    )
    .unwrap()
}

/// Cross group, three beads, centre bead; all on the line y = 1, behind them a chain.
fn five_beads(scene: &mut Scene, colors: &LayoutColors) -> Vec<PathSlot> {
    scene.add_mesh(
        rosary_ids::NodeID::nil(),
        "chain",
        Transform3D::from_position(Vector3::new(0.0, 1.0, -2.0)),
        Shape::Cylinder {
            radius: 0.04,
            height: 12.0,
        },
        colors.chain,
    );

    let mut slots = Vec::new();
    let cross = scene.add_group(
        rosary_ids::NodeID::nil(),
        "cross",
        Transform3D::from_position(Vector3::new(-4.0, 1.0, 0.0)),
    );
    let parts = vec![
        scene.add_mesh(
            cross,
            "cross_v",
            Transform3D::IDENTITY,
            Shape::Box {
                size: Vector3::new(0.2, 1.5, 0.2),
            },
            colors.cross,
        ),
        scene.add_mesh(
            cross,
            "cross_h",
            Transform3D::from_position(Vector3::new(0.0, 0.25, 0.0)),
            Shape::Box {
                size: Vector3::new(1.0, 0.2, 0.2),
            },
            colors.cross,
        ),
    ];
    slots.push(PathSlot {
        role: BeadRole::Cross,
        kind: SlotKind::Group { root: cross, parts },
    });

    for (x, role) in [
        (-2.0, BeadRole::OurFather),
        (0.0, BeadRole::HailMary),
        (2.0, BeadRole::HailMary),
        (4.0, BeadRole::HailHolyQueen),
    ] {
        let node = scene.add_mesh(
            rosary_ids::NodeID::nil(),
            "bead",
            Transform3D::from_position(Vector3::new(x, 1.0, 0.0)),
            Shape::Sphere { radius: 0.5 },
            colors.for_role(role),
        );
        slots.push(PathSlot {
            role,
            kind: SlotKind::Single(node),
        });
    }
    slots
}

fn drain(runtime: &mut Runtime) -> Vec<Effect> {
    let mut out = Vec::new();
    runtime.drain_effects(&mut out);
    out
}

fn settle(runtime: &mut Runtime) {
    for _ in 0..100 {
        if !runtime.camera().is_animating() {
            break;
        }
        runtime.update(0.1);
    }
}

fn toward(x: f32, y: f32) -> Ray {
    Ray::new(Vector3::new(x, y, 50.0), Vector3::new(0.0, 0.0, -1.0)).unwrap()
}

fn last_camera_target(effects: &[Effect]) -> Option<CameraTarget> {
    effects.iter().rev().find_map(|effect| match effect {
        Effect::CameraTransition { target, .. } => Some(*target),
        _ => None,
    })
}

#[test]
fn fresh_boot_focuses_the_first_item() {
    let storage = SharedStorage::default();
    let mut runtime = boot(&storage);

    assert_eq!(runtime.sequence().item_count(), 61);
    assert_eq!(runtime.selection().current(), ItemID(0));
    assert_eq!(runtime.selection().zoom(), 0);

    let effects = drain(&mut runtime);
    assert_eq!(effects[0], Effect::SceneRebuilt { item_count: 61 });
    assert!(effects.contains(&Effect::ShowPrompts {
        item: ItemID(0),
        prompts: runtime.sequence().item_at(ItemID(0)).prompts.clone(),
    }));

    let stored = storage.stored().unwrap();
    assert_eq!(stored["schemaVersion"], SCHEMA_VERSION);
    assert_eq!(stored["currentIndex"], 0);
}

#[test]
fn select_index_highlights_exactly_the_item_objects() {
    let storage = SharedStorage::default();
    let mut runtime = boot(&storage);
    let highlight = runtime.config().palette.highlight;

    runtime.dispatch(InboundEvent::SelectIndex(0)).unwrap();
    let cross = runtime.sequence().item_at(ItemID(0)).clone();
    assert_eq!(cross.scene_objects().len(), 2);
    assert_eq!(runtime.selection().highlighted().len(), 2);
    for node in cross.scene_objects() {
        assert!(runtime.selection().is_highlighted(*node));
        assert_eq!(runtime.scene().color(*node), Some(highlight));
    }

    runtime.dispatch(InboundEvent::SelectIndex(5)).unwrap();
    for node in cross.scene_objects() {
        assert_eq!(runtime.scene().color(*node), Some(cross.base_color));
    }
    let bead = runtime.sequence().item_at(ItemID(5)).clone();
    assert_eq!(runtime.selection().highlighted().len(), 1);
    assert_eq!(runtime.scene().color(bead.scene_objects()[0]), Some(highlight));
}

#[test]
fn out_of_range_index_changes_nothing() {
    let storage = SharedStorage::default();
    let mut runtime = boot(&storage);
    runtime.dispatch(InboundEvent::SelectIndex(12)).unwrap();
    drain(&mut runtime);

    let result = runtime.dispatch(InboundEvent::SelectIndex(61));
    assert_eq!(
        result,
        Err(NavigationError::IndexOutOfRange { index: 61, len: 61 })
    );
    assert_eq!(runtime.selection().current(), ItemID(12));
    assert!(drain(&mut runtime).is_empty());
    assert_eq!(storage.stored().unwrap()["currentIndex"], 12);
}

#[test]
fn selection_effects_follow_the_fixed_order() {
    let storage = SharedStorage::default();
    let mut runtime = boot_five(&storage);
    drain(&mut runtime);

    runtime.select_index(4).unwrap();
    let effects = drain(&mut runtime);
    assert_eq!(effects.len(), 5);
    assert_eq!(effects[0], Effect::ClearPrompts);
    assert!(matches!(effects[1], Effect::FocusChanged { item: ItemID(4), .. }));
    assert!(matches!(effects[2], Effect::ShowPrompts { item: ItemID(4), .. }));
    assert_eq!(
        effects[3],
        Effect::PlayChime {
            item: ItemID(4),
            cue: ChimeCue::Double,
        }
    );
    assert!(matches!(effects[4], Effect::CameraTransition { .. }));

    runtime.select_index(2).unwrap();
    let effects = drain(&mut runtime);
    assert!(!effects.iter().any(|e| matches!(e, Effect::PlayChime { .. })));
}

/// Highlight set plus the colour of every item object, for before/after comparisons.
fn snapshot(runtime: &Runtime) -> (AHashSet<NodeID>, Vec<Option<Color>>) {
    let colors = runtime
        .sequence()
        .items()
        .iter()
        .flat_map(|item| item.scene_objects().iter())
        .map(|node| runtime.scene().color(*node))
        .collect();
    (runtime.selection().highlighted().clone(), colors)
}

#[test]
fn five_item_walk_clamps_at_both_ends() {
    let storage = SharedStorage::default();
    let mut runtime = boot_five(&storage);
    assert_eq!(runtime.sequence().item_count(), 5);

    for _ in 0..4 {
        runtime.dispatch(InboundEvent::NavigateNext).unwrap();
    }
    assert_eq!(runtime.selection().current(), ItemID(4));
    let before = snapshot(&runtime);
    runtime.dispatch(InboundEvent::NavigateNext).unwrap();
    assert_eq!(runtime.selection().current(), ItemID(4));
    assert_eq!(snapshot(&runtime), before);

    for _ in 0..4 {
        runtime.dispatch(InboundEvent::NavigatePrevious).unwrap();
    }
    assert_eq!(runtime.selection().current(), ItemID(0));
    let before = snapshot(&runtime);
    runtime.dispatch(InboundEvent::NavigatePrevious).unwrap();
    assert_eq!(runtime.selection().current(), ItemID(0));
    assert_eq!(snapshot(&runtime), before);
    assert_eq!(storage.stored().unwrap()["currentIndex"], 0);
}

#[test]
fn every_index_highlights_only_its_objects() {
    let storage = SharedStorage::default();
    let mut runtime = boot_five(&storage);

    for i in 0..5 {
        runtime.select_index(i).unwrap();
        let items = runtime.sequence().items().to_vec();
        let expected: AHashSet<NodeID> = items[i].scene_objects().iter().copied().collect();
        assert_eq!(runtime.selection().highlighted(), &expected, "item {i}");

        for (position, item) in items.iter().enumerate() {
            let want = if position == i {
                item.highlight_color
            } else {
                item.base_color
            };
            for node in item.scene_objects() {
                assert_eq!(runtime.scene().color(*node), Some(want), "item {position} after {i}");
            }
        }
    }
}

#[test]
fn refocus_mid_flight_lands_on_the_latest_item() {
    let storage = SharedStorage::default();
    let mut runtime = boot_five(&storage);
    runtime.set_zoom_level(1);
    settle(&mut runtime);

    runtime.select_index(1).unwrap();
    runtime.update(0.3);
    assert_eq!(runtime.phase(), SelectionPhase::Transitioning);
    runtime.select_index(3).unwrap();
    settle(&mut runtime);

    assert_eq!(runtime.phase(), SelectionPhase::Idle);
    let bounds = runtime
        .scene()
        .world_bounds(runtime.sequence().item_at(ItemID(3)).bounds_node());
    let pose = runtime.camera_pose();
    assert!(pose.pivot.abs_diff_eq(bounds.center(), 1.0e-4));
    let baseline = runtime.camera().baseline().distance_to_pivot();
    assert!(pose.distance_to_pivot() < baseline);
}

#[test]
fn pointer_on_path_geometry_is_ignored() {
    let storage = SharedStorage::default();
    let mut runtime = boot(&storage);
    runtime.select_index(7).unwrap();
    drain(&mut runtime);

    assert!(!runtime.select_by_hit(&toward(0.0, -1.85)));
    assert_eq!(runtime.selection().current(), ItemID(7));
    assert!(drain(&mut runtime).is_empty());

    assert!(!runtime.select_by_hit(&toward(30.0, 30.0)));
    assert_eq!(runtime.selection().current(), ItemID(7));
}

#[test]
fn pointer_on_cross_part_selects_the_cross() {
    let storage = SharedStorage::default();
    let mut runtime = boot(&storage);
    runtime.select_index(7).unwrap();

    assert!(runtime.select_by_hit(&toward(-0.4, -4.25)));
    assert_eq!(runtime.selection().current(), ItemID(0));
    assert_eq!(runtime.selection().highlighted().len(), 2);
}

#[test]
fn pointer_through_screen_centre_selects_bead() {
    let storage = SharedStorage::default();
    let mut runtime = boot_five(&storage);
    assert!(runtime.select_by_pointer(0.0, 0.0));
    assert_eq!(runtime.selection().current(), ItemID(2));
}

#[test]
fn zoom_is_clamped_and_frames_the_item() {
    let storage = SharedStorage::default();
    let mut runtime = boot(&storage);
    runtime.select_index(30).unwrap();
    drain(&mut runtime);

    runtime.dispatch(InboundEvent::SetZoomLevel(9)).unwrap();
    assert_eq!(runtime.selection().zoom(), 2);
    runtime.dispatch(InboundEvent::ZoomIn).unwrap();
    assert_eq!(runtime.selection().zoom(), 2);

    let effects = drain(&mut runtime);
    assert!(effects.contains(&Effect::ZoomChanged {
        level: 2,
        enabled: true,
    }));
    assert_eq!(last_camera_target(&effects), Some(CameraTarget::Item(ItemID(30))));

    for _ in 0..3 {
        runtime.dispatch(InboundEvent::ZoomOut).unwrap();
    }
    assert_eq!(runtime.selection().zoom(), 0);
    assert_eq!(last_camera_target(&drain(&mut runtime)), Some(CameraTarget::Baseline));
    assert_eq!(runtime.selection().current(), ItemID(30));
    assert_eq!(storage.stored().unwrap()["zoomLevel"], 0);
}

#[test]
fn disabled_zoom_keeps_camera_on_baseline() {
    let storage = SharedStorage::default();
    let mut runtime = boot(&storage);
    runtime.dispatch(InboundEvent::SetZoomEnabled(false)).unwrap();
    runtime.dispatch(InboundEvent::SetZoomLevel(2)).unwrap();
    let effects = drain(&mut runtime);
    assert_eq!(last_camera_target(&effects), Some(CameraTarget::Baseline));

    settle(&mut runtime);
    let baseline = *runtime.camera().baseline();
    assert!(runtime.camera_pose().approx_eq(&baseline, 1.0e-4));
    assert_eq!(storage.stored().unwrap()["zoomEnabled"], false);
}

#[test]
fn session_survives_reboot() {
    let storage = SharedStorage::default();
    {
        let mut runtime = boot(&storage);
        runtime.select_index(17).unwrap();
        runtime.set_zoom_level(1);
    }

    let mut runtime = boot(&storage);
    assert_eq!(runtime.selection().current(), ItemID(17));
    assert_eq!(runtime.selection().zoom(), 1);
    let effects = drain(&mut runtime);
    assert_eq!(last_camera_target(&effects), Some(CameraTarget::Item(ItemID(17))));
}

#[test]
fn old_schema_is_replaced_with_defaults() {
    let storage = SharedStorage::default();
    storage
        .0
        .borrow_mut()
        .insert(KEY, r#"{"schemaVersion":1,"currentIndex":9,"zoomLevel":2}"#);

    let runtime = boot(&storage);
    assert_eq!(runtime.selection().current(), ItemID(0));
    assert_eq!(runtime.selection().zoom(), 0);
    let stored = storage.stored().unwrap();
    assert_eq!(stored["schemaVersion"], SCHEMA_VERSION);
    assert_eq!(stored["currentIndex"], 0);
}

#[test]
fn out_of_range_record_is_replaced_with_defaults() {
    let storage = SharedStorage::default();
    let mut record = SessionRecord::fresh(
        CameraPose::default(),
        0,
        true,
        Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap(),
    );
    record.current_index = 99;
    storage
        .0
        .borrow_mut()
        .insert(KEY, serde_json::to_string(&record).unwrap());

    let runtime = boot(&storage);
    assert_eq!(runtime.selection().current(), ItemID(0));
    assert_eq!(storage.stored().unwrap()["lastModified"], "2026-03-01T12:00:00Z");
}

#[test]
fn unavailable_storage_keeps_navigation_working() {
    let mut runtime = Runtime::boot(
        config(),
        Box::new(DisabledStorage),
        Box::new(clock()),
        1.0,
    )
    .unwrap();
    assert!(!runtime.session().is_persisting());

    runtime.dispatch(InboundEvent::NavigateNext).unwrap();
    runtime.dispatch(InboundEvent::ZoomIn).unwrap();
    assert_eq!(runtime.selection().current(), ItemID(1));
    assert_eq!(runtime.selection().zoom(), 1);
    assert_eq!(runtime.session().record().current_index, 1);
}

#[test]
fn viewport_change_rebuilds_and_restores_selection() {
    let storage = SharedStorage::default();
    let mut runtime = boot(&storage);
    runtime.select_index(10).unwrap();
    let old_nodes = runtime.sequence().item_at(ItemID(10)).scene_objects().to_vec();
    drain(&mut runtime);

    runtime
        .dispatch(InboundEvent::ViewportChanged {
            width: 800,
            height: 400,
        })
        .unwrap();

    assert!((runtime.aspect() - 2.0).abs() < 1.0e-6);
    assert!((runtime.projection().aspect - 2.0).abs() < 1.0e-6);
    assert_eq!(runtime.selection().current(), ItemID(10));
    for node in &old_nodes {
        assert!(!runtime.scene().contains(*node));
    }
    let item = runtime.sequence().item_at(ItemID(10)).clone();
    let highlight = runtime.config().palette.highlight;
    for node in item.scene_objects() {
        assert!(runtime.selection().is_highlighted(*node));
        assert_eq!(runtime.scene().color(*node), Some(highlight));
    }
    assert_eq!(runtime.selection().highlighted().len(), 1);

    let effects = drain(&mut runtime);
    assert_eq!(effects[0], Effect::SceneRebuilt { item_count: 61 });
}

thread_local! {
    static LAYOUT_CALLS: Cell<u32> = const { Cell::new(0) };
}

/// Five beads on the first build, nothing afterwards.
fn five_beads_once(scene: &mut Scene, colors: &LayoutColors) -> Vec<PathSlot> {
    let calls = LAYOUT_CALLS.with(|calls| {
        calls.set(calls.get() + 1);
        calls.get()
    });
    if calls == 1 {
        five_beads(scene, colors)
    } else {
        Vec::new()
    }
}

#[test]
fn empty_rebuild_keeps_previous_scene() {
    LAYOUT_CALLS.with(|calls| calls.set(0));
    let storage = SharedStorage::default();
    let mut runtime = Runtime::boot_with_layout(
        config(),
        Box::new(storage.clone()),
        Box::new(clock()),
        1.0,
        five_beads_once,
    )
    .unwrap();
    runtime.select_index(2).unwrap();
    drain(&mut runtime);
    let before = snapshot(&runtime);
    let nodes = runtime.sequence().item_at(ItemID(2)).scene_objects().to_vec();

    runtime.viewport_changed(2.0);

    assert_eq!(runtime.selection().current(), ItemID(2));
    assert_eq!(runtime.sequence().item_count(), 5);
    assert!(nodes.iter().all(|node| runtime.scene().contains(*node)));
    assert_eq!(snapshot(&runtime), before);
    assert!((runtime.aspect() - 1.0).abs() < 1.0e-6);
    assert!(drain(&mut runtime).is_empty());
}

#[test]
fn reset_returns_to_first_item_at_minimum_zoom() {
    let storage = SharedStorage::default();
    let mut runtime = boot(&storage);
    runtime.select_index(20).unwrap();
    runtime.set_zoom_level(2);
    drain(&mut runtime);

    runtime.dispatch(InboundEvent::NavigateReset).unwrap();
    assert_eq!(runtime.selection().current(), ItemID(0));
    assert_eq!(runtime.selection().zoom(), 0);

    let effects = drain(&mut runtime);
    assert_eq!(
        effects[0],
        Effect::ZoomChanged {
            level: 0,
            enabled: true,
        }
    );
    assert_eq!(last_camera_target(&effects), Some(CameraTarget::Baseline));
    let stored = storage.stored().unwrap();
    assert_eq!(stored["currentIndex"], 0);
    assert_eq!(stored["zoomLevel"], 0);
}
