mod navigation;
mod viewport;

use crate::{
    CameraEngine, Clock, FocusableItem, FramingParams, NavigationError, RuntimeError,
    SelectionPhase, SelectionState, SequenceModel, SessionExpectations, SessionStore,
    sequence::layout_colors,
};
use rosary_bridge::{Effect, InboundEvent, Viewport};
use rosary_io::SessionStorage;
use rosary_project::ProjectConfig;
use rosary_scene::{LayoutColors, PathSlot, Scene, build_rosary};
use rosary_structs::{CameraPose, Projection};

/// Builds the fixed path into a scene and returns its slots in path order.
pub type LayoutFn = fn(&mut Scene, &LayoutColors) -> Vec<PathSlot>;

/// Outbound effects produced while handling events, drained by the host each frame.
struct EffectQueue {
    pending: Vec<Effect>,
}

impl EffectQueue {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    fn push(&mut self, effect: Effect) {
        self.pending.push(effect);
    }

    fn drain(&mut self, out: &mut Vec<Effect>) {
        out.append(&mut self.pending);
    }
}

/// Owns the scene, sequence, selection, camera and session of one rosary view.
pub struct Runtime {
    config: ProjectConfig,
    layout: LayoutFn,
    scene: Scene,
    sequence: SequenceModel,
    selection: SelectionState,
    camera: CameraEngine,
    session: SessionStore,
    effects: EffectQueue,
    aspect: f32,
}

impl Runtime {
    /// Builds the rosary, loads the session and replays the stored selection.
    pub fn boot(
        config: ProjectConfig,
        storage: Box<dyn SessionStorage>,
        clock: Box<dyn Clock>,
        viewport_aspect: f32,
    ) -> Result<Self, RuntimeError> {
        Self::boot_with_layout(config, storage, clock, viewport_aspect, build_rosary)
    }

    pub fn boot_with_layout(
        config: ProjectConfig,
        storage: Box<dyn SessionStorage>,
        clock: Box<dyn Clock>,
        viewport_aspect: f32,
        layout: LayoutFn,
    ) -> Result<Self, RuntimeError> {
        let (scene, sequence) = assemble(&config, layout);
        if sequence.is_empty() {
            return Err(RuntimeError::EmptySequence);
        }

        let projection = configured_projection(&config, viewport_aspect);
        let camera = CameraEngine::new(
            configured_pose(&config),
            projection,
            config.zoom.transition_seconds,
        );
        let session = SessionStore::new(storage, clock, config.storage.key.clone());

        let mut runtime = Self {
            selection: SelectionState::new(config.zoom.min),
            aspect: projection.aspect,
            config,
            layout,
            scene,
            sequence,
            camera,
            session,
            effects: EffectQueue::new(),
        };

        let expectations = runtime.session_expectations();
        let (record, outcome) = runtime.session.load(&expectations);
        log::info!(
            "runtime: {} items, session {:?}",
            runtime.sequence.item_count(),
            outcome
        );
        runtime.camera.set_baseline(record.baseline_pose);
        runtime.effects.push(Effect::SceneRebuilt {
            item_count: runtime.sequence.item_count(),
        });
        runtime.replay_session();
        Ok(runtime)
    }

    /// Routes one inbound event. Only direct index requests can fail.
    pub fn dispatch(&mut self, event: InboundEvent) -> Result<(), NavigationError> {
        match event {
            InboundEvent::NavigateNext => self.select_next(),
            InboundEvent::NavigatePrevious => self.select_previous(),
            InboundEvent::NavigateReset => self.reset(),
            InboundEvent::ZoomIn => self.zoom_in(),
            InboundEvent::ZoomOut => self.zoom_out(),
            InboundEvent::PointerSelect { x, y } => {
                self.select_by_pointer(x, y);
            }
            InboundEvent::SelectIndex(index) => return self.select_index(index),
            InboundEvent::SetZoomLevel(level) => self.set_zoom_level(level),
            InboundEvent::SetZoomEnabled(enabled) => self.set_zoom_enabled(enabled),
            InboundEvent::ViewportChanged { width, height } => {
                self.viewport_changed(Viewport::new(width, height).aspect());
            }
        }
        Ok(())
    }

    /// Advances the camera transition by one frame.
    pub fn update(&mut self, delta_time: f32) {
        if let Some(handle) = self.camera.advance(delta_time) {
            log::debug!("camera: transition {} complete", handle.0);
        }
    }

    pub fn drain_effects(&mut self, out: &mut Vec<Effect>) {
        self.effects.drain(out);
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.camera.is_animating() {
            SelectionPhase::Transitioning
        } else {
            SelectionPhase::Idle
        }
    }

    pub fn camera_pose(&self) -> &CameraPose {
        self.camera.pose()
    }

    pub fn camera(&self) -> &CameraEngine {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        self.camera.projection()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn sequence(&self) -> &SequenceModel {
        &self.sequence
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn current_item(&self) -> &FocusableItem {
        self.sequence.item_at(self.selection.current())
    }

    pub fn framing_params(&self) -> FramingParams {
        FramingParams {
            fov_degrees: self.config.camera.fov,
            padding: self.config.zoom.padding,
            min_distance: self.config.zoom.min_distance,
            min_zoom: self.config.zoom.min,
            max_zoom: self.config.zoom.max,
        }
    }

    fn session_expectations(&self) -> SessionExpectations {
        SessionExpectations {
            item_count: self.sequence.item_count(),
            min_zoom: self.config.zoom.min,
            max_zoom: self.config.zoom.max,
            zoom_enabled: self.config.zoom.zoom_to_item,
            live_pose: *self.camera.pose(),
        }
    }
}

fn assemble(config: &ProjectConfig, layout: LayoutFn) -> (Scene, SequenceModel) {
    let mut scene = Scene::new();
    let sequence = populate(&mut scene, config, layout);
    (scene, sequence)
}

fn populate(scene: &mut Scene, config: &ProjectConfig, layout: LayoutFn) -> SequenceModel {
    let slots = layout(scene, &layout_colors(&config.palette));
    SequenceModel::build(&slots, &config.prompts, &config.palette)
}

fn configured_pose(config: &ProjectConfig) -> CameraPose {
    CameraPose::looking_at(config.camera.position, config.camera.target)
}

fn configured_projection(config: &ProjectConfig, aspect: f32) -> Projection {
    Projection::new(config.camera.fov, 1.0, config.camera.near, config.camera.far).with_aspect(aspect)
}
