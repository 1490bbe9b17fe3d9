use rosary_bridge::{Effect, EffectSink, InboundEvent};
use rosary_runtime::{NavigationError, Runtime};
use rosary_scene::Scene;
use rosary_structs::CameraPose;

/// Collaborators outside the core: prompt UI, audio and the renderer.
pub trait Host: EffectSink {
    fn draw_frame(&mut self, pose: &CameraPose, scene: &Scene);
}

pub struct App<H: Host> {
    pub runtime: Runtime,
    pub host: H,
    effect_buffer: Vec<Effect>,
}

impl<H: Host> App<H> {
    pub fn new(runtime: Runtime, host: H) -> Self {
        Self {
            runtime,
            host,
            effect_buffer: Vec::new(),
        }
    }

    #[inline]
    pub fn handle_event(&mut self, event: InboundEvent) -> Result<(), NavigationError> {
        self.runtime.dispatch(event)
    }

    #[inline]
    pub fn update_runtime(&mut self, delta_time: f32) {
        self.runtime.update(delta_time);
    }

    #[inline]
    pub fn present(&mut self) {
        self.runtime.drain_effects(&mut self.effect_buffer);
        self.host.submit_many(self.effect_buffer.drain(..));
        self.host
            .draw_frame(self.runtime.camera_pose(), self.runtime.scene());
    }

    pub fn frame(&mut self, delta_time: f32) {
        self.update_runtime(delta_time);
        self.present();
    }
}

pub mod console_host;
pub mod entry;
pub mod runner;
pub mod tap;

pub use console_host::ConsoleHost;
pub use runner::{DEFAULT_FPS_CAP, RunSummary, ScriptCommand, ScriptError, ScriptedRunner};
pub use tap::TapDetector;
