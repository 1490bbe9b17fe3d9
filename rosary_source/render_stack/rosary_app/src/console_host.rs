use crate::Host;
use rosary_bridge::{CameraTarget, Effect, EffectSink};
use rosary_ids::ItemID;
use rosary_scene::Scene;
use rosary_structs::CameraPose;

/// Headless host that reports effects through the log.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    prompts: Vec<String>,
    focused: Option<ItemID>,
    chimes: u32,
    frames: u64,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompts currently on screen.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn focused(&self) -> Option<ItemID> {
        self.focused
    }

    /// Total beeps played.
    pub fn chimes(&self) -> u32 {
        self.chimes
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl EffectSink for ConsoleHost {
    fn submit(&mut self, effect: Effect) {
        match effect {
            Effect::ClearPrompts => self.prompts.clear(),
            Effect::ShowPrompts { item, prompts } => {
                log::info!("[{item}] {}", prompts.join(" / "));
                self.prompts = prompts;
            }
            Effect::PlayChime { item, cue } => {
                log::info!("[{item}] chime x{}", cue.beeps());
                self.chimes += u32::from(cue.beeps());
            }
            Effect::FocusChanged { item, highlighted } => {
                log::debug!("focus {item}: {} objects highlighted", highlighted.len());
                self.focused = Some(item);
            }
            Effect::ZoomChanged { level, enabled } => {
                log::info!("zoom {level} (zoom to item {})", if enabled { "on" } else { "off" });
            }
            Effect::CameraTransition { token, target } => match target {
                CameraTarget::Item(item) => log::debug!("camera {token} -> {item}"),
                CameraTarget::Baseline => log::debug!("camera {token} -> baseline"),
            },
            Effect::SceneRebuilt { item_count } => {
                log::info!("scene built with {item_count} items");
            }
        }
    }
}

impl Host for ConsoleHost {
    fn draw_frame(&mut self, pose: &CameraPose, scene: &Scene) {
        self.frames += 1;
        log::trace!(
            "frame {}: camera at {:?}, {} nodes",
            self.frames,
            pose.position,
            scene.len()
        );
    }
}
