use rosary_ids::{ItemID, NodeID, TransitionID};

/// Audio cue played once when an item gains focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChimeCue {
    #[default]
    None,
    Single,
    Double,
}

impl ChimeCue {
    pub const fn is_none(self) -> bool {
        matches!(self, ChimeCue::None)
    }

    /// How many beeps the audio collaborator plays.
    pub const fn beeps(self) -> u8 {
        match self {
            ChimeCue::None => 0,
            ChimeCue::Single => 1,
            ChimeCue::Double => 2,
        }
    }
}

/// Input consumed by the core, already translated from raw host input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InboundEvent {
    NavigateNext,
    NavigatePrevious,
    NavigateReset,
    ZoomIn,
    ZoomOut,
    /// Normalized device coordinates, `-1..1` with +y up.
    PointerSelect { x: f32, y: f32 },
    SelectIndex(usize),
    SetZoomLevel(u32),
    SetZoomEnabled(bool),
    ViewportChanged { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraTarget {
    Item(ItemID),
    Baseline,
}

/// Output produced by the core for hosts (prompt UI, audio, renderer).
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ClearPrompts,
    ShowPrompts {
        item: ItemID,
        prompts: Vec<String>,
    },
    PlayChime {
        item: ItemID,
        cue: ChimeCue,
    },
    FocusChanged {
        item: ItemID,
        highlighted: Vec<NodeID>,
    },
    ZoomChanged {
        level: u32,
        enabled: bool,
    },
    CameraTransition {
        token: TransitionID,
        target: CameraTarget,
    },
    SceneRebuilt {
        item_count: usize,
    },
}

pub trait EffectSink {
    fn submit(&mut self, effect: Effect);

    fn submit_many<I>(&mut self, effects: I)
    where
        I: IntoIterator<Item = Effect>,
    {
        for effect in effects {
            self.submit(effect);
        }
    }
}

impl EffectSink for Vec<Effect> {
    fn submit(&mut self, effect: Effect) {
        self.push(effect);
    }
}

/// Drawable surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 for a collapsed surface.
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Pixel position (origin top-left, +y down) to normalized device coordinates.
    pub fn pointer_to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        ((x / w) * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}
