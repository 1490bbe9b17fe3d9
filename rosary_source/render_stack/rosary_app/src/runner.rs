use crate::{App, Host, TapDetector};
use rosary_bridge::{InboundEvent, Viewport};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_FPS_CAP: f32 = 60.0;

/// One line of a navigation script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptCommand {
    Next,
    Prev,
    Reset,
    ZoomIn,
    ZoomOut,
    Tap,
    /// Pointer in normalized device coordinates.
    Click { x: f32, y: f32 },
    /// Pointer in pixels of the current viewport, origin top-left.
    Press { x: f32, y: f32 },
    Pick(usize),
    Resize { width: u32, height: u32 },
    Wait(f32),
    Quit,
}

#[derive(Debug, Error, PartialEq)]
#[error("script line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptCommand {
    /// Parses one line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse_line(raw: &str) -> Result<Option<Self>, String> {
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (head, args.as_slice()) {
            ("next", []) => Self::Next,
            ("prev", []) => Self::Prev,
            ("reset", []) => Self::Reset,
            ("zoom-in", []) => Self::ZoomIn,
            ("zoom-out", []) => Self::ZoomOut,
            ("tap", []) => Self::Tap,
            ("quit", []) => Self::Quit,
            ("click", [x, y]) => Self::Click {
                x: parse_arg(x)?,
                y: parse_arg(y)?,
            },
            ("press", [x, y]) => Self::Press {
                x: parse_arg(x)?,
                y: parse_arg(y)?,
            },
            ("pick", [index]) => Self::Pick(parse_arg(index)?),
            ("resize", [width, height]) => Self::Resize {
                width: parse_arg(width)?,
                height: parse_arg(height)?,
            },
            ("wait", [seconds]) => {
                let seconds: f32 = parse_arg(seconds)?;
                if !(seconds.is_finite() && seconds >= 0.0) {
                    return Err(format!("invalid wait `{seconds}`"));
                }
                Self::Wait(seconds)
            }
            _ => return Err(format!("unrecognised command `{line}`")),
        };
        Ok(Some(command))
    }

    pub fn parse_script(source: &str) -> Result<Vec<Self>, ScriptError> {
        let mut commands = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            match Self::parse_line(raw) {
                Ok(Some(command)) => commands.push(command),
                Ok(None) => {}
                Err(message) => {
                    return Err(ScriptError {
                        line: index + 1,
                        message,
                    });
                }
            }
        }
        Ok(commands)
    }
}

fn parse_arg<T: std::str::FromStr>(raw: &str) -> Result<T, String> {
    raw.parse().map_err(|_| format!("invalid argument `{raw}`"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub commands: usize,
    pub rejected: usize,
}

/// Headless frame loop driven by a script on virtual time.
pub struct ScriptedRunner {
    fps_cap: f32,
    viewport: Viewport,
    taps: TapDetector,
    now: Duration,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::with_fps_cap(DEFAULT_FPS_CAP)
    }

    pub fn with_fps_cap(fps_cap: f32) -> Self {
        let fps_cap = if fps_cap.is_finite() { fps_cap.max(1.0) } else { DEFAULT_FPS_CAP };
        Self {
            fps_cap,
            viewport: Viewport::default(),
            taps: TapDetector::new(),
            now: Duration::ZERO,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn frame_delta(&self) -> f32 {
        1.0 / self.fps_cap
    }

    fn step<H: Host>(&mut self, app: &mut App<H>, summary: &mut RunSummary) {
        let delta = self.frame_delta();
        app.frame(delta);
        self.now += Duration::from_secs_f32(delta);
        summary.frames += 1;
    }

    /// Runs `commands` in order, presenting one frame after each. Stops at `quit`.
    pub fn run<H: Host>(&mut self, app: &mut App<H>, commands: &[ScriptCommand]) -> RunSummary {
        let mut summary = RunSummary::default();
        app.present();

        for command in commands {
            summary.commands += 1;
            let event = match *command {
                ScriptCommand::Quit => break,
                ScriptCommand::Wait(seconds) => {
                    let frames = (seconds * self.fps_cap).ceil() as u64;
                    for _ in 0..frames {
                        self.step(app, &mut summary);
                    }
                    continue;
                }
                ScriptCommand::Tap => {
                    if !self.taps.tap(self.now) {
                        self.step(app, &mut summary);
                        continue;
                    }
                    InboundEvent::NavigateNext
                }
                ScriptCommand::Next => InboundEvent::NavigateNext,
                ScriptCommand::Prev => InboundEvent::NavigatePrevious,
                ScriptCommand::Reset => InboundEvent::NavigateReset,
                ScriptCommand::ZoomIn => InboundEvent::ZoomIn,
                ScriptCommand::ZoomOut => InboundEvent::ZoomOut,
                ScriptCommand::Click { x, y } => InboundEvent::PointerSelect { x, y },
                ScriptCommand::Press { x, y } => {
                    let (x, y) = self.viewport.pointer_to_ndc(x, y);
                    InboundEvent::PointerSelect { x, y }
                }
                ScriptCommand::Pick(index) => InboundEvent::SelectIndex(index),
                ScriptCommand::Resize { width, height } => {
                    self.viewport = Viewport::new(width, height);
                    InboundEvent::ViewportChanged { width, height }
                }
            };

            if let Err(err) = app.handle_event(event) {
                log::warn!("script: {err}");
                summary.rejected += 1;
            }
            self.step(app, &mut summary);
        }

        log::info!(
            "script finished: {} commands, {} frames, {} rejected",
            summary.commands,
            summary.frames,
            summary.rejected
        );
        summary
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}
