mod defaults;
mod parse;

pub use defaults::default_project_toml;
pub use parse::parse_project_toml;

use rosary_structs::{Color, Vector3};
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
};

pub const PROJECT_FILE: &str = "rosary.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    pub camera: CameraConfig,
    pub zoom: ZoomConfig,
    pub palette: Palette,
    pub storage: StorageConfig,
    pub prompts: PromptTable,
}

impl ProjectConfig {
    pub fn default_for_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            camera: CameraConfig::default(),
            zoom: ZoomConfig::default(),
            palette: Palette::default(),
            storage: StorageConfig::default(),
            prompts: PromptTable::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vector3,
    pub target: Vector3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 20.0,
            near: 0.05,
            far: 400.0,
            position: Vector3::new(0.0, 0.0, 50.0),
            target: Vector3::new(0.0, 1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomConfig {
    pub min: u32,
    pub max: u32,
    pub transition_seconds: f32,
    /// Multiplier on the distance that exactly fits an item.
    pub padding: f32,
    /// Closest allowed framing distance; also the fallback for zero-size items.
    pub min_distance: f32,
    /// Initial value of the persisted "zoom to item" switch.
    pub zoom_to_item: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0,
            max: 2,
            transition_seconds: 1.0,
            padding: 1.2,
            min_distance: 0.6,
            zoom_to_item: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub highlight: Color,
    pub chain: Color,
    pub small_bead: Color,
    pub large_bead: Color,
    pub cross: Color,
    pub center: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            highlight: Color::rgb(0xff, 0x00, 0x00),
            chain: Color::rgb(0x60, 0x62, 0x65),
            small_bead: Color::rgb(0xe1, 0xe3, 0xe6),
            large_bead: Color::rgb(0x39, 0xff, 0xb4),
            cross: Color::rgb(0xa2, 0x6f, 0x56),
            center: Color::rgb(0x39, 0xff, 0xb4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
    Disabled,
}

impl StorageBackend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Some(Self::File),
            "memory" => Some(Self::Memory),
            "disabled" | "none" => Some(Self::Disabled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub key: String,
    pub backend: StorageBackend,
    /// Directory of the file backend; `user://` paths land in the user data directory.
    pub dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: "currentState".to_string(),
            backend: StorageBackend::File,
            dir: "user://session".to_string(),
        }
    }
}

/// Prompt labels per bead role, with per-position overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTable {
    pub cross: Vec<String>,
    pub our_father: Vec<String>,
    pub hail_mary: Vec<String>,
    pub hail_holy_queen: Vec<String>,
    pub overrides: BTreeMap<u32, Vec<String>>,
}

impl PromptTable {
    pub fn override_for(&self, position: u32) -> Option<&[String]> {
        self.overrides.get(&position).map(Vec::as_slice)
    }
}

impl Default for PromptTable {
    fn default() -> Self {
        let labels = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut overrides = BTreeMap::new();
        overrides.insert(4, labels(&["Hail Mary", "Glory Be"]));
        for position in [15, 26, 37, 48, 59] {
            overrides.insert(position, labels(&["Hail Mary", "Glory Be", "Fatima Prayer"]));
        }
        Self {
            cross: labels(&["Apostles Creed"]),
            our_father: labels(&["Our Father"]),
            hail_mary: labels(&["Hail Mary"]),
            hail_holy_queen: labels(&["Hail Holy Queen"]),
            overrides,
        }
    }
}

#[derive(Debug)]
pub enum ProjectError {
    Io(std::io::Error),
    ParseToml(toml::de::Error),
    MissingField(&'static str),
    InvalidField(&'static str, String),
}

impl Display for ProjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::ParseToml(err) => write!(f, "{err}"),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidField(field, reason) => write!(f, "invalid field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ProjectError {}

impl From<std::io::Error> for ProjectError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::de::Error> for ProjectError {
    fn from(value: toml::de::Error) -> Self {
        Self::ParseToml(value)
    }
}

/// Creates `root` and a default `rosary.toml` when missing, then loads it.
pub fn bootstrap_project(
    project_root: &Path,
    default_name: &str,
) -> Result<ProjectConfig, ProjectError> {
    fs::create_dir_all(project_root)?;
    ensure_project_toml(project_root, default_name)?;
    load_project_toml(project_root)
}

pub fn project_toml_path(root: &Path) -> PathBuf {
    root.join(PROJECT_FILE)
}

pub fn ensure_project_toml(root: &Path, default_name: &str) -> std::io::Result<()> {
    let project_toml = project_toml_path(root);
    if project_toml.exists() {
        return Ok(());
    }
    fs::write(project_toml, default_project_toml(default_name))
}

pub fn load_project_toml(root: &Path) -> Result<ProjectConfig, ProjectError> {
    let project_toml = fs::read_to_string(project_toml_path(root))?;
    parse_project_toml(&project_toml)
}
