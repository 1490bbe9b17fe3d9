use crate::{
    CameraConfig, Palette, ProjectConfig, ProjectError, PromptTable, StorageBackend,
    StorageConfig, ZoomConfig,
};
use rosary_structs::{Color, Vector3};
use std::collections::BTreeMap;
use toml::{Table, Value};

pub fn parse_project_toml(contents: &str) -> Result<ProjectConfig, ProjectError> {
    let value: Value = contents.parse::<Value>()?;
    let project_table = value
        .get("project")
        .and_then(Value::as_table)
        .ok_or(ProjectError::MissingField("project"))?;

    let name = project_table
        .get("name")
        .and_then(Value::as_str)
        .ok_or(ProjectError::MissingField("project.name"))?
        .to_string();
    if name.trim().is_empty() {
        return Err(ProjectError::InvalidField(
            "project.name",
            "must not be empty".to_string(),
        ));
    }

    Ok(ProjectConfig {
        name,
        camera: parse_camera(section(&value, "camera")?)?,
        zoom: parse_zoom(section(&value, "zoom")?)?,
        palette: parse_palette(section(&value, "palette")?)?,
        storage: parse_storage(section(&value, "storage")?)?,
        prompts: parse_prompts(section(&value, "prompts")?)?,
    })
}

fn section<'a>(value: &'a Value, name: &'static str) -> Result<Option<&'a Table>, ProjectError> {
    match value.get(name) {
        None => Ok(None),
        Some(Value::Table(table)) => Ok(Some(table)),
        Some(_) => Err(ProjectError::InvalidField(name, "must be a table".to_string())),
    }
}

fn field<'a>(table: Option<&'a Table>, key: &str) -> Option<&'a Value> {
    table.and_then(|t| t.get(key))
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ProjectError {
    ProjectError::InvalidField(field, reason.into())
}

fn as_number(value: &Value) -> Option<f32> {
    match value {
        Value::Float(f) => Some(*f as f32),
        Value::Integer(i) => Some(*i as f32),
        _ => None,
    }
}

fn read_f32(
    table: Option<&Table>,
    key: &str,
    name: &'static str,
    default: f32,
) -> Result<f32, ProjectError> {
    let Some(value) = field(table, key) else {
        return Ok(default);
    };
    as_number(value)
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(name, "must be a finite number"))
}

fn read_u32(
    table: Option<&Table>,
    key: &str,
    name: &'static str,
    default: u32,
) -> Result<u32, ProjectError> {
    let Some(value) = field(table, key) else {
        return Ok(default);
    };
    value
        .as_integer()
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| invalid(name, "must be a non-negative integer"))
}

fn read_bool(
    table: Option<&Table>,
    key: &str,
    name: &'static str,
    default: bool,
) -> Result<bool, ProjectError> {
    let Some(value) = field(table, key) else {
        return Ok(default);
    };
    value
        .as_bool()
        .ok_or_else(|| invalid(name, "must be a boolean"))
}

fn read_vec3(
    table: Option<&Table>,
    key: &str,
    name: &'static str,
    default: Vector3,
) -> Result<Vector3, ProjectError> {
    let Some(value) = field(table, key) else {
        return Ok(default);
    };
    let parts = value
        .as_array()
        .filter(|a| a.len() == 3)
        .ok_or_else(|| invalid(name, "expected `[x, y, z]`"))?;
    let mut out = [0.0f32; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = as_number(part)
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(name, "components must be finite numbers"))?;
    }
    Ok(Vector3::from(out))
}

fn read_color(
    table: Option<&Table>,
    key: &str,
    name: &'static str,
    default: Color,
) -> Result<Color, ProjectError> {
    let Some(value) = field(table, key) else {
        return Ok(default);
    };
    let raw = value
        .as_str()
        .ok_or_else(|| invalid(name, "expected a `#rrggbb` string"))?;
    if !raw.trim_start().starts_with('#') {
        return Err(invalid(name, "expected a `#rrggbb` string"));
    }
    Color::from_hex(raw).map_err(|reason| invalid(name, reason))
}

fn read_labels(value: &Value, name: &'static str) -> Result<Vec<String>, ProjectError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid(name, "expected a list of strings"))?;
    if items.is_empty() {
        return Err(invalid(name, "must not be empty"));
    }
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(name, "expected a list of strings"))
        })
        .collect()
}

fn read_label_list(
    table: Option<&Table>,
    key: &str,
    name: &'static str,
    default: Vec<String>,
) -> Result<Vec<String>, ProjectError> {
    match field(table, key) {
        Some(value) => read_labels(value, name),
        None => Ok(default),
    }
}

fn parse_camera(table: Option<&Table>) -> Result<CameraConfig, ProjectError> {
    let defaults = CameraConfig::default();
    let camera = CameraConfig {
        fov: read_f32(table, "fov", "camera.fov", defaults.fov)?,
        near: read_f32(table, "near", "camera.near", defaults.near)?,
        far: read_f32(table, "far", "camera.far", defaults.far)?,
        position: read_vec3(table, "position", "camera.position", defaults.position)?,
        target: read_vec3(table, "target", "camera.target", defaults.target)?,
    };

    if !(camera.fov > 0.0 && camera.fov < 180.0) {
        return Err(invalid("camera.fov", "must be between 0 and 180 degrees"));
    }
    if camera.near <= 0.0 {
        return Err(invalid("camera.near", "must be greater than 0"));
    }
    if camera.far <= camera.near {
        return Err(invalid("camera.far", "must be greater than `camera.near`"));
    }
    if Vector3::distance(camera.position, camera.target) <= f32::EPSILON {
        return Err(invalid("camera.target", "must differ from `camera.position`"));
    }
    Ok(camera)
}

fn parse_zoom(table: Option<&Table>) -> Result<ZoomConfig, ProjectError> {
    let defaults = ZoomConfig::default();
    let zoom = ZoomConfig {
        min: read_u32(table, "min", "zoom.min", defaults.min)?,
        max: read_u32(table, "max", "zoom.max", defaults.max)?,
        transition_seconds: read_f32(
            table,
            "transition_seconds",
            "zoom.transition_seconds",
            defaults.transition_seconds,
        )?,
        padding: read_f32(table, "padding", "zoom.padding", defaults.padding)?,
        min_distance: read_f32(table, "min_distance", "zoom.min_distance", defaults.min_distance)?,
        zoom_to_item: read_bool(table, "zoom_to_item", "zoom.zoom_to_item", defaults.zoom_to_item)?,
    };

    if zoom.max < zoom.min {
        return Err(invalid("zoom.max", "must be at least `zoom.min`"));
    }
    if zoom.transition_seconds < 0.0 {
        return Err(invalid("zoom.transition_seconds", "must not be negative"));
    }
    if zoom.padding <= 0.0 {
        return Err(invalid("zoom.padding", "must be greater than 0"));
    }
    if zoom.min_distance <= 0.0 {
        return Err(invalid("zoom.min_distance", "must be greater than 0"));
    }
    Ok(zoom)
}

fn parse_palette(table: Option<&Table>) -> Result<Palette, ProjectError> {
    let d = Palette::default();
    Ok(Palette {
        highlight: read_color(table, "highlight", "palette.highlight", d.highlight)?,
        chain: read_color(table, "chain", "palette.chain", d.chain)?,
        small_bead: read_color(table, "small_bead", "palette.small_bead", d.small_bead)?,
        large_bead: read_color(table, "large_bead", "palette.large_bead", d.large_bead)?,
        cross: read_color(table, "cross", "palette.cross", d.cross)?,
        center: read_color(table, "center", "palette.center", d.center)?,
    })
}

fn parse_storage(table: Option<&Table>) -> Result<StorageConfig, ProjectError> {
    let defaults = StorageConfig::default();
    let key = match field(table, "key") {
        Some(value) => value
            .as_str()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| invalid("storage.key", "must be a non-empty string"))?
            .to_string(),
        None => defaults.key,
    };
    let backend = match field(table, "backend") {
        Some(value) => value
            .as_str()
            .and_then(StorageBackend::parse)
            .ok_or_else(|| invalid("storage.backend", "expected `file`, `memory` or `disabled`"))?,
        None => defaults.backend,
    };
    let dir = match field(table, "dir") {
        Some(value) => value
            .as_str()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| invalid("storage.dir", "must be a non-empty string"))?
            .to_string(),
        None => defaults.dir,
    };
    Ok(StorageConfig { key, backend, dir })
}

fn parse_prompts(table: Option<&Table>) -> Result<PromptTable, ProjectError> {
    let defaults = PromptTable::default();
    let cross = read_label_list(table, "cross", "prompts.cross", defaults.cross)?;
    let our_father = read_label_list(table, "our_father", "prompts.our_father", defaults.our_father)?;
    let hail_mary = read_label_list(table, "hail_mary", "prompts.hail_mary", defaults.hail_mary)?;
    let hail_holy_queen = read_label_list(
        table,
        "hail_holy_queen",
        "prompts.hail_holy_queen",
        defaults.hail_holy_queen,
    )?;

    let overrides = match field(table, "override") {
        None => defaults.overrides,
        Some(value) => {
            let entries = value
                .as_array()
                .ok_or_else(|| invalid("prompts.override", "expected `[[prompts.override]]` tables"))?;
            let mut overrides = BTreeMap::new();
            for entry in entries {
                let entry = entry
                    .as_table()
                    .ok_or_else(|| invalid("prompts.override", "expected a table"))?;
                let position = entry
                    .get("position")
                    .and_then(Value::as_integer)
                    .and_then(|p| u32::try_from(p).ok())
                    .ok_or_else(|| {
                        invalid("prompts.override", "`position` must be a non-negative integer")
                    })?;
                let prompts = entry
                    .get("prompts")
                    .ok_or(ProjectError::MissingField("prompts.override.prompts"))
                    .and_then(|v| read_labels(v, "prompts.override.prompts"))?;
                if overrides.insert(position, prompts).is_some() {
                    return Err(invalid(
                        "prompts.override",
                        format!("duplicate position {position}"),
                    ));
                }
            }
            overrides
        }
    };

    Ok(PromptTable {
        cross,
        our_father,
        hail_mary,
        hail_holy_queen,
        overrides,
    })
}
