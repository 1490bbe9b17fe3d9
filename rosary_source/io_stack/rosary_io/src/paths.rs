use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    Disk(PathBuf),
    /// Relative to the project root.
    Project(PathBuf),
}

/// Per-user writable directory for `app_name`.
pub fn user_data_dir(app_name: &str) -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(app_name)
}

/// Maps `user://` paths to the user data directory, absolute paths to themselves,
/// anything else to a project-relative path.
pub fn resolve_path(path: &str, app_name: &str) -> ResolvedPath {
    if let Some(stripped) = path.strip_prefix("user://") {
        return ResolvedPath::Disk(user_data_dir(app_name).join(stripped));
    }

    let path_buf = PathBuf::from(path);
    if path_buf.is_absolute() {
        return ResolvedPath::Disk(path_buf);
    }

    ResolvedPath::Project(path_buf)
}

impl ResolvedPath {
    /// Concrete location on disk, joining project paths onto `project_root`.
    pub fn to_disk(&self, project_root: &Path) -> PathBuf {
        match self {
            ResolvedPath::Disk(path) => path.clone(),
            ResolvedPath::Project(path) => project_root.join(path),
        }
    }
}
