use crate::{App, ConsoleHost, Host};
use rosary_bridge::Viewport;
use rosary_io::{DisabledStorage, FileStorage, MemoryStorage, SessionStorage, resolve_path};
use rosary_project::{ProjectConfig, StorageBackend, bootstrap_project};
use rosary_runtime::{Runtime, RuntimeError, SystemClock};
use std::path::Path;

pub fn create_storage(config: &ProjectConfig, project_root: &Path) -> Box<dyn SessionStorage> {
    match config.storage.backend {
        StorageBackend::File => {
            let dir = resolve_path(&config.storage.dir, &config.name).to_disk(project_root);
            log::debug!("session storage at {}", dir.display());
            Box::new(FileStorage::new(dir))
        }
        StorageBackend::Memory => Box::new(MemoryStorage::new()),
        StorageBackend::Disabled => Box::new(DisabledStorage),
    }
}

pub fn create_app<H: Host>(
    host: H,
    config: ProjectConfig,
    storage: Box<dyn SessionStorage>,
    viewport: Viewport,
) -> Result<App<H>, RuntimeError> {
    let runtime = Runtime::boot(config, storage, Box::new(SystemClock), viewport.aspect())?;
    Ok(App::new(runtime, host))
}

/// Loads (or bootstraps) `rosary.toml` under `project_root` and boots a console app.
/// With `clear_session` the stored record is removed first.
pub fn create_app_from_project_dir(
    project_root: &Path,
    default_name: &str,
    clear_session: bool,
) -> Result<App<ConsoleHost>, RuntimeError> {
    let config = bootstrap_project(project_root, default_name)?;
    let mut storage = create_storage(&config, project_root);
    if clear_session {
        match storage.remove(&config.storage.key) {
            Ok(()) => log::info!("cleared session `{}`", config.storage.key),
            Err(err) => log::warn!("could not clear session `{}`: {err}", config.storage.key),
        }
    }
    log::info!("loaded project `{}` from {}", config.name, project_root.display());
    create_app(ConsoleHost::new(), config, storage, Viewport::default())
}
