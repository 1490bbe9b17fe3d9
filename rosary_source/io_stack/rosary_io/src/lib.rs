pub mod paths;
pub mod storage;

pub use paths::*;
pub use storage::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEST_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

    fn temp_test_dir() -> std::path::PathBuf {
        let seq = TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let pid = std::process::id();
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("rosary_io_test_{pid}_{nonce}_{seq}"))
    }

    #[test]
    fn user_paths_resolve_under_app_dir() {
        let ResolvedPath::Disk(path) = resolve_path("user://session/currentState.json", "Rosary")
        else {
            panic!("user:// must resolve to disk");
        };
        assert!(path.ends_with("Rosary/session/currentState.json"));
    }

    #[test]
    fn relative_paths_stay_in_project() {
        let resolved = resolve_path("rosary.toml", "Rosary");
        assert_eq!(resolved, ResolvedPath::Project("rosary.toml".into()));
        let root = std::path::Path::new("/projects/rosary");
        assert_eq!(resolved.to_disk(root), root.join("rosary.toml"));
    }

    #[test]
    fn file_storage_roundtrip_and_remove() {
        let dir = temp_test_dir();
        let mut storage = FileStorage::new(&dir);
        assert_eq!(storage.read("currentState").unwrap(), None);

        storage.write("currentState", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.read("currentState").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(storage.path_for("currentState").exists());

        storage.remove("currentState").unwrap();
        storage.remove("currentState").unwrap();
        assert_eq!(storage.read("currentState").unwrap(), None);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn file_storage_sanitizes_keys() {
        let storage = FileStorage::new("/tmp/x");
        assert_eq!(
            storage.path_for("../evil key"),
            std::path::Path::new("/tmp/x").join("___evil_key.json")
        );
    }

    #[test]
    fn disabled_storage_fails_every_call() {
        let mut storage = DisabledStorage;
        assert!(storage.read("k").is_err());
        assert!(storage.write("k", "v").is_err());
        assert!(storage.remove("k").is_err());
    }

    #[test]
    fn boxed_storage_forwards() {
        let mut storage: Box<dyn SessionStorage> = Box::new(MemoryStorage::new());
        storage.write("k", "v").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v"));
    }
}
