//! Versioned session record and the only code that reads or migrates it.

use crate::{Clock, SessionError};
use chrono::{DateTime, Utc};
use rosary_io::SessionStorage;
use rosary_structs::CameraPose;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bumped whenever the record layout changes. Any other value discards the record.
pub const SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub schema_version: u32,
    pub current_index: u32,
    pub zoom_level: u32,
    pub baseline_pose: CameraPose,
    pub zoom_enabled: bool,
    pub last_modified: DateTime<Utc>,
}

impl SessionRecord {
    pub fn fresh(
        baseline_pose: CameraPose,
        zoom_level: u32,
        zoom_enabled: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            current_index: 0,
            zoom_level,
            baseline_pose,
            zoom_enabled,
            last_modified: now,
        }
    }
}

/// What a record must satisfy to be restored, and what to rebuild it from otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionExpectations {
    pub item_count: usize,
    pub min_zoom: u32,
    pub max_zoom: u32,
    pub zoom_enabled: bool,
    /// Camera pose captured as the new baseline on reinitialisation.
    pub live_pose: CameraPose,
}

/// Why `load` kept or discarded the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored,
    Missing,
    /// Storage refused the read.
    Unreadable,
    Malformed,
    VersionMismatch { found: Option<String> },
    OutOfRange,
}

impl LoadOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, LoadOutcome::Restored)
    }
}

pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    clock: Box<dyn Clock>,
    key: String,
    record: SessionRecord,
    persisting: bool,
}

impl SessionStore {
    pub fn new(storage: Box<dyn SessionStorage>, clock: Box<dyn Clock>, key: impl Into<String>) -> Self {
        let record = SessionRecord::fresh(CameraPose::default(), 0, true, clock.now());
        Self {
            storage,
            clock,
            key: key.into(),
            record,
            persisting: true,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// False after the last write failed; the session then lives in memory only.
    pub fn is_persisting(&self) -> bool {
        self.persisting
    }

    /// Reads and validates the stored record. Anything short of a fully valid
    /// record of the current version is discarded and replaced by defaults,
    /// which are written back immediately.
    pub fn load(&mut self, expect: &SessionExpectations) -> (SessionRecord, LoadOutcome) {
        let outcome = match self.storage.read(&self.key) {
            Ok(Some(raw)) => match validate(&raw, expect) {
                Ok(record) => {
                    self.record = record;
                    LoadOutcome::Restored
                }
                Err(outcome) => outcome,
            },
            Ok(None) => LoadOutcome::Missing,
            Err(err) => {
                log::warn!("session: storage unavailable, reading `{}` failed: {err}", self.key);
                self.persisting = false;
                LoadOutcome::Unreadable
            }
        };

        if outcome.is_restored() {
            log::info!(
                "session: restored item {} at zoom {}",
                self.record.current_index,
                self.record.zoom_level
            );
        } else {
            log::info!("session: reinitialising ({outcome:?})");
            self.record = SessionRecord::fresh(
                expect.live_pose,
                expect.min_zoom,
                expect.zoom_enabled,
                self.clock.now(),
            );
            self.persist();
        }
        (self.record.clone(), outcome)
    }

    /// Stamps `lastModified` and writes the whole record.
    pub fn save(&mut self) -> Result<(), SessionError> {
        self.record.last_modified = self.clock.now();
        let encoded = serde_json::to_string(&self.record)?;
        self.storage.write(&self.key, &encoded)?;
        Ok(())
    }

    fn persist(&mut self) {
        match self.save() {
            Ok(()) => {
                if !self.persisting {
                    log::info!("session: storage available again");
                }
                self.persisting = true;
            }
            Err(err) => {
                if self.persisting {
                    log::warn!("session: {err}; continuing without persistence");
                }
                self.persisting = false;
            }
        }
    }

    pub fn set_current_index(&mut self, index: u32) {
        self.record.current_index = index;
        self.persist();
    }

    pub fn set_zoom_level(&mut self, zoom: u32) {
        self.record.zoom_level = zoom;
        self.persist();
    }

    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.record.zoom_enabled = enabled;
        self.persist();
    }

    /// Removes the stored record. The in-memory copy is untouched.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.storage.remove(&self.key)?;
        Ok(())
    }
}

fn validate(raw: &str, expect: &SessionExpectations) -> Result<SessionRecord, LoadOutcome> {
    let value: Value = serde_json::from_str(raw).map_err(|err| {
        log::debug!("session: unparsable record: {err}");
        LoadOutcome::Malformed
    })?;

    match value.get("schemaVersion") {
        Some(version) if version.as_u64() == Some(u64::from(SCHEMA_VERSION)) => {}
        other => {
            return Err(LoadOutcome::VersionMismatch {
                found: other.map(Value::to_string),
            });
        }
    }

    let record: SessionRecord = serde_json::from_value(value).map_err(|err| {
        log::debug!("session: record does not match schema: {err}");
        LoadOutcome::Malformed
    })?;

    let index_ok = (record.current_index as usize) < expect.item_count;
    let zoom_ok = (expect.min_zoom..=expect.max_zoom).contains(&record.zoom_level);
    let pose_ok = record.baseline_pose.is_finite();
    if !(index_ok && zoom_ok && pose_ok) {
        return Err(LoadOutcome::OutOfRange);
    }
    Ok(record)
}
