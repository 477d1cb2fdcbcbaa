//! Schedule document storage.
//!
//! Schedules are written as pretty-printed UTF-8 JSON (4-space indent) in
//! the field layout described in [`models::Schedule`](crate::models::Schedule).
//! Writes create missing directories and replace any existing document;
//! there is no append, merge, or atomic rename.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::Schedule;

/// Directory used when no other is configured, relative to the working directory.
pub const DEFAULT_DIR: &str = "schedules";

/// Document name inside the store directory.
pub const DEFAULT_FILE: &str = "schedule.json";

/// Fixed storage location for the latest generated schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleStore {
    dir: PathBuf,
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new(DEFAULT_DIR)
    }
}

impl ScheduleStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the stored document.
    pub fn path(&self) -> PathBuf {
        self.dir.join(DEFAULT_FILE)
    }

    /// Writes the schedule, overwriting the previous one. Returns its path.
    pub fn save(&self, schedule: &Schedule) -> Result<PathBuf> {
        let path = self.path();
        save_schedule(schedule, &path)?;
        Ok(path)
    }

    /// Reads the stored schedule.
    pub fn load(&self) -> Result<Schedule> {
        load_schedule(self.path())
    }
}

/// Writes a schedule document to `path`, creating parent directories.
pub fn save_schedule(schedule: &Schedule, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    schedule.serialize(&mut ser).map_err(Error::Serialize)?;

    fs::write(path, buf).map_err(write_err)?;
    info!(path = %path.display(), entries = schedule.len(), "schedule saved");
    Ok(())
}

/// Reads a schedule document from `path`.
///
/// A missing or unreadable file yields [`Error::Read`]; a file that is not a
/// JSON array of entries yields [`Error::Parse`].
pub fn load_schedule(path: impl AsRef<Path>) -> Result<Schedule> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
