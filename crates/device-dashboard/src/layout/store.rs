//! Persisted widget order.
//!
//! The order file is a JSON array. Entries may be bare ids or full
//! descriptor objects:
//!
//! ```json
//! ["battery", {"id": "device", "title": "My Laptop", "enabled": true}, "network"]
//! ```
//!
//! Writes use the bare id for entries that match their built-in defaults
//! and the object form for anything renamed or disabled, so a drag never
//! loses a title or an `enabled` flag. Nothing in here surfaces an
//! error to the dashboard: a missing or corrupt file means the default
//! order, and a failed write is logged and dropped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::descriptor::{default_order, title_for, WidgetDescriptor};

/// Errors while reading or writing the order file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File could not be read, written or renamed.
    #[error("Layout file {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File content is not a valid order.
    #[error("Layout file {path} is not a valid widget order: {source}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// JSON error.
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PersistedEntry {
    Id(String),
    Descriptor {
        id: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        enabled: Option<bool>,
    },
}

impl From<PersistedEntry> for WidgetDescriptor {
    fn from(entry: PersistedEntry) -> Self {
        match entry {
            PersistedEntry::Id(id) => WidgetDescriptor::from_id(&id),
            PersistedEntry::Descriptor { id, title, enabled } => WidgetDescriptor {
                title: title.unwrap_or_else(|| title_for(&id)),
                enabled: enabled.unwrap_or(true),
                id,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SavedEntry<'a> {
    Id(&'a str),
    Descriptor(&'a WidgetDescriptor),
}

impl<'a> From<&'a WidgetDescriptor> for SavedEntry<'a> {
    fn from(widget: &'a WidgetDescriptor) -> Self {
        if *widget == WidgetDescriptor::from_id(&widget.id) {
            SavedEntry::Id(&widget.id)
        } else {
            SavedEntry::Descriptor(widget)
        }
    }
}

/// Reads and writes the widget order file.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    path: PathBuf,
}

impl LayoutStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the order file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the persisted order, or the default order when the file is
    /// absent or unusable.
    ///
    /// The persisted order is returned as stored: unknown ids are kept and
    /// missing default ids are not added back.
    pub fn load(&self) -> Vec<WidgetDescriptor> {
        match self.read_persisted() {
            Ok(Some(order)) => order,
            Ok(None) => {
                tracing::debug!("No widget order at {}, using defaults", self.path.display());
                default_order()
            }
            Err(e) => {
                tracing::warn!("{}; using default widget order", e);
                default_order()
            }
        }
    }

    /// Reads the file without falling back. `Ok(None)` when it does not exist.
    pub fn read_persisted(&self) -> Result<Option<Vec<WidgetDescriptor>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        let entries: Vec<PersistedEntry> =
            serde_json::from_str(&content).map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                source: e,
            })?;
        Ok(Some(entries.into_iter().map(WidgetDescriptor::from).collect()))
    }

    /// Persists `order`. Failures are logged and swallowed.
    pub fn save(&self, order: &[WidgetDescriptor]) {
        match self.try_save(order) {
            Ok(()) => tracing::debug!(
                "Saved widget order ({} widgets) to {}",
                order.len(),
                self.path.display()
            ),
            Err(e) => tracing::warn!("Failed to save widget order: {}", e),
        }
    }

    /// Writes the order atomically: temp file, fsync, rename.
    pub fn try_save(&self, order: &[WidgetDescriptor]) -> Result<(), StoreError> {
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }

        let entries: Vec<SavedEntry> = order.iter().map(SavedEntry::from).collect();
        let json = serde_json::to_string(&entries).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(io_error(&temp_path))?;
        let file = fs::File::open(&temp_path).map_err(io_error(&temp_path))?;
        file.sync_all().map_err(io_error(&temp_path))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::Io {
                path: self.path.clone(),
                source: e,
            }
        })
    }

    /// Deletes the order file so the next load yields the defaults.
    ///
    /// Returns `Ok(false)` when there was nothing to delete.
    pub fn reset(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Removed widget order at {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "widget-order.json".to_string());
        self.path
            .with_file_name(format!("{}.tmp.{}", name, std::process::id()))
    }
}
