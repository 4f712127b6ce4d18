//! Disk-based snapshot store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::WidgetSnapshot;

use super::error::StoreError;
use super::{SnapshotStore, with_error};

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "widget_snapshot.json";

/// Stores the snapshot as pretty-printed JSON in a single file.
///
/// Writes go to a sibling temp file and are renamed into place, so readers
/// never observe a half-written snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Create a store backed by the given file. Nothing is touched until the
    /// first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<WidgetSnapshot>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    context: "read",
                    source: e,
                });
            }
        };

        match serde_json::from_str(&contents) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                // Treat as empty; the next refresh overwrites it
                warn!(path = %self.path.display(), error = %e, "discarding unreadable snapshot");
                Ok(None)
            }
        }
    }

    fn write(&self, snapshot: &WidgetSnapshot) -> Result<(), StoreError> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                context: "create directory",
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StoreError::Io {
            context: "write",
            source: e,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io {
            context: "rename",
            source: e,
        })?;

        Ok(())
    }
}

impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Option<WidgetSnapshot>, StoreError> {
        self.read()
    }

    async fn save(&self, snapshot: &WidgetSnapshot) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write(snapshot)
    }

    async fn save_error(&self, message: &str, last_updated: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = with_error(self.read()?, message, last_updated);
        self.write(&snapshot)
    }
}
