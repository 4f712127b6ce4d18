//! Persistence of the last widget snapshot.
//!
//! The refresh cycle is the only writer; the display layer reads. Stores are
//! injected, never reached through globals.

mod error;
mod file;
mod memory;

use std::future::Future;

use crate::domain::WidgetSnapshot;

pub use error::StoreError;
pub use file::{DEFAULT_SNAPSHOT_PATH, JsonFileStore};
pub use memory::MemoryStore;

/// Durable home of the most recent snapshot.
pub trait SnapshotStore {
    /// The stored snapshot, or `None` if nothing usable has been saved yet.
    fn load(&self) -> impl Future<Output = Result<Option<WidgetSnapshot>, StoreError>> + Send;

    /// Replace the stored snapshot entirely.
    fn save(&self, snapshot: &WidgetSnapshot)
    -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Record a failed refresh.
    ///
    /// Keeps the previous station lists and only updates `error` and
    /// `last_updated`. With nothing stored yet, writes an error-only
    /// snapshot.
    fn save_error(
        &self,
        message: &str,
        last_updated: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Apply a refresh failure to whatever was stored before.
pub(crate) fn with_error(
    previous: Option<WidgetSnapshot>,
    message: &str,
    last_updated: &str,
) -> WidgetSnapshot {
    match previous {
        Some(mut snapshot) => {
            snapshot.error = Some(message.to_string());
            snapshot.last_updated = last_updated.to_string();
            snapshot
        }
        None => WidgetSnapshot::error_only(message, last_updated),
    }
}
