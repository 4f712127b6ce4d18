//! In-process snapshot store.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::WidgetSnapshot;

use super::error::StoreError;
use super::{SnapshotStore, with_error};

/// Keeps the snapshot in memory. Lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Option<WidgetSnapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    async fn load(&self) -> Result<Option<WidgetSnapshot>, StoreError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, snapshot: &WidgetSnapshot) -> Result<(), StoreError> {
        *self.inner.write().await = Some(snapshot.clone());
        Ok(())
    }

    async fn save_error(&self, message: &str, last_updated: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let updated = with_error(guard.take(), message, last_updated);
        *guard = Some(updated);
        Ok(())
    }
}
