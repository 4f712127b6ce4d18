//! Offline station source for development and tests.
//!
//! Serves a station list loaded from a JSON file in the feed's own format,
//! as if it were the live feed.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Station;

use super::StationSource;
use super::dto::decode_stations;
use super::error::FetchError;

/// Station source backed by a snapshot of the feed on disk.
#[derive(Debug, Clone)]
pub struct MockFeed {
    stations: Arc<RwLock<Vec<Station>>>,
}

impl MockFeed {
    /// Load stations from a feed-format JSON file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let stations = load(path.as_ref())?;
        Ok(Self::from_stations(stations))
    }

    /// Serve a fixed in-memory list.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        Self {
            stations: Arc::new(RwLock::new(stations)),
        }
    }

    /// Replace the served list (e.g. to simulate availability changing).
    pub async fn set_stations(&self, stations: Vec<Station>) {
        *self.stations.write().await = stations;
    }
}

impl StationSource for MockFeed {
    async fn fetch_stations(&self) -> Result<Vec<Station>, FetchError> {
        Ok(self.stations.read().await.clone())
    }
}

fn load(path: &Path) -> Result<Vec<Station>, FetchError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        FetchError::Transport(format!("failed to read {}: {}", path.display(), e))
    })?;
    decode_stations(&json)
}
