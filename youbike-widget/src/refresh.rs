//! Refresh cycle: fetch, locate, rank, persist.
//!
//! One cycle is short-lived and runs at most once at a time. Failures are
//! recorded in the store so the widget can show them next to the last good
//! data, and the periodic loop backs off exponentially until the feed
//! recovers.

use std::time::Duration;

use chrono::Local;
use futures::future::join;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{Coordinates, WidgetSnapshot};
use crate::feed::{FetchError, StationSource};
use crate::location::LocationProvider;
use crate::ranking::{RankingConfig, rank_with_config};
use crate::store::{SnapshotStore, StoreError};

/// First delay after a failed cycle.
pub const BACKOFF_BASE: Duration = Duration::from_secs(60);

/// Prefix of the error recorded in the snapshot ("update failed: ").
pub const FAILURE_PREFIX: &str = "更新失敗: ";

/// Error from a refresh cycle.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The station feed could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The snapshot could not be persisted
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Local wall-clock time as shown in the widget footer.
pub fn local_timestamp() -> String {
    Local::now().format("%H:%M").to_string()
}

/// How long to wait before the next cycle after `consecutive_failures`
/// failures in a row.
///
/// Zero failures means the regular `interval`. Otherwise 1 minute, doubling
/// per failure, capped at `interval` (but never below 1 minute).
pub fn backoff_delay(consecutive_failures: u32, interval: Duration) -> Duration {
    if consecutive_failures == 0 {
        return interval;
    }

    let factor = 1u32
        .checked_shl(consecutive_failures - 1)
        .unwrap_or(u32::MAX);
    let cap = interval.max(BACKOFF_BASE);
    BACKOFF_BASE.saturating_mul(factor).min(cap)
}

/// Runs refresh cycles against a station source, location provider and
/// snapshot store.
pub struct Refresher<S, L, St> {
    source: S,
    location: L,
    store: St,
    config: RankingConfig,
    in_flight: Mutex<()>,
}

impl<S, L, St> Refresher<S, L, St>
where
    S: StationSource + Sync,
    L: LocationProvider + Sync,
    St: SnapshotStore + Sync,
{
    pub fn new(source: S, location: L, store: St, config: RankingConfig) -> Self {
        Self {
            source,
            location,
            store,
            config,
            in_flight: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Run one full cycle and persist the result.
    ///
    /// If another cycle is already running this waits for it to finish
    /// first. On a feed failure the error is recorded in the store (keeping
    /// the previous station lists) and returned; ranking is not attempted.
    /// The fetch error is returned even if recording it fails.
    pub async fn refresh_once(&self) -> Result<WidgetSnapshot, RefreshError> {
        let _guard = self.in_flight.lock().await;

        // Both reads are I/O; the location is resolved before ranking starts
        let (stations, location) =
            join(self.source.fetch_stations(), self.read_location()).await;

        let stations = match stations {
            Ok(stations) => stations,
            Err(e) => {
                warn!(error = %e, "station feed unavailable");
                let message = format!("{FAILURE_PREFIX}{e}");
                let recorded = self.store.save_error(&message, &local_timestamp()).await;
                if let Err(store_err) = recorded {
                    warn!(error = %store_err, "could not record refresh failure");
                }
                return Err(e.into());
            }
        };

        let snapshot = rank_with_config(&stations, &self.config, location)
            .into_snapshot(local_timestamp());
        self.store.save(&snapshot).await?;

        info!(
            stations = stations.len(),
            favorites = snapshot.favorites.len(),
            nearest = snapshot.nearest.len(),
            has_location = snapshot.has_location,
            "widget snapshot refreshed"
        );

        Ok(snapshot)
    }

    /// Refresh forever: every `interval` while healthy, backing off after
    /// failures.
    pub async fn run_periodic(&self, interval: Duration) {
        let mut failures = 0u32;
        loop {
            let delay = match self.refresh_once().await {
                Ok(_) => {
                    failures = 0;
                    interval
                }
                Err(e) => {
                    failures = failures.saturating_add(1);
                    let delay = backoff_delay(failures, interval);
                    warn!(error = %e, failures, retry_in_secs = delay.as_secs(), "refresh failed");
                    delay
                }
            };
            tokio::time::sleep(delay).await;
        }
    }

    async fn read_location(&self) -> Option<Coordinates> {
        match self.location.current_location().await {
            Ok(location) => {
                if location.is_none() {
                    debug!("no device location, ranking favorites only");
                }
                location
            }
            Err(e) => {
                warn!(error = %e, "location unavailable, ranking favorites only");
                None
            }
        }
    }
}
