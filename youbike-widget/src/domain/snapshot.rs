//! The persisted unit handed to the display layer.

use serde::{Deserialize, Serialize};

use super::RankedStation;

/// Everything the widget needs to draw itself.
///
/// A fresh snapshot is built on every refresh and fully replaces the
/// previous one. Station lists from different refresh cycles are never
/// merged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    /// Closest non-favorite stations, nearest first.
    pub nearest: Vec<RankedStation>,
    /// Favorite stations in configured order (not proximity order).
    pub favorites: Vec<RankedStation>,
    /// Local wall-clock time of the refresh, `HH:MM`.
    pub last_updated: String,
    /// Whether a device location was available for this snapshot.
    pub has_location: bool,
    /// Set when the most recent refresh failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Latest feed update time among the stations shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_updated_at: Option<String>,
}

impl WidgetSnapshot {
    /// A snapshot carrying only an error, for when nothing was stored yet.
    pub fn error_only(message: impl Into<String>, last_updated: impl Into<String>) -> Self {
        Self {
            last_updated: last_updated.into(),
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// True if there is at least one station to show.
    pub fn has_stations(&self) -> bool {
        !self.nearest.is_empty() || !self.favorites.is_empty()
    }
}
