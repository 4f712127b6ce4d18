//! Docking station types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Branding prefix the feed puts in front of every station name.
const NAME_PREFIX: &str = "YouBike2.0_";

/// Feed status code for a station that is in service.
pub const ACTIVE_STATUS: &str = "1";

/// A station identifier (the feed's `sno`).
///
/// Stable across fetches. Not guaranteed unique within a single fetch, so
/// lookups always take the first match.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Which of the two localized station names to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Chinese,
    English,
}

impl Language {
    /// Pick a language from a BCP 47-ish tag. Anything starting with `zh`
    /// is Chinese; everything else falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("zh") {
            Language::Chinese
        } else {
            Language::English
        }
    }
}

/// One docking station as reported by the feed at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    /// Primary (Chinese) name, as sent by the feed.
    pub name_zh: String,
    /// Alternate (English) name, as sent by the feed.
    pub name_en: String,
    pub coordinates: Coordinates,
    /// Bikes available to rent.
    pub available_rent_bikes: u32,
    /// Empty docks available for returning a bike.
    pub available_return_bikes: u32,
    /// Only active stations are eligible for ranking.
    pub active: bool,
    /// Feed-reported update time. Opaque; passed through untouched.
    pub updated_at: String,
}

impl Station {
    /// Localized display name with the feed's branding prefix removed.
    pub fn display_name(&self, language: Language) -> &str {
        let name = match language {
            Language::Chinese => &self.name_zh,
            Language::English => &self.name_en,
        };
        name.strip_prefix(NAME_PREFIX).unwrap_or(name)
    }
}
