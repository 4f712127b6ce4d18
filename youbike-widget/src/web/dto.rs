//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Language, Station};

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Upper bound on search results.
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Query for station search.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Search text (id or part of a name)
    #[serde(default)]
    pub q: String,

    /// Maximum results (default 10, at most 50)
    pub limit: Option<usize>,
}

impl StationSearchRequest {
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .min(MAX_SEARCH_LIMIT)
    }
}

/// A station matching a search.
#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    /// Station id, usable in `FAVORITE_STATIONS`
    pub id: String,

    /// Name in the configured display language
    pub name: String,

    pub name_zh: String,
    pub name_en: String,
    pub available_rent_bikes: u32,
    pub available_return_bikes: u32,
    pub active: bool,
}

impl StationSearchResult {
    pub fn from_station(station: &Station, language: Language) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.display_name(language).to_string(),
            name_zh: station.name_zh.clone(),
            name_en: station.name_en.clone(),
            available_rent_bikes: station.available_rent_bikes,
            available_return_bikes: station.available_return_bikes,
            active: station.active,
        }
    }
}

/// Response to a station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
