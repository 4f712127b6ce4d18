//! Application configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{Coordinates, InvalidCoordinates, Language, StationId};
use crate::feed::DEFAULT_FEED_URL;
use crate::ranking::RankingConfig;
use crate::store::DEFAULT_SNAPSHOT_PATH;

/// Default refresh interval in minutes.
pub const DEFAULT_REFRESH_MINUTES: u64 = 10;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    NotPositive { name: &'static str, value: String },

    #[error("{name}: {source}")]
    Location {
        name: &'static str,
        #[source]
        source: InvalidCoordinates,
    },

    #[error("{name} is not a socket address: {value:?}")]
    BindAddr { name: &'static str, value: String },
}

/// Everything the binary needs to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Station feed URL
    pub api_url: String,
    /// Pinned stations and nearest count
    pub ranking: RankingConfig,
    /// Time between scheduled refreshes
    pub refresh_interval: Duration,
    /// Fixed device position, if known
    pub device_location: Option<Coordinates>,
    /// Which station names to show
    pub language: Language,
    /// Where the snapshot is persisted
    pub snapshot_path: PathBuf,
    /// Serve stations from this feed-format file instead of the network
    pub feed_file: Option<PathBuf>,
    /// HTTP listen address
    pub bind_addr: SocketAddr,
    /// Stylesheets served under `/static`
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `YOUBIKE_API_URL` | Taipei YouBike 2.0 feed |
    /// | `FAVORITE_STATIONS` | three Taipei stations, comma-separated ids |
    /// | `MAX_NEAREST_STATIONS` | 2 |
    /// | `REFRESH_INTERVAL_MINUTES` | 10 |
    /// | `DEVICE_LOCATION` | unset (`lat,lon`) |
    /// | `DISPLAY_LANGUAGE` | `zh` |
    /// | `SNAPSHOT_PATH` | `widget_snapshot.json` |
    /// | `FEED_FILE` | unset |
    /// | `BIND_ADDR` | `127.0.0.1:3000` |
    /// | `STATIC_DIR` | the crate's `static/` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = RankingConfig::default();

        let favorite_ids = match get("FAVORITE_STATIONS") {
            Some(list) => parse_id_list(&list),
            None => defaults.favorite_ids,
        };

        let max_nearest = match get("MAX_NEAREST_STATIONS") {
            Some(v) => parse_positive("MAX_NEAREST_STATIONS", &v)? as usize,
            None => defaults.max_nearest,
        };

        let refresh_minutes = match get("REFRESH_INTERVAL_MINUTES") {
            Some(v) => parse_positive("REFRESH_INTERVAL_MINUTES", &v)?,
            None => DEFAULT_REFRESH_MINUTES,
        };

        let device_location = get("DEVICE_LOCATION")
            .map(|v| Coordinates::parse(&v))
            .transpose()
            .map_err(|source| ConfigError::Location {
                name: "DEVICE_LOCATION",
                source,
            })?;

        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.trim().parse().map_err(|_| ConfigError::BindAddr {
            name: "BIND_ADDR",
            value: bind.clone(),
        })?;

        Ok(Self {
            api_url: get("YOUBIKE_API_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            ranking: RankingConfig::new(favorite_ids, max_nearest),
            refresh_interval: Duration::from_secs(refresh_minutes * 60),
            device_location,
            language: get("DISPLAY_LANGUAGE")
                .map(|tag| Language::from_tag(&tag))
                .unwrap_or_default(),
            snapshot_path: get("SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
            feed_file: get("FEED_FILE").map(PathBuf::from),
            bind_addr,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }
}

/// Split a comma-separated id list, dropping blanks. Order is kept.
fn parse_id_list(list: &str) -> Vec<StationId> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(StationId::from)
        .collect()
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::NotPositive {
            name,
            value: value.to_string(),
        }),
    }
}
