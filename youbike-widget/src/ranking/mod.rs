//! Station ranking.
//!
//! Picks the favorites and the nearest stations for one refresh, and merges
//! them into the order the widget displays.

mod config;
mod merge;
mod rank;

pub use config::{DEFAULT_FAVORITE_IDS, DEFAULT_MAX_NEAREST, RankingConfig};
pub use merge::{DisplayRow, display_rows, merge_for_display};
pub use rank::{
    RankedStations, build_snapshot, rank_with_config, select_favorites, select_nearest,
};
