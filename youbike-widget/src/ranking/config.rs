//! Ranking configuration.

use crate::domain::StationId;

/// Favorites pinned by default: Guting MRT exit 3, Heping/Jinshan, Songshan
/// Senior High.
pub const DEFAULT_FAVORITE_IDS: [&str; 3] = ["500101232", "500101105", "500112054"];

/// Default number of nearest stations shown alongside favorites.
pub const DEFAULT_MAX_NEAREST: usize = 2;

/// Parameters for building a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// Pinned stations, in display order.
    pub favorite_ids: Vec<StationId>,

    /// Maximum number of nearest (non-favorite) stations.
    pub max_nearest: usize,
}

impl RankingConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(favorite_ids: Vec<StationId>, max_nearest: usize) -> Self {
        Self {
            favorite_ids,
            max_nearest,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            favorite_ids: DEFAULT_FAVORITE_IDS.iter().map(|&id| id.into()).collect(),
            max_nearest: DEFAULT_MAX_NEAREST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RankingConfig::default();

        assert_eq!(config.max_nearest, 2);
        assert_eq!(
            config.favorite_ids,
            vec![
                StationId::new("500101232"),
                StationId::new("500101105"),
                StationId::new("500112054"),
            ]
        );
    }

    #[test]
    fn custom_config() {
        let config = RankingConfig::new(vec![StationId::new("1")], 5);

        assert_eq!(config.favorite_ids.len(), 1);
        assert_eq!(config.max_nearest, 5);
    }
}
