//! Favorite selection and proximity ranking.
//!
//! Pure and synchronous: given the full station list, the pinned ids and an
//! optional device location, decide which stations the widget shows.

use std::collections::HashSet;

use crate::domain::{Coordinates, Placement, RankedStation, Station, StationId, WidgetSnapshot};
use crate::geo::{bearing_degrees, distance_meters};

use super::config::RankingConfig;

/// Station lists chosen for one refresh cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedStations {
    /// Favorites in configured order.
    pub favorites: Vec<RankedStation>,
    /// Closest non-favorite stations, nearest first.
    pub nearest: Vec<RankedStation>,
    /// Whether a device location was available.
    pub has_location: bool,
}

impl RankedStations {
    /// Wrap into a snapshot stamped with the given refresh time.
    pub fn into_snapshot(self, last_updated: impl Into<String>) -> WidgetSnapshot {
        let feed_updated_at = self
            .favorites
            .iter()
            .chain(&self.nearest)
            .map(|r| r.station.updated_at.as_str())
            .filter(|t| !t.is_empty())
            .max()
            .map(str::to_string);

        WidgetSnapshot {
            nearest: self.nearest,
            favorites: self.favorites,
            last_updated: last_updated.into(),
            has_location: self.has_location,
            error: None,
            feed_updated_at,
        }
    }
}

/// Build the ranked lists for one refresh.
///
/// 1. Favorites: for each pinned id in order, the first *active* station
///    with that id. Ids not found are dropped.
/// 2. Nearest (only with a location): active stations that are not
///    favorites, sorted by distance (stable on ties), truncated to
///    `max_nearest`.
/// 3. Favorites get a placement when a location is known, `None` otherwise.
///
/// Never fails; an empty station list yields empty lists.
pub fn build_snapshot(
    all_stations: &[Station],
    favorite_ids: &[StationId],
    max_nearest: usize,
    location: Option<Coordinates>,
) -> RankedStations {
    let favorites = select_favorites(all_stations, favorite_ids);

    let (favorites, nearest) = match location {
        Some(here) => {
            let excluded: HashSet<&StationId> = favorite_ids.iter().collect();
            let nearest = select_nearest(all_stations, here, max_nearest, &excluded);
            (place_all(favorites, here), nearest)
        }
        None => (favorites, Vec::new()),
    };

    RankedStations {
        favorites,
        nearest,
        has_location: location.is_some(),
    }
}

/// [`build_snapshot`] driven by a [`RankingConfig`].
pub fn rank_with_config(
    all_stations: &[Station],
    config: &RankingConfig,
    location: Option<Coordinates>,
) -> RankedStations {
    build_snapshot(
        all_stations,
        &config.favorite_ids,
        config.max_nearest,
        location,
    )
}

/// Pinned stations in pinned order, without placement.
pub fn select_favorites(
    all_stations: &[Station],
    favorite_ids: &[StationId],
) -> Vec<RankedStation> {
    favorite_ids
        .iter()
        .filter_map(|id| {
            all_stations
                .iter()
                .find(|s| s.active && &s.id == id)
                .cloned()
                .map(RankedStation::unplaced)
        })
        .collect()
}

/// The `count` closest active stations not in `excluded`.
pub fn select_nearest(
    all_stations: &[Station],
    here: Coordinates,
    count: usize,
    excluded: &HashSet<&StationId>,
) -> Vec<RankedStation> {
    let mut candidates: Vec<RankedStation> = all_stations
        .iter()
        .filter(|s| s.active && !excluded.contains(&s.id))
        .map(|s| RankedStation {
            station: s.clone(),
            placement: Some(placement(here, s)),
        })
        .collect();

    // sort_by_key is stable, so equal distances keep feed order
    candidates.sort_by_key(|r| r.distance_meters());
    candidates.truncate(count);
    candidates
}

fn place_all(stations: Vec<RankedStation>, here: Coordinates) -> Vec<RankedStation> {
    stations
        .into_iter()
        .map(|mut r| {
            r.placement = Some(placement(here, &r.station));
            r
        })
        .collect()
}

fn placement(here: Coordinates, station: &Station) -> Placement {
    Placement {
        distance_meters: distance_meters(here, station.coordinates),
        bearing_degrees: bearing_degrees(here, station.coordinates),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn station() -> impl Strategy<Value = Station> {
        (0u8..20, 24.9f64..25.1, 121.4f64..121.6, any::<bool>()).prop_map(
            |(id, lat, lon, active)| Station {
                id: StationId::new(id.to_string()),
                name_zh: String::new(),
                name_en: String::new(),
                coordinates: Coordinates::new(lat, lon).unwrap(),
                available_rent_bikes: 0,
                available_return_bikes: 0,
                active,
                updated_at: String::new(),
            },
        )
    }

    fn favorite_ids() -> impl Strategy<Value = Vec<StationId>> {
        prop::collection::vec((0u8..20).prop_map(|id| StationId::new(id.to_string())), 0..5)
    }

    proptest! {
        #[test]
        fn nearest_is_bounded_and_sorted(
            all in prop::collection::vec(station(), 0..40),
            favorites in favorite_ids(),
            max in 0usize..6,
        ) {
            let here = Coordinates::new(25.0, 121.5).unwrap();
            let ranked = build_snapshot(&all, &favorites, max, Some(here));

            prop_assert!(ranked.nearest.len() <= max);
            let distances: Vec<_> = ranked.nearest.iter().map(|r| r.distance_meters()).collect();
            prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn only_active_and_exclusion_holds(
            all in prop::collection::vec(station(), 0..40),
            favorites in favorite_ids(),
        ) {
            let here = Coordinates::new(25.0, 121.5).unwrap();
            let ranked = build_snapshot(&all, &favorites, 10, Some(here));

            for r in ranked.favorites.iter().chain(&ranked.nearest) {
                prop_assert!(r.station.active);
            }
            for r in &ranked.nearest {
                prop_assert!(!favorites.contains(&r.station.id));
            }
        }

        #[test]
        fn no_location_means_no_placements(
            all in prop::collection::vec(station(), 0..40),
            favorites in favorite_ids(),
        ) {
            let ranked = build_snapshot(&all, &favorites, 10, None);

            prop_assert!(ranked.nearest.is_empty());
            prop_assert!(ranked.favorites.iter().all(|r| r.placement.is_none()));
            prop_assert!(ranked.favorites.len() <= favorites.len());
        }
    }
}
