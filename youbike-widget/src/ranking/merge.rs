//! Merging favorites and nearest stations into the single list the widget
//! draws.

use std::collections::HashSet;

use crate::domain::{RankedStation, WidgetSnapshot};

/// One row of the widget table.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub station: RankedStation,
    pub is_favorite: bool,
}

/// Combine favorites and nearest into one list.
///
/// Deduplicated by station id, keeping the first occurrence with favorites
/// ahead of nearest entries. Then sorted ascending by distance with unknown
/// distances last; ties keep their merged order.
pub fn merge_for_display(
    favorites: &[RankedStation],
    nearest: &[RankedStation],
) -> Vec<DisplayRow> {
    let mut seen = HashSet::new();

    let mut rows: Vec<DisplayRow> = favorites
        .iter()
        .map(|s| (s, true))
        .chain(nearest.iter().map(|s| (s, false)))
        .filter(|(s, _)| seen.insert(s.station.id.clone()))
        .map(|(s, is_favorite)| DisplayRow {
            station: s.clone(),
            is_favorite,
        })
        .collect();

    rows.sort_by_key(|row| {
        let distance = row.station.distance_meters();
        (distance.is_none(), distance)
    });
    rows
}

/// [`merge_for_display`] over a stored snapshot.
pub fn display_rows(snapshot: &WidgetSnapshot) -> Vec<DisplayRow> {
    merge_for_display(&snapshot.favorites, &snapshot.nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Placement, Station, StationId};

    fn ranked(id: &str, distance: Option<u32>) -> RankedStation {
        RankedStation {
            station: Station {
                id: StationId::new(id),
                name_zh: String::new(),
                name_en: String::new(),
                coordinates: Coordinates::new(25.0, 121.5).unwrap(),
                available_rent_bikes: 0,
                available_return_bikes: 0,
                active: true,
                updated_at: String::new(),
            },
            placement: distance.map(|distance_meters| Placement {
                distance_meters,
                bearing_degrees: 0.0,
            }),
        }
    }

    fn ids(rows: &[DisplayRow]) -> Vec<&str> {
        rows.iter().map(|r| r.station.station.id.as_str()).collect()
    }

    #[test]
    fn sorts_everything_by_distance() {
        let favorites = vec![ranked("f1", Some(800)), ranked("f2", Some(50))];
        let nearest = vec![ranked("n1", Some(30)), ranked("n2", Some(400))];

        let rows = merge_for_display(&favorites, &nearest);

        assert_eq!(ids(&rows), vec!["n1", "f2", "n2", "f1"]);
        assert!(rows[1].is_favorite);
        assert!(!rows[0].is_favorite);
    }

    #[test]
    fn favorite_wins_duplicate_id() {
        let favorites = vec![ranked("same", Some(100))];
        let nearest = vec![ranked("same", Some(5)), ranked("other", Some(200))];

        let rows = merge_for_display(&favorites, &nearest);

        assert_eq!(ids(&rows), vec!["same", "other"]);
        assert!(rows[0].is_favorite);
        assert_eq!(rows[0].station.distance_meters(), Some(100));
    }

    #[test]
    fn unknown_distances_sort_last_in_order() {
        let favorites = vec![ranked("u1", None), ranked("k", Some(900)), ranked("u2", None)];

        let rows = merge_for_display(&favorites, &[]);

        assert_eq!(ids(&rows), vec!["k", "u1", "u2"]);
    }

    #[test]
    fn ties_keep_favorites_first() {
        let favorites = vec![ranked("f", Some(10))];
        let nearest = vec![ranked("n", Some(10))];

        let rows = merge_for_display(&favorites, &nearest);

        assert_eq!(ids(&rows), vec!["f", "n"]);
    }

    #[test]
    fn empty_snapshot_has_no_rows() {
        assert!(display_rows(&WidgetSnapshot::default()).is_empty());
    }
}
