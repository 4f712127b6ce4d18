//! Station lookup by name, for finding ids to pin as favorites.

use crate::domain::Station;

/// Case-insensitive substring search over station id and both names.
///
/// Results keep feed order and stop at `limit`.
pub fn search_stations<'a>(
    stations: &'a [Station],
    query: &str,
    limit: usize,
) -> Vec<&'a Station> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    stations
        .iter()
        .filter(|s| {
            s.id.as_str().contains(&needle)
                || s.name_zh.to_lowercase().contains(&needle)
                || s.name_en.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect()
}
