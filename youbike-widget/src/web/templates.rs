//! Askama templates for the widget page.

use askama::Template;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::domain::{Language, WidgetSnapshot};
use crate::ranking::{DisplayRow, display_rows};

/// Availability at or below this count is flagged as low.
const LOW_AVAILABILITY: u32 = 3;

/// Everything but RFC 3986 unreserved characters gets escaped in map labels.
const MAP_LABEL: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The widget itself: a compact station table.
#[derive(Template)]
#[template(path = "widget.html")]
pub struct WidgetTemplate {
    pub view: WidgetView,
}

/// What the widget should show.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    /// No snapshot has been stored yet.
    Loading,
    /// The last refresh failed and there is nothing else to show.
    Error(String),
    /// Station table, possibly with a stale-data warning.
    Table(TableView),
}

/// The station table with its footer.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<RowView>,
    pub last_updated: String,
    pub feed_updated_at: Option<String>,
    pub has_location: bool,
    pub error: Option<String>,
}

/// One station row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub name: String,
    pub is_favorite: bool,
    pub distance: String,
    pub arrow: String,
    pub spots: u32,
    pub spots_class: &'static str,
    pub bikes: u32,
    pub bikes_class: &'static str,
    pub map_url: String,
}

impl WidgetView {
    /// Decide what to show for the stored snapshot.
    pub fn from_snapshot(snapshot: Option<&WidgetSnapshot>, language: Language) -> Self {
        let Some(snapshot) = snapshot else {
            return WidgetView::Loading;
        };

        if !snapshot.has_stations() {
            return match &snapshot.error {
                Some(message) => WidgetView::Error(message.clone()),
                None => WidgetView::Loading,
            };
        }

        let rows = display_rows(snapshot)
            .iter()
            .map(|row| RowView::from_row(row, language))
            .collect();

        WidgetView::Table(TableView {
            rows,
            last_updated: snapshot.last_updated.clone(),
            feed_updated_at: snapshot.feed_updated_at.clone(),
            has_location: snapshot.has_location,
            error: snapshot.error.clone(),
        })
    }
}

impl RowView {
    fn from_row(row: &DisplayRow, language: Language) -> Self {
        let ranked = &row.station;
        let station = &ranked.station;
        let name = station.display_name(language).to_string();
        let lat = station.coordinates.latitude;
        let lon = station.coordinates.longitude;

        Self {
            map_url: map_url(lat, lon, &name),
            name,
            is_favorite: row.is_favorite,
            distance: ranked.formatted_distance(),
            arrow: ranked
                .compass()
                .map(|c| c.arrow().to_string())
                .unwrap_or_default(),
            spots: station.available_return_bikes,
            spots_class: availability_class(station.available_return_bikes),
            bikes: station.available_rent_bikes,
            bikes_class: availability_class(station.available_rent_bikes),
        }
    }
}

/// `geo:` link that drops a labelled pin on the station.
pub fn map_url(lat: f64, lon: f64, label: &str) -> String {
    let label = utf8_percent_encode(label, MAP_LABEL);
    format!("geo:{lat},{lon}?q={lat},{lon}({label})")
}

/// CSS class for a bike or dock count: none left, running low, or fine.
pub fn availability_class(count: u32) -> &'static str {
    match count {
        0 => "empty",
        n if n <= LOW_AVAILABILITY => "low",
        _ => "ok",
    }
}
