//! Stations annotated with their position relative to the device.

use serde::{Deserialize, Serialize};

use crate::geo::CompassPoint;

use super::Station;

/// Where a station lies relative to the reference point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Great-circle distance, truncated to whole metres.
    pub distance_meters: u32,
    /// Raw initial bearing in [-180, 180]. Normalize before display.
    pub bearing_degrees: f64,
}

/// A station plus its placement, if a device location was known.
///
/// A bearing only exists alongside a distance, so "unknown distance" is
/// simply `placement == None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStation {
    pub station: Station,
    pub placement: Option<Placement>,
}

impl RankedStation {
    /// A station with no known placement.
    pub fn unplaced(station: Station) -> Self {
        Self {
            station,
            placement: None,
        }
    }

    pub fn distance_meters(&self) -> Option<u32> {
        self.placement.map(|p| p.distance_meters)
    }

    /// Compass direction from the device to the station.
    pub fn compass(&self) -> Option<CompassPoint> {
        self.placement
            .map(|p| CompassPoint::from_bearing(p.bearing_degrees))
    }

    /// Distance for display: `"350 m"`, `"1.2 km"`, or `"-"` when unknown.
    pub fn formatted_distance(&self) -> String {
        match self.distance_meters() {
            None => "-".to_string(),
            Some(m) if m < 1000 => format!("{m} m"),
            Some(m) => format!("{:.1} km", f64::from(m) / 1000.0),
        }
    }
}
