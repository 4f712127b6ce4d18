//! Spherical-earth distance and bearing.
//!
//! Short-range approximations only: the earth is treated as a sphere of
//! radius 6,371 km. Good enough to rank docking stations a few hundred
//! metres apart, not a general projection library.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Coordinates;

/// Mean earth radius in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two points, using the haversine formula.
///
/// The result is truncated (not rounded) to whole metres.
pub fn distance_meters(from: Coordinates, to: Coordinates) -> u32 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_phi = (to.latitude - from.latitude).to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    // Rounding can push `a` just past 1 near the antipode
    let a = ((delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    // `as` truncates toward zero and saturates on overflow
    (EARTH_RADIUS_METERS * c) as u32
}

/// Initial bearing (forward azimuth) from `from` to `to`, in degrees.
///
/// This is the raw `atan2` output in [-180, 180]. It is deliberately not
/// normalized; use [`normalize_bearing`] at presentation time.
///
/// Identical points yield `0.0`.
pub fn bearing_degrees(from: Coordinates, to: Coordinates) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let x = phi2.cos() * delta_lambda.sin();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    x.atan2(y).to_degrees()
}

/// Map any bearing in degrees onto [0, 360).
pub fn normalize_bearing(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// One of the eight principal compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    const ALL: [CompassPoint; 8] = [
        CompassPoint::North,
        CompassPoint::NorthEast,
        CompassPoint::East,
        CompassPoint::SouthEast,
        CompassPoint::South,
        CompassPoint::SouthWest,
        CompassPoint::West,
        CompassPoint::NorthWest,
    ];

    /// Bucket a bearing into a 45° sector centred on each compass point.
    ///
    /// Accepts raw or normalized bearings.
    pub fn from_bearing(degrees: f64) -> Self {
        let normalized = normalize_bearing(degrees);
        let sector = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        Self::ALL[sector]
    }

    /// Arrow glyph pointing in this direction.
    pub fn arrow(&self) -> &'static str {
        match self {
            CompassPoint::North => "↑",
            CompassPoint::NorthEast => "↗",
            CompassPoint::East => "→",
            CompassPoint::SouthEast => "↘",
            CompassPoint::South => "↓",
            CompassPoint::SouthWest => "↙",
            CompassPoint::West => "←",
            CompassPoint::NorthWest => "↖",
        }
    }

    /// Short label, e.g. "NE".
    pub fn abbreviation(&self) -> &'static str {
        match self {
            CompassPoint::North => "N",
            CompassPoint::NorthEast => "NE",
            CompassPoint::East => "E",
            CompassPoint::SouthEast => "SE",
            CompassPoint::South => "S",
            CompassPoint::SouthWest => "SW",
            CompassPoint::West => "W",
            CompassPoint::NorthWest => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
