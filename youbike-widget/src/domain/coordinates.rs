//! Geographic coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when coordinates are out of range or unparseable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A WGS84 position in decimal degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180], both
/// finite. Construction and deserialization both go through
/// [`Coordinates::new`], so this holds for every `Coordinates` in the crate.
///
/// # Examples
///
/// ```
/// use youbike_widget::domain::Coordinates;
///
/// let guting = Coordinates::parse("25.02605, 121.5228").unwrap();
/// assert_eq!(guting.latitude, 25.02605);
///
/// assert!(Coordinates::parse("91,0").is_err());
/// assert!(Coordinates::parse("25.0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCoordinates")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Wire shape of [`Coordinates`] before range checks.
#[derive(Deserialize)]
struct UncheckedCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<UncheckedCoordinates> for Coordinates {
    type Error = InvalidCoordinates;

    fn try_from(raw: UncheckedCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Create coordinates, validating ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinates {
                reason: "must be finite numbers",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a `"lat,lon"` pair. Whitespace around either number is allowed.
    pub fn parse(s: &str) -> Result<Self, InvalidCoordinates> {
        let (lat, lon) = s.split_once(',').ok_or(InvalidCoordinates {
            reason: "expected \"latitude,longitude\"",
        })?;

        let latitude = lat.trim().parse::<f64>().map_err(|_| InvalidCoordinates {
            reason: "latitude is not a number",
        })?;
        let longitude = lon.trim().parse::<f64>().map_err(|_| InvalidCoordinates {
            reason: "longitude is not a number",
        })?;

        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_extremes() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinates::new(90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn parse_pair() {
        let c = Coordinates::parse(" 25.0330 ,121.5654 ").unwrap();
        assert_eq!(c.latitude, 25.0330);
        assert_eq!(c.longitude, 121.5654);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Coordinates::parse("").is_err());
        assert!(Coordinates::parse("abc,def").is_err());
        assert!(Coordinates::parse("25.0;121.5").is_err());
        assert!(Coordinates::parse("25.0,").is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let c = Coordinates::new(25.04, 121.51).unwrap();
        assert_eq!(Coordinates::parse(&c.to_string()).unwrap(), c);
    }

    #[test]
    fn deserialization_checks_ranges() {
        let ok: Coordinates =
            serde_json::from_str(r#"{"latitude": 25.04, "longitude": 121.51}"#).unwrap();
        assert_eq!(ok, Coordinates::new(25.04, 121.51).unwrap());

        let out_of_range = r#"{"latitude": 125.0, "longitude": 121.51}"#;
        let err = serde_json::from_str::<Coordinates>(out_of_range).unwrap_err();
        assert!(err.to_string().contains("latitude must be within [-90, 90]"));
    }

    #[test]
    fn error_display() {
        let err = Coordinates::new(100.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinates: latitude must be within [-90, 90]"
        );
    }
}
