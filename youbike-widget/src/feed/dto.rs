//! Wire format of the YouBike 2.0 immediate-availability feed.
//!
//! The feed is a top-level JSON array of station objects. It carries many
//! more fields (area, address, total docks, ...) than we use; those are
//! ignored. Malformed values in the fields we do use fail the whole decode.

use serde::{Deserialize, Serialize};

use crate::domain::{ACTIVE_STATUS, Coordinates, Station, StationId};

use super::error::FetchError;

/// One station record as sent by the feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationDto {
    pub sno: String,
    pub sna: String,
    pub snaen: String,
    pub latitude: f64,
    pub longitude: f64,
    pub available_rent_bikes: u32,
    pub available_return_bikes: u32,
    #[serde(rename = "updateTime")]
    pub update_time: String,
    pub act: String,
}

impl StationDto {
    /// Convert to a domain station, validating coordinates.
    pub fn into_station(self) -> Result<Station, FetchError> {
        let coordinates =
            Coordinates::new(self.latitude, self.longitude).map_err(|e| {
                FetchError::InvalidStation {
                    id: self.sno.clone(),
                    reason: e.to_string(),
                }
            })?;

        Ok(Station {
            id: StationId::new(self.sno),
            name_zh: self.sna,
            name_en: self.snaen,
            coordinates,
            available_rent_bikes: self.available_rent_bikes,
            available_return_bikes: self.available_return_bikes,
            active: self.act == ACTIVE_STATUS,
            updated_at: self.update_time,
        })
    }
}

/// Decode a full feed document. All or nothing: one bad record fails the
/// whole list.
pub fn decode_stations(body: &str) -> Result<Vec<Station>, FetchError> {
    let records: Vec<StationDto> = serde_json::from_str(body).map_err(|e| FetchError::Json {
        message: e.to_string(),
    })?;

    records.into_iter().map(StationDto::into_station).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "sno": "500101232",
            "sna": "YouBike2.0_捷運古亭站(3號出口)",
            "sarea": "中正區",
            "mday": "2025-01-20 10:14:17",
            "ar": "羅斯福路二段164號前方",
            "sareaen": "Zhongzheng Dist.",
            "snaen": "YouBike2.0_MRT Guting Sta. (Exit 3)",
            "aren": "No. 164, Sec. 2, Roosevelt Rd.",
            "act": "1",
            "srcUpdateTime": "2025-01-20 10:15:17",
            "updateTime": "2025-01-20 10:15:03",
            "infoTime": "2025-01-20 10:14:17",
            "infoDate": "2025-01-20",
            "total": 28,
            "available_rent_bikes": 4,
            "latitude": 25.02605,
            "longitude": 121.5228,
            "available_return_bikes": 24
        },
        {
            "sno": "500101105",
            "sna": "YouBike2.0_和平金山路口",
            "snaen": "YouBike2.0_Heping & Jinshan Intersection",
            "act": "0",
            "updateTime": "2025-01-20 10:15:03",
            "available_rent_bikes": 0,
            "latitude": 25.02815,
            "longitude": 121.52387,
            "available_return_bikes": 0
        }
    ]"#;

    #[test]
    fn decodes_and_ignores_unknown_fields() {
        let stations = decode_stations(SAMPLE).unwrap();
        assert_eq!(stations.len(), 2);

        let guting = &stations[0];
        assert_eq!(guting.id.as_str(), "500101232");
        assert_eq!(guting.name_en, "YouBike2.0_MRT Guting Sta. (Exit 3)");
        assert_eq!(guting.available_rent_bikes, 4);
        assert_eq!(guting.available_return_bikes, 24);
        assert_eq!(guting.coordinates.latitude, 25.02605);
        assert_eq!(guting.updated_at, "2025-01-20 10:15:03");
        assert!(guting.active);
    }

    #[test]
    fn act_other_than_one_is_inactive() {
        let stations = decode_stations(SAMPLE).unwrap();
        assert!(!stations[1].active);
    }

    #[test]
    fn empty_array_is_empty_list() {
        assert!(decode_stations("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_number_fails_whole_fetch() {
        let body = SAMPLE.replacen(
            "\"available_rent_bikes\": 4",
            "\"available_rent_bikes\": \"four\"",
            1,
        );
        assert!(matches!(decode_stations(&body), Err(FetchError::Json { .. })));
    }

    #[test]
    fn negative_bike_count_fails() {
        let body = SAMPLE.replacen(
            "\"available_rent_bikes\": 4",
            "\"available_rent_bikes\": -1",
            1,
        );
        assert!(matches!(decode_stations(&body), Err(FetchError::Json { .. })));
    }

    #[test]
    fn missing_field_fails() {
        let body =
            r#"[{"sno": "1", "sna": "a", "snaen": "b", "latitude": 25.0, "longitude": 121.0}]"#;
        assert!(matches!(decode_stations(body), Err(FetchError::Json { .. })));
    }

    #[test]
    fn out_of_range_coordinates_fail() {
        let body = SAMPLE.replacen("25.02605", "250.2605", 1);
        match decode_stations(&body) {
            Err(FetchError::InvalidStation { id, .. }) => assert_eq!(id, "500101232"),
            other => panic!("expected InvalidStation, got {other:?}"),
        }
    }

    #[test]
    fn non_array_document_fails() {
        assert!(decode_stations(r#"{"retCode": 1}"#).is_err());
    }
}
