use serde::{Deserialize, Serialize};

use crate::core::primitives::{deserialize_coordinate, deserialize_optional_label, nan};

/// Status shown for markers whose source point carries none.
pub const UNKNOWN_STATUS: &str = "unknown";

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Raw map point as delivered by the metrics payload.
///
/// `null` and blank coordinates read as `0`. Missing or non-numeric ones
/// deserialize to `NaN`; such points are kept here and dropped later by layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(default = "nan", deserialize_with = "deserialize_coordinate")]
    pub lat: f64,
    #[serde(default = "nan", deserialize_with = "deserialize_coordinate")]
    pub lng: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            status: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.position().is_finite()
    }

    /// Status label with empty values treated as absent.
    #[must_use]
    pub fn status_or_unknown(&self) -> &str {
        match self.status.as_deref() {
            Some(status) if !status.is_empty() => status,
            _ => UNKNOWN_STATUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, UNKNOWN_STATUS};

    #[test]
    fn lenient_payload_decoding() {
        let points: Vec<GeoPoint> = serde_json::from_str(
            r#"[
                {"lat": "25.2", "lng": 55.27, "status": "validated"},
                {"lat": null, "lng": 1.0},
                {"lng": 1.0},
                {"lat": 1, "lng": 2, "status": false},
                {"lat": " ", "lng": "x"}
            ]"#,
        )
        .expect("decode points");

        assert_eq!(points.len(), 5);
        assert!(points[0].is_valid());
        assert_eq!(points[0].lat, 25.2);
        assert_eq!(points[0].status_or_unknown(), "validated");
        assert!(points[1].is_valid());
        assert_eq!(points[1].lat, 0.0);
        assert!(!points[2].is_valid());
        assert!(points[3].is_valid());
        assert_eq!(points[3].status, None);
        assert_eq!(points[3].status_or_unknown(), UNKNOWN_STATUS);
        assert!(!points[4].is_valid());
    }

    #[test]
    fn empty_status_reads_as_unknown() {
        let point = GeoPoint::new(1.0, 1.0).with_status("");
        assert_eq!(point.status_or_unknown(), UNKNOWN_STATUS);
    }
}
