//! GeoJSON Point 값 객체
//!
//! MongoDB `2dsphere` 인덱스가 요구하는 형식 그대로 저장합니다.
//! 좌표 순서는 GeoJSON 규약에 따라 `[경도, 위도]`입니다.

use serde::{Deserialize, Serialize};
use crate::errors::AppError;
use crate::utils::geo::validate_coordinates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, AppError> {
        validate_coordinates(lat, lng)?;
        Ok(Self {
            kind: "Point".to_string(),
            coordinates: [lng, lat],
        })
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn lng(&self) -> f64 {
        self.coordinates[0]
    }
}

/// API에서 주고받는 위도/경도 쌍
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl TryFrom<Coordinates> for GeoPoint {
    type Error = AppError;

    fn try_from(value: Coordinates) -> Result<Self, Self::Error> {
        GeoPoint::new(value.lat, value.lng)
    }
}

impl From<&GeoPoint> for Coordinates {
    fn from(point: &GeoPoint) -> Self {
        Self {
            lat: point.lat(),
            lng: point.lng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_stores_lng_first() {
        let point = GeoPoint::new(37.5, 127.0).unwrap();

        assert_eq!(point.coordinates, [127.0, 37.5]);
        assert_eq!(point.lat(), 37.5);
        assert_eq!(point.lng(), 127.0);
    }

    #[test]
    fn test_point_serializes_as_geojson() {
        let point = GeoPoint::new(1.0, 2.0).unwrap();
        let json = serde_json::to_value(&point).unwrap();

        assert_eq!(json, serde_json::json!({"type": "Point", "coordinates": [2.0, 1.0]}));
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        assert!(GeoPoint::try_from(Coordinates { lat: 100.0, lng: 0.0 }).is_err());
    }
}
