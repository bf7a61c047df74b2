//! 좌표 검증과 거리 계산

use crate::domain::entities::common::GeoPoint;
use crate::errors::AppError;

/// 지구 평균 반지름 (km). MongoDB `$centerSphere`도 같은 값을 기준으로 라디안을 계산합니다.
pub const EARTH_RADIUS_KM: f64 = 6378.1;

/// 반경 검색 기본값 (km)
pub const DEFAULT_RADIUS_KM: f64 = 25.0;

pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), AppError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(AppError::ValidationError("Coordinates must be numbers".to_string()));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::ValidationError(format!("Latitude out of range: {}", lat)));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::ValidationError(format!("Longitude out of range: {}", lng)));
    }
    Ok(())
}

/// `$centerSphere` 반경 (라디안)
pub fn km_to_radians(km: f64) -> f64 {
    km / EARTH_RADIUS_KM
}

/// 두 좌표 사이의 대원 거리 (km, haversine)
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// 반경 검색 조건을 검증합니다. 위도와 경도는 함께 주어져야 하고, 반경이 없으면 기본값을 씁니다.
pub fn search_area(lat: Option<f64>, lng: Option<f64>, radius_km: Option<f64>) -> Result<Option<(GeoPoint, f64)>, AppError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => {
            let radius = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
            if !radius.is_finite() || radius <= 0.0 {
                return Err(AppError::ValidationError("radius_km must be a positive number".to_string()));
            }
            Ok(Some((GeoPoint::new(lat, lng)?, radius)))
        }
        (None, None) => Ok(None),
        _ => Err(AppError::ValidationError("lat and lng must be provided together".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(37.5665, 126.9780).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_distance_is_zero_for_same_point() {
        assert!(distance_km(37.5, 127.0, 37.5, 127.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_seoul_to_busan() {
        let d = distance_km(37.5665, 126.9780, 35.1796, 129.0756);
        assert!((320.0..330.0).contains(&d), "unexpected distance {}", d);
    }

    #[test]
    fn test_search_area() {
        assert!(search_area(None, None, Some(5.0)).unwrap().is_none());
        assert!(search_area(Some(1.0), None, None).is_err());
        assert!(search_area(Some(1.0), Some(2.0), Some(0.0)).is_err());
        assert!(search_area(Some(91.0), Some(2.0), None).is_err());

        let (center, radius) = search_area(Some(1.0), Some(2.0), None).unwrap().unwrap();
        assert_eq!(center.coordinates, [2.0, 1.0]);
        assert_eq!(radius, DEFAULT_RADIUS_KM);
    }

    #[test]
    fn test_search_area_rejects_non_finite_radius() {
        for radius in [f64::INFINITY, f64::NAN, -1.0] {
            let result = search_area(Some(1.0), Some(2.0), Some(radius));
            assert!(matches!(result, Err(AppError::ValidationError(_))), "radius {} accepted", radius);
        }
    }

    #[test]
    fn test_km_to_radians() {
        assert!((km_to_radians(EARTH_RADIUS_KM) - 1.0).abs() < 1e-12);
    }
}
