pub mod geo_point;

pub use geo_point::{Coordinates, GeoPoint};
