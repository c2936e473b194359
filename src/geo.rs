use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Haversine distance in km between two lat/lon points given in degrees.
pub fn great_circle_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    great_circle_distance_km(from.lat, from.lon, to.lat, to.lon)
}

/// Straight-line interpolation in lat/lon space, which is what the map
/// polyline between the two airports shows.
pub fn interpolate(from: Coordinates, to: Coordinates, fraction: f64) -> Coordinates {
    let f = fraction.clamp(0.0, 1.0);
    Coordinates::new(from.lat + (to.lat - from.lat) * f, from.lon + (to.lon - from.lon) * f)
}

pub fn midpoint(a: Coordinates, b: Coordinates) -> Coordinates {
    interpolate(a, b, 0.5)
}
