use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees. Latitude is positive north, longitude
/// positive east. Synthetic points are stored exactly as generated; no
/// wraparound normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }
}

/// A synthetic point of interest grouping rental items near a location.
/// Generated once per known user location and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: u32,
    pub position: GeoPoint,
    pub name: String,
    pub items: Vec<String>,
    pub color: String,
    pub description: String,
}
