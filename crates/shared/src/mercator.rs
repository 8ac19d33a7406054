//! Spherical Web-Mercator projection.
//!
//! World-pixel space at zoom `z` spans `256 * 2^z` pixels on each axis:
//! longitude maps linearly to X, latitude through the inverse Gudermannian
//! to Y. Tile indices are the world-pixel coordinate divided by the tile
//! size, floored. The poles are singular and produce non-finite Y; callers
//! never feed them in practice.

use crate::models::GeoPoint;

use std::f64::consts::PI;

/// Raster tile edge length in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// A point in world-pixel space. Only meaningful together with the zoom
/// level it was projected at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// A slippy-map tile address at a fixed zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub x: i32,
    pub y: i32,
    pub z: u8,
}

/// Edge length of the whole projected world in pixels at `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << zoom)
}

/// Forward projection: geographic degrees to world pixels.
pub fn project(geo: GeoPoint, zoom: u8) -> PixelPoint {
    let size = world_size(zoom);
    let x = (geo.lng + 180.0) / 360.0 * size;
    let lat_rad = geo.lat.to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * size;
    PixelPoint { x, y }
}

/// Inverse projection: world pixels back to geographic degrees.
pub fn unproject(pixel: PixelPoint, zoom: u8) -> GeoPoint {
    let size = world_size(zoom);
    let lng = pixel.x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * pixel.y / size);
    let lat = n.sinh().atan().to_degrees();
    GeoPoint { lat, lng }
}

/// Tile containing a geographic point at `zoom`.
pub fn tile_of(geo: GeoPoint, zoom: u8) -> TileIndex {
    let p = project(geo, zoom);
    TileIndex {
        x: (p.x / TILE_SIZE).floor() as i32,
        y: (p.y / TILE_SIZE).floor() as i32,
        z: zoom,
    }
}
