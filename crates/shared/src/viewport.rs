//! Camera state for the map surface.
//!
//! Everything drawn on screen, tiles and pins alike, is positioned through
//! [`Viewport::screen_position_of`] / [`Viewport::tile_screen_origin`], so a
//! single camera snapshot drives one consistent render pass.

use crate::mercator::{self, PixelPoint, TileIndex, TILE_SIZE};
use crate::models::GeoPoint;

pub const MIN_ZOOM: i32 = 1;
pub const MAX_ZOOM: i32 = 18;

fn clamp_zoom(zoom: i32) -> u8 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM) as u8
}

/// Current center coordinate, zoom level, and measured surface size.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(center: GeoPoint, zoom: i32, width: f64, height: f64) -> Self {
        Viewport {
            center,
            zoom: clamp_zoom(zoom),
            width,
            height,
        }
    }

    /// Center is stored unmodified: no latitude clamping or wraparound.
    pub fn set_center(&mut self, center: GeoPoint) {
        self.center = center;
    }

    /// Zoom is clamped to [1, 18] on every change.
    pub fn set_zoom(&mut self, zoom: i32) {
        self.zoom = clamp_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(i32::from(self.zoom) + 1);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(i32::from(self.zoom) - 1);
    }

    /// Update the measured surface size. Returns false when nothing changed
    /// so resize observers can skip redundant recomputes.
    pub fn set_size(&mut self, width: f64, height: f64) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    /// Surface-pixel position of a geographic point:
    /// `project(geo) - project(center) + (width/2, height/2)`.
    pub fn screen_position_of(&self, geo: GeoPoint) -> PixelPoint {
        let world = mercator::project(geo, self.zoom);
        let center = mercator::project(self.center, self.zoom);
        PixelPoint {
            x: world.x - center.x + self.width / 2.0,
            y: world.y - center.y + self.height / 2.0,
        }
    }

    /// Inverse of [`Viewport::screen_position_of`].
    pub fn screen_to_geo(&self, screen: PixelPoint) -> GeoPoint {
        let center = mercator::project(self.center, self.zoom);
        mercator::unproject(
            PixelPoint {
                x: center.x + screen.x - self.width / 2.0,
                y: center.y + screen.y - self.height / 2.0,
            },
            self.zoom,
        )
    }

    /// Apply a pointer drag of `(dx, dy)` surface pixels. The camera moves
    /// opposite the pointer so the map content follows the finger.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let center = mercator::project(self.center, self.zoom);
        self.center = mercator::unproject(
            PixelPoint {
                x: center.x - dx,
                y: center.y - dy,
            },
            self.zoom,
        );
    }

    /// Surface-pixel origin (top-left corner) of a tile, from the same
    /// camera snapshot as [`Viewport::screen_position_of`].
    pub fn tile_screen_origin(&self, tile: TileIndex) -> PixelPoint {
        let center = mercator::project(self.center, self.zoom);
        PixelPoint {
            x: f64::from(tile.x) * TILE_SIZE - center.x + self.width / 2.0,
            y: f64::from(tile.y) * TILE_SIZE - center.y + self.height / 2.0,
        }
    }

    /// Rectangular span of tiles covering the surface corners, padded by one
    /// tile on every side so edges never pop in while panning.
    pub fn visible_tiles(&self) -> Vec<TileIndex> {
        let corners = [
            PixelPoint { x: 0.0, y: 0.0 },
            PixelPoint {
                x: self.width,
                y: 0.0,
            },
            PixelPoint {
                x: 0.0,
                y: self.height,
            },
            PixelPoint {
                x: self.width,
                y: self.height,
            },
        ];

        let mut min_x = i32::MAX;
        let mut max_x = i32::MIN;
        let mut min_y = i32::MAX;
        let mut max_y = i32::MIN;
        for corner in corners {
            let tile = mercator::tile_of(self.screen_to_geo(corner), self.zoom);
            min_x = min_x.min(tile.x);
            max_x = max_x.max(tile.x);
            min_y = min_y.min(tile.y);
            max_y = max_y.max(tile.y);
        }

        let mut tiles =
            Vec::with_capacity(((max_x - min_x + 3) * (max_y - min_y + 3)).max(0) as usize);
        for y in (min_y - 1)..=(max_y + 1) {
            for x in (min_x - 1)..=(max_x + 1) {
                tiles.push(TileIndex { x, y, z: self.zoom });
            }
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mercator::tile_of;

    const LONDON: GeoPoint = GeoPoint::new(51.505, -0.09);

    fn london_viewport() -> Viewport {
        Viewport::new(LONDON, 10, 800.0, 500.0)
    }

    #[test]
    fn test_zoom_clamped_low() {
        let mut vp = london_viewport();
        vp.set_zoom(0);
        assert_eq!(vp.zoom, 1);
    }

    #[test]
    fn test_zoom_clamped_high() {
        let mut vp = london_viewport();
        vp.set_zoom(25);
        assert_eq!(vp.zoom, 18);
    }

    #[test]
    fn test_zoom_steps_saturate() {
        let mut vp = Viewport::new(LONDON, 18, 800.0, 500.0);
        vp.zoom_in();
        assert_eq!(vp.zoom, 18);
        vp.set_zoom(1);
        vp.zoom_out();
        assert_eq!(vp.zoom, 1);
    }

    #[test]
    fn test_center_stored_unmodified() {
        let mut vp = london_viewport();
        vp.set_center(GeoPoint::new(95.0, -200.0));
        assert_eq!(vp.center, GeoPoint::new(95.0, -200.0));
    }

    #[test]
    fn test_set_size_reports_change() {
        let mut vp = london_viewport();
        assert!(!vp.set_size(800.0, 500.0));
        assert!(vp.set_size(1024.0, 500.0));
        assert_eq!(vp.center, LONDON);
        assert_eq!(vp.zoom, 10);
    }

    #[test]
    fn test_center_projects_to_surface_middle() {
        let vp = london_viewport();
        let p = vp.screen_position_of(LONDON);
        assert!((p.x - 400.0).abs() < 1e-9);
        assert!((p.y - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_to_geo_inverts_screen_position() {
        let vp = london_viewport();
        let screen = PixelPoint { x: 123.0, y: 456.0 };
        let geo = vp.screen_to_geo(screen);
        let back = vp.screen_position_of(geo);
        assert!((back.x - screen.x).abs() < 1e-6);
        assert!((back.y - screen.y).abs() < 1e-6);
    }

    #[test]
    fn test_drag_and_inverse_drag_restores_center() {
        let mut vp = london_viewport();
        vp.pan_by(37.5, -12.25);
        vp.pan_by(-37.5, 12.25);
        assert!((vp.center.lat - LONDON.lat).abs() < 1e-6);
        assert!((vp.center.lng - LONDON.lng).abs() < 1e-6);
    }

    #[test]
    fn test_drag_left_moves_center_east() {
        // 100 px at zoom 10 is 100 / (256 * 2^10) of the world, i.e. ~0.137°
        // of longitude.
        let mut vp = london_viewport();
        vp.pan_by(-100.0, 0.0);
        let delta_lng = vp.center.lng - LONDON.lng;
        let expected = 100.0 / mercator::world_size(10) * 360.0;
        assert!(delta_lng > 0.0);
        assert!((delta_lng - expected).abs() < 1e-9);
        assert!((vp.center.lat - LONDON.lat).abs() < 1e-9);
    }

    #[test]
    fn test_visible_tiles_zero_size_is_overscan_ring() {
        // A degenerate surface still yields the center tile plus the one-tile
        // pad on every side.
        let vp = Viewport::new(LONDON, 10, 0.0, 0.0);
        let tiles = vp.visible_tiles();
        assert_eq!(tiles.len(), 9);
        assert!(tiles.contains(&tile_of(LONDON, 10)));
    }

    #[test]
    fn test_visible_tiles_covers_center_in_rectangle() {
        let vp = london_viewport();
        let tiles = vp.visible_tiles();
        assert!(tiles.contains(&tile_of(LONDON, 10)));

        let min_x = tiles.iter().map(|t| t.x).min().unwrap();
        let max_x = tiles.iter().map(|t| t.x).max().unwrap();
        let min_y = tiles.iter().map(|t| t.y).min().unwrap();
        let max_y = tiles.iter().map(|t| t.y).max().unwrap();
        let span = ((max_x - min_x + 1) * (max_y - min_y + 1)) as usize;
        assert_eq!(tiles.len(), span, "tile set must be a full rectangle");

        // 800 px needs at least 4 columns at 256 px/tile, plus the pad.
        assert!(max_x - min_x + 1 >= 6);
        assert!(max_y - min_y + 1 >= 4);
    }

    #[test]
    fn test_tile_origin_matches_projected_corner() {
        let vp = london_viewport();
        let tile = tile_of(LONDON, 10);
        let origin = vp.tile_screen_origin(tile);
        // The tile's top-left corner in world pixels, pushed through the
        // same screen transform, must agree.
        let corner_geo = mercator::unproject(
            PixelPoint {
                x: f64::from(tile.x) * TILE_SIZE,
                y: f64::from(tile.y) * TILE_SIZE,
            },
            10,
        );
        let via_screen = vp.screen_position_of(corner_geo);
        assert!((origin.x - via_screen.x).abs() < 1e-6);
        assert!((origin.y - via_screen.y).abs() < 1e-6);
    }
}
