//! Pin placement and culling.
//!
//! Pins are derived every render pass from the viewport plus the user point
//! and cluster list; nothing here is stored. Culling uses a soft margin so
//! pins don't flicker at the surface edge while panning.

use crate::mercator::PixelPoint;
use crate::models::{Cluster, GeoPoint};
use crate::viewport::Viewport;

/// How far outside the surface a pin may sit before it is dropped.
pub const CULL_MARGIN_PX: f64 = 50.0;

/// Which marker a pin (or a selection) refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinId {
    User,
    Cluster(u32),
}

/// A pin projected to surface coordinates for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    pub id: PinId,
    pub screen: PixelPoint,
}

/// Selection payload handed to consumers of the map's pin-selected event.
#[derive(Debug, Clone, PartialEq)]
pub enum PinSelection {
    User(GeoPoint),
    Cluster(Cluster),
}

/// True when `p` is within `margin` pixels of the `width`×`height` surface
/// on both axes.
pub fn within_surface(p: PixelPoint, width: f64, height: f64, margin: f64) -> bool {
    p.x >= -margin && p.x <= width + margin && p.y >= -margin && p.y <= height + margin
}

/// Project the user location and every cluster through the viewport,
/// dropping pins more than [`CULL_MARGIN_PX`] off the surface.
pub fn visible_pins(viewport: &Viewport, user: Option<GeoPoint>, clusters: &[Cluster]) -> Vec<Pin> {
    let mut pins = Vec::with_capacity(clusters.len() + 1);

    if let Some(geo) = user {
        let screen = viewport.screen_position_of(geo);
        if within_surface(screen, viewport.width, viewport.height, CULL_MARGIN_PX) {
            pins.push(Pin {
                id: PinId::User,
                screen,
            });
        }
    }

    for cluster in clusters {
        let screen = viewport.screen_position_of(cluster.position);
        if within_surface(screen, viewport.width, viewport.height, CULL_MARGIN_PX) {
            pins.push(Pin {
                id: PinId::Cluster(cluster.id),
                screen,
            });
        }
    }

    pins
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: GeoPoint = GeoPoint::new(51.505, -0.09);

    fn viewport() -> Viewport {
        Viewport::new(LONDON, 10, 800.0, 500.0)
    }

    fn cluster_at(id: u32, position: GeoPoint) -> Cluster {
        Cluster {
            id,
            position,
            name: format!("Cluster {}", id),
            items: vec![],
            color: "#FF6B6B".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_margin_bounds() {
        assert!(within_surface(
            PixelPoint { x: -49.0, y: 250.0 },
            800.0,
            500.0,
            50.0
        ));
        assert!(!within_surface(
            PixelPoint { x: -51.0, y: 250.0 },
            800.0,
            500.0,
            50.0
        ));
        assert!(within_surface(
            PixelPoint { x: 400.0, y: 549.0 },
            800.0,
            500.0,
            50.0
        ));
        assert!(!within_surface(
            PixelPoint { x: 400.0, y: 551.0 },
            800.0,
            500.0,
            50.0
        ));
    }

    #[test]
    fn test_user_and_onscreen_cluster_render() {
        let vp = viewport();
        let near = vp.screen_to_geo(PixelPoint { x: 600.0, y: 100.0 });
        let pins = visible_pins(&vp, Some(LONDON), &[cluster_at(1, near)]);
        assert_eq!(pins.len(), 2);
        assert_eq!(pins[0].id, PinId::User);
        assert_eq!(pins[1].id, PinId::Cluster(1));
    }

    #[test]
    fn test_cluster_past_right_margin_is_culled_and_reappears() {
        let vp = viewport();
        // A point that projects 60 px past the right edge, outside the
        // 50 px margin.
        let offscreen = vp.screen_to_geo(PixelPoint { x: 860.0, y: 250.0 });
        let clusters = [cluster_at(7, offscreen)];

        let pins = visible_pins(&vp, None, &clusters);
        assert!(pins.is_empty());

        // Pan the camera toward it and the pin comes back.
        let mut moved = vp.clone();
        moved.set_center(offscreen);
        let pins = visible_pins(&moved, None, &clusters);
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].id, PinId::Cluster(7));
    }

    #[test]
    fn test_pin_just_inside_margin_survives() {
        let vp = viewport();
        let fringe = vp.screen_to_geo(PixelPoint { x: 845.0, y: 250.0 });
        let pins = visible_pins(&vp, None, &[cluster_at(2, fringe)]);
        assert_eq!(pins.len(), 1);
    }

    #[test]
    fn test_unknown_user_location_adds_no_pin() {
        let vp = viewport();
        let pins = visible_pins(&vp, None, &[]);
        assert!(pins.is_empty());
    }
}
