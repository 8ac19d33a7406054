//! Synthetic nearby-gear generation.
//!
//! A single known user location is turned into a ring of fictitious rental
//! clusters: positions are sampled uniformly inside a disc around the user,
//! and identities cycle through a fixed archetype table. Randomness is
//! injected as a sampler closure so the browser can pass `Math.random` while
//! tests pass a fixed sequence.

use std::f64::consts::TAU;

use crate::models::{Cluster, GeoPoint};

/// Approximate kilometers per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Radius of the disc clusters are scattered in.
pub const CLUSTER_RADIUS_KM: f64 = 50.0;

/// How many clusters one user location produces.
pub const CLUSTER_COUNT: usize = 8;

/// One row of the fixed cluster catalog.
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    pub items: [&'static str; 5],
    pub color: &'static str,
    pub description: &'static str,
}

/// The immutable cluster catalog, in display order.
pub const ARCHETYPES: [Archetype; 8] = [
    Archetype {
        name: "Camping Gear",
        items: [
            "4-Person Tent",
            "Sleeping Bags",
            "Camping Stoves",
            "Portable Chairs",
            "Coolers",
        ],
        color: "#FF6B6B",
        description: "Complete camping setup for 4 people, perfect for weekend getaways",
    },
    Archetype {
        name: "Hiking Equipment",
        items: [
            "Hiking Boots",
            "Backpacks",
            "Trekking Poles",
            "Water Bottles",
            "First Aid Kits",
        ],
        color: "#4ECDC4",
        description: "Professional hiking gear for day trips and longer expeditions",
    },
    Archetype {
        name: "Climbing Gear",
        items: [
            "Climbing Harnesses",
            "Ropes",
            "Carabiners",
            "Climbing Shoes",
            "Helmets",
        ],
        color: "#FFD93D",
        description: "Full climbing equipment set for beginners and intermediate climbers",
    },
    Archetype {
        name: "Water Sports",
        items: [
            "Kayaks",
            "Paddle Boards",
            "Life Jackets",
            "Waterproof Bags",
            "Dry Suits",
        ],
        color: "#6C5CE7",
        description: "Complete water sports equipment for aquatic adventures",
    },
    Archetype {
        name: "Cycling Gear",
        items: [
            "Mountain Bikes",
            "Cycling Helmets",
            "Bike Locks",
            "Repair Kits",
            "Bike Lights",
        ],
        color: "#00B894",
        description: "Quality mountain bikes and cycling accessories for all skill levels",
    },
    Archetype {
        name: "Winter Sports",
        items: [
            "Cross-Country Skis",
            "Snowshoes",
            "Winter Tents",
            "Sleeping Bags",
            "Thermal Gear",
        ],
        color: "#81ECEC",
        description: "Specialized winter sports equipment for cold weather adventures",
    },
    Archetype {
        name: "Adventure Gear",
        items: [
            "Hammocks",
            "Mosquito Nets",
            "Rain Gear",
            "Hiking Boots",
            "Trekking Poles",
        ],
        color: "#FF9F43",
        description: "Essential gear for outdoor adventures in any weather",
    },
    Archetype {
        name: "Photography Equipment",
        items: [
            "Camera Gear",
            "Tripods",
            "Waterproof Cases",
            "Lens Filters",
            "Memory Cards",
        ],
        color: "#95E1D3",
        description: "Professional photography equipment for outdoor shooting",
    },
];

/// Sample a uniformly distributed point inside a disc of `radius_km` around
/// `center`. Draws the bearing first, then the radius fraction (square-root
/// weighted so area density stays uniform). The longitude delta is divided
/// by `cos(center.lat)` to correct for meridian convergence; latitudes at
/// the poles make that correction blow up and are deliberately unhandled.
pub fn random_point_near(
    center: GeoPoint,
    radius_km: f64,
    rng: &mut dyn FnMut() -> f64,
) -> GeoPoint {
    let radius_deg = radius_km / KM_PER_DEGREE;
    let bearing = rng() * TAU;
    let dist_deg = rng().sqrt() * radius_deg;

    let lat = center.lat + dist_deg * bearing.cos();
    let lng = center.lng + dist_deg * bearing.sin() / center.lat.to_radians().cos();
    GeoPoint { lat, lng }
}

/// Fabricate `count` clusters around `center`. Archetype `i % 8` goes to
/// cluster `i`; ids are 1-based. Called once per known user location.
pub fn generate_clusters(
    center: GeoPoint,
    count: usize,
    rng: &mut dyn FnMut() -> f64,
) -> Vec<Cluster> {
    (0..count)
        .map(|index| {
            let archetype = &ARCHETYPES[index % ARCHETYPES.len()];
            Cluster {
                id: (index + 1) as u32,
                position: random_point_near(center, CLUSTER_RADIUS_KM, rng),
                name: format!("Nearby {}", archetype.name),
                items: archetype.items.iter().map(|s| s.to_string()).collect(),
                color: archetype.color.to_string(),
                description: archetype.description.to_string(),
            }
        })
        .collect()
}
