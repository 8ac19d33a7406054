//! Shared map engine for the OutdoorGears storefront.
//!
//! Web-Mercator projection, viewport/camera state, the drag gesture machine,
//! pin culling, and the synthetic nearby-gear generator. Pure Rust with no
//! DOM types, so the web frontend and the test suite run the same math.

pub mod clusters;
pub mod geo;
pub mod gesture;
pub mod mercator;
pub mod models;
pub mod pins;
pub mod tiles;
pub mod viewport;
