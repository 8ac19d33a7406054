use crate::mercator::TileIndex;

/// Subdomain rotation spreads tile fetches across the host's mirrors.
const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Raster tile endpoint. The host is configuration; the `/{z}/{x}/{y}.png`
/// path shape is not.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub host: String,
}

impl Default for TileSource {
    fn default() -> Self {
        TileSource {
            host: "tile.openstreetmap.org".to_string(),
        }
    }
}

impl TileSource {
    pub fn with_host(host: impl Into<String>) -> Self {
        TileSource { host: host.into() }
    }

    /// Image URL for one tile, with the subdomain keyed on the tile index so
    /// neighboring tiles rotate through mirrors.
    pub fn url(&self, tile: TileIndex) -> String {
        let sub = SUBDOMAINS[(tile.x + tile.y).rem_euclid(SUBDOMAINS.len() as i32) as usize];
        format!(
            "https://{}.{}/{}/{}/{}.png",
            sub, self.host, tile.z, tile.x, tile.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_shape() {
        let source = TileSource::default();
        let url = source.url(TileIndex {
            x: 511,
            y: 340,
            z: 10,
        });
        assert_eq!(url, "https://c.tile.openstreetmap.org/10/511/340.png");
    }

    #[test]
    fn test_neighboring_tiles_rotate_subdomains() {
        let source = TileSource::default();
        let a = source.url(TileIndex { x: 0, y: 0, z: 5 });
        let b = source.url(TileIndex { x: 1, y: 0, z: 5 });
        let c = source.url(TileIndex { x: 2, y: 0, z: 5 });
        assert!(a.starts_with("https://a."));
        assert!(b.starts_with("https://b."));
        assert!(c.starts_with("https://c."));
    }

    #[test]
    fn test_negative_indices_still_pick_a_subdomain() {
        let source = TileSource::default();
        let url = source.url(TileIndex { x: -2, y: 0, z: 3 });
        assert!(url.starts_with("https://b."));
        assert!(url.ends_with("/3/-2/0.png"));
    }

    #[test]
    fn test_custom_host() {
        let source = TileSource::with_host("tiles.example.net");
        let url = source.url(TileIndex { x: 1, y: 2, z: 4 });
        assert_eq!(url, "https://a.tiles.example.net/4/1/2.png");
    }
}
