use dioxus::prelude::*;

use crate::components::gear_map::GearMap;

/// Landing page. The storefront around the map is intentionally thin; the
/// map is the product here.
#[component]
pub fn Explore() -> Element {
    rsx! {
        div { class: "page",
            header { class: "page-header",
                h1 { class: "brand", "OutdoorGears" }
            }
            main { class: "page-body",
                section { class: "map-section",
                    h2 { "Find Gear Near You" }
                    GearMap {}
                }
            }
        }
    }
}
