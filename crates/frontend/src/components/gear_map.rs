//! The interactive gear map.
//!
//! A slippy map built directly on absolutely-positioned `img` tiles and
//! `div` pins, no mapping library involved. All projection, culling and
//! gesture math lives in `outdoorgears-shared`; this component wires it to
//! DOM events and signals.

use std::collections::HashSet;
use std::rc::Rc;

use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use outdoorgears_shared::clusters::{generate_clusters, CLUSTER_COUNT};
use outdoorgears_shared::geo::distance_km;
use outdoorgears_shared::gesture::{GestureState, PointerSample};
use outdoorgears_shared::mercator::{PixelPoint, TileIndex};
use outdoorgears_shared::models::GeoPoint;
use outdoorgears_shared::pins::{visible_pins, PinId, PinSelection};
use outdoorgears_shared::tiles::TileSource;
use outdoorgears_shared::viewport::Viewport;
use wasm_bindgen::JsCast;

use crate::geolocation::{self, LocationError};
use crate::listeners::{self, ListenerGuard};

const MAP_SURFACE_ID: &str = "gear-map-surface";

/// Central London, shown whenever no device fix is available.
const DEFAULT_CENTER: GeoPoint = GeoPoint::new(51.505, -0.09);
const INITIAL_ZOOM: i32 = 10;

/// How long we wait for a geolocation fix before falling back.
const GEOLOCATION_TIMEOUT_MS: u32 = 5_000;
/// How long the location notice stays on screen.
const NOTICE_DISMISS_MS: u32 = 6_000;

const USER_PIN_COLOR: &str = "#2196F3";

const LOADING_MESSAGE: &str = "Loading map and getting your location...";

/// Everything the popup shows, resolved to plain strings. Empty strings and
/// an empty item list mean "omit that row".
struct PopupView {
    anchor: String,
    title: String,
    color: String,
    description: String,
    items: Vec<String>,
    distance: String,
}

#[component]
pub fn GearMap(on_pin_select: Option<EventHandler<PinSelection>>) -> Element {
    let mut viewport = use_signal(|| Viewport::new(DEFAULT_CENTER, INITIAL_ZOOM, 0.0, 0.0));
    // None while the geolocation request is still in flight.
    let mut location = use_signal(|| None::<GeoPoint>);
    let mut notice = use_signal(|| None::<String>);
    let mut clusters = use_signal(Vec::new);
    let mut gesture = use_signal(GestureState::new);
    // Mirrors gesture phase transitions only, so effects keyed on it do not
    // re-run on every pointer move.
    let mut dragging = use_signal(|| false);
    let mut selected = use_signal(|| None::<PinId>);
    let mut failed_tiles = use_signal(HashSet::<TileIndex>::new);
    let mut release_guards = use_signal(Vec::<ListenerGuard>::new);

    let tile_source = use_hook(TileSource::default);

    let position = use_resource(|| geolocation::current_position(GEOLOCATION_TIMEOUT_MS));

    // Resolve the one-shot location request: recenter, seed the clusters,
    // and surface a notice when we fell back to the default area.
    use_effect(move || {
        let Some(result) = *position.read() else {
            return;
        };
        if location.peek().is_some() {
            return;
        }
        let (center, failure) = match result {
            Ok(fix) => (fix, None),
            Err(err) => (DEFAULT_CENTER, Some(err)),
        };
        viewport.write().set_center(center);
        location.set(Some(center));
        let mut sample = || js_sys::Math::random();
        clusters.set(generate_clusters(center, CLUSTER_COUNT, &mut sample));
        if let Some(err) = failure {
            notice.set(Some(fallback_notice(err)));
            spawn(async move {
                TimeoutFuture::new(NOTICE_DISMISS_MS).await;
                notice.set(None);
            });
        }
    });

    // Initial surface measurement, once the element exists.
    use_effect(move || sync_surface_size(viewport));

    // Track the host surface for the lifetime of the component.
    use_hook(|| Rc::new(listeners::on_window("resize", move |_| sync_surface_size(viewport))));

    // Document-level release listeners exist only while a drag is active, so
    // a pointer released outside the surface still ends it. The guards are
    // dropped here rather than inside their own callbacks.
    use_effect(move || {
        let active = *dragging.read();
        let registered = !release_guards.peek().is_empty();
        if active && !registered {
            let mut guards = Vec::new();
            for name in ["mouseup", "touchend"] {
                if let Some(guard) = listeners::on_document(name, move |event| {
                    // A touchend that still leaves fingers down is not a
                    // release; the surface handler re-anchors to them.
                    if let Some(touch) = event.dyn_ref::<web_sys::TouchEvent>() {
                        if touch.touches().length() > 0 {
                            return;
                        }
                    }
                    gesture.write().end();
                    dragging.set(false);
                }) {
                    guards.push(guard);
                }
            }
            release_guards.set(guards);
        } else if !active && registered {
            release_guards.set(Vec::new());
        }
    });

    let vp = viewport.read();
    let ready = location.read().is_some();

    let tiles: Vec<(TileIndex, String, String)> = if ready {
        let failed = failed_tiles.read();
        vp.visible_tiles()
            .into_iter()
            .filter(|tile| !failed.contains(tile))
            .map(|tile| {
                (
                    tile,
                    tile_source.url(tile),
                    offset_style(vp.tile_screen_origin(tile)),
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    let pins: Vec<(PinId, String, String, String)> = if ready {
        let user = *location.read();
        let cluster_list = clusters.read();
        visible_pins(&vp, user, &cluster_list)
            .into_iter()
            .filter_map(|pin| {
                let color = match pin.id {
                    PinId::User => Some(USER_PIN_COLOR.to_string()),
                    PinId::Cluster(id) => cluster_list
                        .iter()
                        .find(|c| c.id == id)
                        .map(|c| c.color.clone()),
                }?;
                Some((pin.id, pin_key(pin.id), offset_style(pin.screen), color))
            })
            .collect()
    } else {
        Vec::new()
    };

    // The popup anchor comes from the same viewport snapshot as the pins, so
    // it tracks its pin exactly during a pan.
    let popup = (*selected.read()).and_then(|pin| {
        let user = *location.read();
        match pin {
            PinId::User => user.map(|fix| PopupView {
                anchor: offset_style(vp.screen_position_of(fix)),
                title: "You are here".to_string(),
                color: USER_PIN_COLOR.to_string(),
                description: String::new(),
                items: Vec::new(),
                distance: String::new(),
            }),
            PinId::Cluster(id) => clusters.read().iter().find(|c| c.id == id).map(|c| PopupView {
                anchor: offset_style(vp.screen_position_of(c.position)),
                title: c.name.clone(),
                color: c.color.clone(),
                description: c.description.clone(),
                items: c.items.clone(),
                distance: user
                    .map(|fix| format_distance_km(distance_km(fix, c.position)))
                    .unwrap_or_default(),
            }),
        }
    });

    let surface_class = if *dragging.read() {
        "gear-map-surface dragging"
    } else {
        "gear-map-surface"
    };

    let notice_text = (*notice.read()).clone().unwrap_or_default();

    let popup_node = popup.map(|view| {
        let PopupView {
            anchor,
            title,
            color,
            description,
            items,
            distance,
        } = view;
        rsx! {
            div {
                class: "map-popup",
                style: "{anchor}",
                onmousedown: move |evt| evt.stop_propagation(),
                ontouchstart: move |evt| evt.stop_propagation(),
                button {
                    class: "popup-close",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        selected.set(None);
                    },
                    "×"
                }
                h3 { class: "popup-title", style: "color: {color};", "{title}" }
                if !description.is_empty() {
                    p { class: "popup-description", "{description}" }
                }
                if !items.is_empty() {
                    h4 { class: "popup-items-heading", "Available Items:" }
                    ul { class: "popup-items",
                        for item in items {
                            li { "{item}" }
                        }
                    }
                }
                if !distance.is_empty() {
                    p { class: "popup-distance", "{distance}" }
                }
            }
        }
    });

    rsx! {
        div {
            id: MAP_SURFACE_ID,
            class: "{surface_class}",
            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                gesture.write().begin(PointerSample::new(client.x, client.y));
                dragging.set(true);
                selected.set(None);
            },
            onmousemove: move |evt: Event<MouseData>| {
                if !*dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                if let Some((dx, dy)) = gesture.write().advance(PointerSample::new(client.x, client.y)) {
                    viewport.write().pan_by(dx, dy);
                }
            },
            onmouseup: move |_| {
                if *dragging.read() {
                    gesture.write().end();
                    dragging.set(false);
                }
            },
            onmouseleave: move |_| {
                if *dragging.read() {
                    gesture.write().end();
                    dragging.set(false);
                }
            },
            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let delta_y = wheel_delta_y(evt.data().delta());
                if delta_y < 0.0 {
                    viewport.write().zoom_in();
                } else if delta_y > 0.0 {
                    viewport.write().zoom_out();
                }
            },
            ontouchstart: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if let Some(touch) = touches.first() {
                    let client = touch.client_coordinates();
                    gesture.write().begin(PointerSample::new(client.x, client.y));
                    dragging.set(true);
                    selected.set(None);
                }
            },
            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                if !*dragging.read() {
                    return;
                }
                let touches = evt.data().touches();
                // An empty list mid-gesture is a no-op tick, not an error.
                if let Some(touch) = touches.first() {
                    let client = touch.client_coordinates();
                    if let Some((dx, dy)) =
                        gesture.write().advance(PointerSample::new(client.x, client.y))
                    {
                        viewport.write().pan_by(dx, dy);
                    }
                }
            },
            ontouchend: move |evt: Event<TouchData>| {
                if !*dragging.read() {
                    return;
                }
                let touches = evt.data().touches();
                if let Some(touch) = touches.first() {
                    // Another finger remains: re-anchor to it instead of
                    // jumping by the distance between the two.
                    let client = touch.client_coordinates();
                    gesture.write().begin(PointerSample::new(client.x, client.y));
                } else {
                    gesture.write().end();
                    dragging.set(false);
                }
            },
            ontouchcancel: move |_| {
                if *dragging.read() {
                    gesture.write().end();
                    dragging.set(false);
                }
            },

            for (tile, url, style) in tiles {
                img {
                    key: "{tile.z}-{tile.x}-{tile.y}",
                    class: "map-tile",
                    style: "{style}",
                    src: "{url}",
                    draggable: "false",
                    onerror: move |_| {
                        failed_tiles.write().insert(tile);
                    },
                }
            }

            for (id, key, style, color) in pins {
                div {
                    key: "{key}",
                    class: if id == PinId::User { "map-pin map-pin-user" } else { "map-pin map-pin-cluster" },
                    style: "{style} background-color: {color};",
                    onmousedown: move |evt| evt.stop_propagation(),
                    ontouchstart: move |evt| evt.stop_propagation(),
                    onclick: move |evt| {
                        evt.stop_propagation();
                        selected.set(Some(id));
                        if let Some(handler) = on_pin_select {
                            let selection = match id {
                                PinId::User => (*location.read()).map(PinSelection::User),
                                PinId::Cluster(cid) => clusters
                                    .read()
                                    .iter()
                                    .find(|c| c.id == cid)
                                    .cloned()
                                    .map(PinSelection::Cluster),
                            };
                            if let Some(selection) = selection {
                                handler.call(selection);
                            }
                        }
                    },
                }
            }

            {popup_node}

            div { class: "map-zoom",
                button {
                    class: "map-zoom-button",
                    onmousedown: move |evt| evt.stop_propagation(),
                    ontouchstart: move |evt| evt.stop_propagation(),
                    onclick: move |evt| {
                        evt.stop_propagation();
                        viewport.write().zoom_in();
                    },
                    "+"
                }
                button {
                    class: "map-zoom-button",
                    onmousedown: move |evt| evt.stop_propagation(),
                    ontouchstart: move |evt| evt.stop_propagation(),
                    onclick: move |evt| {
                        evt.stop_propagation();
                        viewport.write().zoom_out();
                    },
                    "−"
                }
            }

            div { class: "map-attribution", "© OpenStreetMap contributors" }

            if !ready {
                div { class: "map-loading", "{LOADING_MESSAGE}" }
            }

            if !notice_text.is_empty() {
                div { class: "map-notice", "{notice_text}" }
            }
        }
    }
}

/// Bounding rect of the live map surface element, if it is mounted.
fn surface_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_SURFACE_ID)?;
    Some(element.get_bounding_client_rect())
}

/// Push the surface's rendered size into the viewport. Skips the write when
/// nothing changed, so resize storms do not trigger re-renders.
fn sync_surface_size(mut viewport: Signal<Viewport>) {
    let Some(rect) = surface_rect() else {
        return;
    };
    let (width, height) = (rect.width(), rect.height());
    let unchanged = {
        let vp = viewport.peek();
        vp.width == width && vp.height == height
    };
    if !unchanged {
        viewport.write().set_size(width, height);
    }
}

/// Normalize the wheel delta to pixels regardless of the browser's delta
/// mode.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Inline style placing an absolutely-positioned child at a surface point.
fn offset_style(point: PixelPoint) -> String {
    format!("left: {}px; top: {}px;", point.x, point.y)
}

fn pin_key(id: PinId) -> String {
    match id {
        PinId::User => "pin-user".to_string(),
        PinId::Cluster(id) => format!("pin-cluster-{id}"),
    }
}

fn format_distance_km(km: f64) -> String {
    format!("{km:.1} km away")
}

fn fallback_notice(err: LocationError) -> String {
    format!("{err}. Using default location instead.")
}
