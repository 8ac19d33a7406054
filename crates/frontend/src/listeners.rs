//! Scoped DOM event listeners.
//!
//! A listener attached through here is removed again when the guard drops.
//! The map uses this to hold document-level pointer-release listeners only
//! for the lifetime of a drag, and a window resize listener for the lifetime
//! of the component.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// A DOM event listener that deregisters itself on drop.
pub struct ListenerGuard {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl ListenerGuard {
    /// Attach `handler` to `target`. Returns None when the browser rejects
    /// the registration.
    pub fn attach(
        target: &web_sys::EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Option<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;
        Some(ListenerGuard {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Listen on `document`. Pointer releases that land outside the surface
/// still reach us here.
pub fn on_document(
    event: &'static str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Option<ListenerGuard> {
    let document = web_sys::window()?.document()?;
    ListenerGuard::attach(&document, event, handler)
}

/// Listen on `window`.
pub fn on_window(
    event: &'static str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Option<ListenerGuard> {
    let window = web_sys::window()?;
    ListenerGuard::attach(&window, event, handler)
}
