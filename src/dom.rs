use reel_core::ViewportSnapshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Milliseconds on the same clock animation frames are stamped with.
#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Read scroll offset and sizes fresh from the window.
pub fn viewport_snapshot() -> ViewportSnapshot {
    let Some(window) = web::window() else {
        return ViewportSnapshot::default();
    };
    let offset = window.scroll_y().unwrap_or(0.0).max(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let document_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(viewport_height);
    ViewportSnapshot::new(offset, viewport_height, document_height)
}

/// Jump the window to `top` without any CSS smooth behaviour getting in the
/// way of the frame-driven interpolation.
pub fn scroll_window_to(top: f64) {
    if let Some(window) = web::window() {
        let opts = web::ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(web::ScrollBehavior::Instant);
        window.scroll_to_with_scroll_to_options(&opts);
    }
}

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Event listeners that can all be removed again on teardown.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Listener>,
}

impl Listeners {
    pub fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("[dom] failed to add {} listener: {:?}", kind, e);
            return;
        }
        self.entries.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
    }

    /// Register a click handler on the element with `element_id`, if present.
    pub fn add_click(
        &mut self,
        document: &web::Document,
        element_id: &str,
        mut handler: impl FnMut() + 'static,
    ) {
        if let Some(el) = document.get_element_by_id(element_id) {
            self.add(&el, "click", move |_| handler());
        }
    }

    pub fn remove_all(&mut self) {
        for l in self.entries.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.remove_all();
    }
}
