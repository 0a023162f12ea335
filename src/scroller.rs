//! Bridge to an optional external inertial scroller.
//!
//! Pages can install any object exposing `scrollTo(target, options)`,
//! `on(event, callback)` and `destroy()` under `window.reelScroller`. When it
//! is present the engine delegates programmatic scrolls to it and its own
//! scroll events become the progress source; otherwise the engine
//! interpolates in the frame callback.

use crate::constants::EXTERNAL_SCROLLER_KEY;
use crate::dom;
use crate::viewer::Mailbox;
use reel_core::{Easing, Event, ScrollHandle};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct ExternalScroller {
    instance: js_sys::Object,
    scroll_cb: Option<Closure<dyn FnMut()>>,
    easing_cbs: Vec<(Easing, Closure<dyn Fn(f64) -> f64>)>,
}

impl ExternalScroller {
    pub fn detect() -> Option<Self> {
        let window = web::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(EXTERNAL_SCROLLER_KEY)).ok()?;
        if !value.is_object() {
            return None;
        }
        let instance: js_sys::Object = value.unchecked_into();
        method(&instance, "scrollTo")?;
        log::info!("[scroll] external scroller found at window.{}", EXTERNAL_SCROLLER_KEY);
        Some(Self {
            instance,
            scroll_cb: None,
            easing_cbs: Vec::new(),
        })
    }

    /// Forward the scroller's own scroll notifications into the mailbox.
    /// Returns `false` when the object has no `on` method.
    pub fn subscribe_scroll(&mut self, mailbox: &Mailbox) -> bool {
        let Some(on) = method(&self.instance, "on") else {
            return false;
        };
        let mailbox = mailbox.clone();
        let cb = Closure::wrap(Box::new(move || {
            mailbox.post(Event::Scroll(dom::viewport_snapshot()));
        }) as Box<dyn FnMut()>);
        if let Err(e) = on.call2(
            &self.instance,
            &JsValue::from_str("scroll"),
            cb.as_ref().unchecked_ref(),
        ) {
            log::warn!("[scroll] external on(scroll) failed: {:?}", e);
            return false;
        }
        self.scroll_cb = Some(cb);
        true
    }

    pub fn scroll_to(
        &mut self,
        handle: ScrollHandle,
        target: f64,
        duration_ms: f64,
        easing: Easing,
        mailbox: &Mailbox,
    ) {
        let Some(scroll_to) = method(&self.instance, "scrollTo") else {
            return;
        };
        let opts = js_sys::Object::new();
        let mailbox = mailbox.clone();
        let on_complete = Closure::once_into_js(move || {
            mailbox.post(Event::ScrollComplete(handle));
        });
        _ = js_sys::Reflect::set(&opts, &"duration".into(), &(duration_ms / 1000.0).into());
        _ = js_sys::Reflect::set(&opts, &"easing".into(), self.easing_fn(easing));
        _ = js_sys::Reflect::set(&opts, &"onComplete".into(), &on_complete);
        _ = js_sys::Reflect::set(&opts, &"force".into(), &JsValue::TRUE);
        if let Err(e) = scroll_to.call2(&self.instance, &target.into(), &opts) {
            // the safety timeout will release the navigation lock
            log::warn!("[scroll] external scrollTo failed: {:?}", e);
        }
    }

    pub fn destroy(&mut self) {
        if let Some(destroy) = method(&self.instance, "destroy") {
            _ = destroy.call0(&self.instance);
        }
        self.scroll_cb = None;
        self.easing_cbs.clear();
    }

    fn easing_fn(&mut self, easing: Easing) -> &JsValue {
        let pos = match self.easing_cbs.iter().position(|(e, _)| *e == easing) {
            Some(pos) => pos,
            None => {
                let cb = Closure::wrap(Box::new(move |t: f64| easing.apply(t))
                    as Box<dyn Fn(f64) -> f64>);
                self.easing_cbs.push((easing, cb));
                self.easing_cbs.len() - 1
            }
        };
        self.easing_cbs[pos].1.as_ref()
    }
}

fn method(obj: &js_sys::Object, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(obj, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}
