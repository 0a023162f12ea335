use crate::panels;
use crate::viewer::Mailbox;
use reel_core::Event;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

/// An intersection observer together with the closure it calls.
pub struct PanelObserver {
    observer: web::IntersectionObserver,
    _callback: ObserverCallback,
}

impl PanelObserver {
    /// Observe `sections`, posting `to_event(index, ratio)` for every entry.
    pub fn new(
        sections: &[web::HtmlElement],
        threshold: f64,
        root_margin: &str,
        mailbox: &Mailbox,
        to_event: fn(usize, f64) -> Event,
    ) -> anyhow::Result<Self> {
        let mailbox = mailbox.clone();
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web::IntersectionObserverEntry = entry.unchecked_into();
                    if let Some(index) = panels::index_of(&entry.target()) {
                        mailbox.post(to_event(index, entry.intersection_ratio()));
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let init = web::IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(root_margin);
        let observer =
            web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;
        for s in sections {
            observer.observe(s);
        }
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn unobserve(&self, el: &web::Element) {
        self.observer.unobserve(el);
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

/// Reveal observer (one-shot per panel) and optional current-panel observer.
pub struct Observers {
    pub reveal: PanelObserver,
    pub current: Option<PanelObserver>,
}

impl Observers {
    pub fn disconnect(&self) {
        self.reveal.disconnect();
        if let Some(c) = &self.current {
            c.disconnect();
        }
    }
}

pub fn reveal_event(index: usize, ratio: f64) -> Event {
    Event::RevealSignal { index, ratio }
}

pub fn current_event(index: usize, ratio: f64) -> Event {
    Event::CurrentSignal { index, ratio }
}
