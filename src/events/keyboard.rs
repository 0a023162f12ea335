use crate::dom::Listeners;
use crate::viewer::Mailbox;
use reel_core::{Event, NavKey};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Translate a keydown into a navigation step.
///
/// The browser's own arrow-key scrolling is always suppressed, even at the
/// ends of the reel, so native scrolling and programmatic jumps never fight.
pub fn handle_keydown(ev: &web::KeyboardEvent, mailbox: &Mailbox) {
    if ev.default_prevented() || ev.alt_key() || ev.ctrl_key() || ev.meta_key() {
        return;
    }
    let Some(key) = NavKey::from_key(&ev.key()) else {
        return;
    };
    ev.prevent_default();
    log::debug!("[keys] {:?}", key);
    mailbox.post(Event::Step(key));
}

pub fn wire_keydown(listeners: &mut Listeners, mailbox: &Mailbox) {
    if let Some(window) = web::window() {
        let mailbox = mailbox.clone();
        listeners.add(&window, "keydown", move |ev: web::Event| {
            if let Some(kev) = ev.dyn_ref::<web::KeyboardEvent>() {
                handle_keydown(kev, &mailbox);
            }
        });
    }
}
