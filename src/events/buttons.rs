use crate::constants::{NEXT_BUTTON_ID, PREV_BUTTON_ID};
use crate::dom::Listeners;
use crate::viewer::Mailbox;
use reel_core::{Event, NavKey};
use web_sys as web;

/// Previous/next buttons post the same steps as the arrow keys. Disabled
/// buttons never fire click, and the engine rejects steps while navigating or
/// at a boundary anyway.
pub fn wire_nav_buttons(document: &web::Document, listeners: &mut Listeners, mailbox: &Mailbox) {
    for (id, key) in [(PREV_BUTTON_ID, NavKey::Previous), (NEXT_BUTTON_ID, NavKey::Next)] {
        let mailbox = mailbox.clone();
        listeners.add_click(document, id, move || mailbox.post(Event::Step(key)));
    }
}
