use crate::viewer::Mailbox;
use fnv::FnvHashMap;
use reel_core::Event;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Coalesces animation frame requests: however many times `request` is called
/// before the frame fires, exactly one `Event::Frame` is posted.
#[derive(Default)]
pub struct FrameScheduler {
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameScheduler {
    pub fn request(&self, mailbox: &Mailbox) {
        if self.pending.get().is_some() {
            return;
        }
        let Some(window) = web::window() else { return };
        let pending = self.pending.clone();
        let mailbox = mailbox.clone();
        let cb = Closure::once_into_js(move || {
            pending.set(None);
            mailbox.post(Event::Frame);
        });
        match window.request_animation_frame(cb.unchecked_ref()) {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    pub fn cancel(&self) {
        if let (Some(id), Some(window)) = (self.pending.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
    }
}

/// One-shot timers that post an event when they fire. Pending timers are
/// cleared on teardown.
#[derive(Default)]
pub struct Timers {
    pending: Rc<RefCell<FnvHashMap<u64, i32>>>,
    next_token: u64,
}

impl Timers {
    pub fn schedule(&mut self, delay_ms: u32, event: Event, mailbox: &Mailbox) {
        let Some(window) = web::window() else { return };
        let token = self.next_token;
        self.next_token += 1;
        let pending = self.pending.clone();
        let mailbox = mailbox.clone();
        let cb = Closure::once_into_js(move || {
            pending.borrow_mut().remove(&token);
            mailbox.post(event);
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay)
        {
            Ok(id) => {
                self.pending.borrow_mut().insert(token, id);
            }
            Err(e) => log::error!("[timer] setTimeout failed: {:?}", e),
        }
    }

    pub fn clear_all(&mut self) {
        let ids: Vec<i32> = self.pending.borrow_mut().drain().map(|(_, id)| id).collect();
        if let Some(window) = web::window() {
            for id in ids {
                window.clear_timeout_with_handle(id);
            }
        }
    }
}
