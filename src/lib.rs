#![cfg(target_arch = "wasm32")]
use reel_core::Event;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod observer;
mod panels;
mod render;
mod scroller;
mod ui;
mod viewer;

thread_local! {
    static MOUNTED: RefCell<Option<viewer::Mounted>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("panel-reel starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("[reel] already mounted; ignoring");
        return Ok(());
    }
    let mounted = viewer::mount()?;
    MOUNTED.with(|m| *m.borrow_mut() = Some(mounted));
    Ok(())
}

/// Tear the viewer down: cancels frames and timers, disconnects observers and
/// removes every listener. Safe to call more than once.
#[wasm_bindgen]
pub fn destroy() {
    unmount();
}

pub(crate) fn unmount() {
    let Some(mounted) = MOUNTED.with(|m| m.borrow_mut().take()) else {
        return;
    };
    mounted.mailbox.post(Event::Teardown);
    drop(mounted);
}
