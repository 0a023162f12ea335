use crate::constants::ROOT_ID;
use crate::dom::{self, Listeners};
use crate::events;
use crate::frame::{FrameScheduler, Timers};
use crate::observer::{self, Observers, PanelObserver};
use crate::panels::DomPanels;
use crate::render;
use crate::scroller::ExternalScroller;
use crate::ui::Chrome;
use reel_core::{Effect, Event, ReelEngine, ScrollBackend};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Queue in front of the viewer. Every browser callback posts here; events
/// are handled strictly one at a time, in arrival order, even when applying
/// one event's effects synchronously triggers another callback.
#[derive(Clone)]
pub struct Mailbox {
    queue: Rc<RefCell<VecDeque<Event>>>,
    draining: Rc<Cell<bool>>,
    viewer: Weak<RefCell<Viewer>>,
}

impl Mailbox {
    fn new(viewer: Weak<RefCell<Viewer>>) -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
            draining: Rc::new(Cell::new(false)),
            viewer,
        }
    }

    pub fn post(&self, event: Event) {
        self.queue.borrow_mut().push_back(event);
        if self.draining.replace(true) {
            return;
        }
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else { break };
            let Some(viewer) = self.viewer.upgrade() else {
                self.queue.borrow_mut().clear();
                break;
            };
            let Ok(mut v) = viewer.try_borrow_mut() else {
                // still being wired; the next post picks it up
                self.queue.borrow_mut().push_front(event);
                break;
            };
            v.handle(event, self);
        }
        self.draining.set(false);
    }
}

pub struct Viewer {
    engine: ReelEngine<DomPanels>,
    chrome: Chrome,
    effects: Vec<Effect>,
    frames: FrameScheduler,
    timers: Timers,
    observers: Option<Observers>,
    listeners: Listeners,
    external: Option<ExternalScroller>,
}

/// A live viewer and the mailbox feeding it.
pub struct Mounted {
    pub viewer: Rc<RefCell<Viewer>>,
    pub mailbox: Mailbox,
}

pub fn mount() -> anyhow::Result<Mounted> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let root: web::HtmlElement = document
        .get_element_by_id(ROOT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", ROOT_ID))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let mut config = crate::config::read_config(&root);
    let external = ExternalScroller::detect();
    if external.is_some() {
        config.backend = ScrollBackend::External;
    }
    let panels = DomPanels::mount(&document, &root, config.panel_count, &config.assets)?;
    let engine = ReelEngine::new(config, panels)?;
    log::info!(
        "[reel] {} panels, policy={:?}, backend={:?}",
        engine.len(),
        engine.config.reveal_policy,
        engine.config.backend
    );

    let chrome = Chrome::find(&document, root);
    chrome.set_current(0, engine.len());

    let viewer = Rc::new(RefCell::new(Viewer {
        engine,
        chrome,
        effects: Vec::new(),
        frames: FrameScheduler::default(),
        timers: Timers::default(),
        observers: None,
        listeners: Listeners::default(),
        external,
    }));
    let mailbox = Mailbox::new(Rc::downgrade(&viewer));
    let initial = viewer.borrow_mut().wire(&document, &mailbox)?;

    mailbox.post(Event::Resize(dom::viewport_snapshot()));
    for event in initial {
        mailbox.post(event);
    }
    Ok(Mounted { viewer, mailbox })
}

impl Viewer {
    /// Register every listener and observer. Returns events that are already
    /// true at mount time (images served from cache).
    fn wire(&mut self, document: &web::Document, mailbox: &Mailbox) -> anyhow::Result<Vec<Event>> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;

        let external_scroll = match &mut self.external {
            Some(ext) => ext.subscribe_scroll(mailbox),
            None => false,
        };
        if !external_scroll {
            let mb = mailbox.clone();
            self.listeners.add(&window, "scroll", move |_| {
                mb.post(Event::Scroll(dom::viewport_snapshot()));
            });
        }
        let mb = mailbox.clone();
        self.listeners.add(&window, "resize", move |_| {
            mb.post(Event::Resize(dom::viewport_snapshot()));
        });
        // deferred so the listener is not dropped while it is running
        self.listeners.add(&window, "pagehide", |_| {
            wasm_bindgen_futures::spawn_local(async { crate::unmount() })
        });

        events::wire_keydown(&mut self.listeners, mailbox);
        events::wire_nav_buttons(document, &mut self.listeners, mailbox);

        let mut initial = Vec::new();
        let panels = self.engine.registry();
        for (i, _) in panels.sections().iter().enumerate() {
            let Some(img) = panels.image(i) else {
                initial.push(Event::ImageLoaded(i));
                continue;
            };
            if img.complete() {
                if img.natural_width() == 0 {
                    log::warn!("[load] panel {} image is broken", i);
                }
                initial.push(Event::ImageLoaded(i));
                continue;
            }
            let mb = mailbox.clone();
            self.listeners
                .add(img, "load", move |_| mb.post(Event::ImageLoaded(i)));
            let mb = mailbox.clone();
            self.listeners.add(img, "error", move |_| {
                // a failed image must not hold a load-gated reveal forever
                log::warn!("[load] panel {} image failed", i);
                mb.post(Event::ImageLoaded(i));
            });
        }

        let sections = panels.sections().to_vec();
        let config = &self.engine.config;
        let reveal = PanelObserver::new(
            &sections,
            config.reveal_threshold,
            &config.reveal_root_margin,
            mailbox,
            observer::reveal_event,
        )?;
        let current = if config.track_current {
            Some(PanelObserver::new(
                &sections,
                config.current_threshold,
                "0px",
                mailbox,
                observer::current_event,
            )?)
        } else {
            None
        };
        self.observers = Some(Observers { reveal, current });
        Ok(initial)
    }

    fn handle(&mut self, event: Event, mailbox: &Mailbox) {
        let mut effects = std::mem::take(&mut self.effects);
        effects.clear();
        self.engine.dispatch(event, dom::now_ms(), &mut effects);
        for effect in effects.drain(..) {
            self.apply(effect, mailbox);
        }
        self.effects = effects;
    }

    fn apply(&mut self, effect: Effect, mailbox: &Mailbox) {
        match effect {
            Effect::Progress(p) => self.chrome.set_progress(p),
            Effect::Reveal(i) => render::reveal(self.engine.registry(), i),
            Effect::StopObserving(i) => {
                if let (Some(obs), Some(section)) =
                    (&self.observers, self.engine.registry().section(i))
                {
                    obs.reveal.unobserve(section);
                }
            }
            Effect::Scale(s) => render::apply_scale(self.engine.registry(), s),
            Effect::ScrollTo(y) => dom::scroll_window_to(y),
            Effect::DelegateScroll {
                handle,
                target,
                duration_ms,
                easing,
            } => match &mut self.external {
                Some(ext) => ext.scroll_to(handle, target, duration_ms, easing, mailbox),
                None => log::warn!("[scroll] no external scroller for {:?}", handle),
            },
            Effect::RequestFrame => self.frames.request(mailbox),
            Effect::ScheduleReconcile { delay_ms } => {
                self.timers
                    .schedule(delay_ms, Event::ReconcileLoads, mailbox)
            }
            Effect::ScheduleNavigationTimeout { handle, delay_ms } => {
                self.timers
                    .schedule(delay_ms, Event::NavigationTimeout(handle), mailbox)
            }
            Effect::Affordances(a) => self.chrome.set_affordances(a),
            Effect::CurrentChanged(i) => self.chrome.set_current(i, self.engine.len()),
            Effect::Teardown => self.release(),
        }
    }

    fn release(&mut self) {
        self.frames.cancel();
        self.timers.clear_all();
        if let Some(obs) = self.observers.take() {
            obs.disconnect();
        }
        self.listeners.remove_all();
        if let Some(mut ext) = self.external.take() {
            ext.destroy();
        }
    }
}
