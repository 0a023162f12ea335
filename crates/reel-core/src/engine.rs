//! Single owner of all reel state.
//!
//! The front-end turns browser callbacks into [`Event`]s and feeds them to
//! [`ReelEngine::dispatch`] one at a time. The engine routes each event to the
//! component that owns the affected fields and pushes the resulting
//! side effects as [`Effect`]s for the front-end to apply. Components only
//! read each other's state through the engine; nobody writes a field it does
//! not own.

use crate::config::ViewerConfig;
use crate::easing::Easing;
use crate::error::ConfigError;
use crate::image_load::{ImageLoadTracker, LoadOutcome};
use crate::metrics::{ScrollSample, ViewportSnapshot};
use crate::navigation::{Affordances, NavKey, NavigationController, NavigationState};
use crate::registry::PanelRegistry;
use crate::scale::{PanelScale, ScaleTransformer};
use crate::scroller::{ScrollBackend, ScrollHandle, SmoothScroller};
use crate::visibility::{RevealOutcome, VisibilityTracker};

/// Input to the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Scroll notification from the browser or the external scroller.
    Scroll(ViewportSnapshot),
    /// Viewport size changed; forces a scale pass.
    Resize(ViewportSnapshot),
    /// Animation frame callback.
    Frame,
    /// Reveal observer reported `ratio` of panel `index` on screen.
    RevealSignal { index: usize, ratio: f64 },
    /// Current-panel observer reported `ratio` of panel `index` on screen.
    CurrentSignal { index: usize, ratio: f64 },
    ImageLoaded(usize),
    /// Deferred load reconciliation timer fired.
    ReconcileLoads,
    /// Previous/next from the keyboard or the navigation buttons.
    Step(NavKey),
    /// Jump straight to a panel.
    Navigate(usize),
    /// External scroller finished the animation for `handle`.
    ScrollComplete(ScrollHandle),
    /// Safety timer for the navigation carried by `handle` fired.
    NavigationTimeout(ScrollHandle),
    Teardown,
}

/// Side effect requested by the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Progress(f64),
    /// Mark the panel revealed. Never retracted.
    Reveal(usize),
    /// Stop feeding reveal signals for this panel.
    StopObserving(usize),
    Scale(PanelScale),
    /// Write the viewport offset (manual backend).
    ScrollTo(f64),
    /// Hand an animation to the external scroller.
    DelegateScroll {
        handle: ScrollHandle,
        target: f64,
        duration_ms: f64,
        easing: Easing,
    },
    /// Call back with [`Event::Frame`] on the next animation frame.
    RequestFrame,
    /// Call back with [`Event::ReconcileLoads`] after `delay_ms`.
    ScheduleReconcile { delay_ms: u32 },
    /// Call back with [`Event::NavigationTimeout`] after `delay_ms`.
    ScheduleNavigationTimeout { handle: ScrollHandle, delay_ms: u32 },
    Affordances(Affordances),
    CurrentChanged(usize),
    /// Release every listener, observer, timer and frame request.
    Teardown,
}

/// Read-only view of one panel, assembled from the owning components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryItem {
    pub index: usize,
    pub asset_key: String,
    pub loaded: bool,
    pub revealed: bool,
    pub pending_reveal: bool,
}

pub struct ReelEngine<R: PanelRegistry> {
    pub config: ViewerConfig,
    registry: R,
    viewport: ViewportSnapshot,
    visibility: VisibilityTracker,
    loads: ImageLoadTracker,
    scale: ScaleTransformer,
    scroller: SmoothScroller,
    navigation: NavigationController,
    frame_requested: bool,
    last_affordances: Option<Affordances>,
    torn_down: bool,
}

impl<R: PanelRegistry> ReelEngine<R> {
    /// Build an engine over `registry`. The registry is the source of truth
    /// for the panel count; a mismatch with `config.panel_count` is logged and
    /// the registry wins.
    pub fn new(mut config: ViewerConfig, registry: R) -> Result<Self, ConfigError> {
        let n = registry.len();
        if n == 0 {
            return Err(ConfigError::NoPanels);
        }
        if n != config.panel_count {
            log::warn!(
                "[config] panel_count={} but registry has {}; using {}",
                config.panel_count,
                n,
                n
            );
            config.panel_count = n;
        }
        config.validate()?;
        Ok(Self {
            visibility: VisibilityTracker::new(
                n,
                config.reveal_policy,
                config.reveal_threshold,
                config.current_threshold,
                config.track_current,
            ),
            loads: ImageLoadTracker::new(n),
            scale: ScaleTransformer::new(config.scale, config.skip_below_px),
            scroller: SmoothScroller::new(config.backend),
            navigation: NavigationController::new(n),
            registry,
            viewport: ViewportSnapshot::default(),
            frame_requested: false,
            last_affordances: None,
            torn_down: false,
            config,
        })
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.config.panel_count
    }

    pub fn is_empty(&self) -> bool {
        self.config.panel_count == 0
    }

    pub fn viewport(&self) -> ViewportSnapshot {
        self.viewport
    }

    pub fn sample(&self) -> ScrollSample {
        self.viewport.sample()
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigation.state()
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    pub fn loads(&self) -> &ImageLoadTracker {
        &self.loads
    }

    pub fn scroller(&self) -> &SmoothScroller {
        &self.scroller
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn item(&self, index: usize) -> Option<GalleryItem> {
        (index < self.len()).then(|| GalleryItem {
            index,
            asset_key: self.config.assets.path_for(index),
            loaded: self.loads.is_loaded(index),
            revealed: self.visibility.is_revealed(index),
            pending_reveal: self.visibility.is_pending(index),
        })
    }

    pub fn items(&self) -> Vec<GalleryItem> {
        (0..self.len()).filter_map(|i| self.item(i)).collect()
    }

    /// Process one event. `now_ms` is the caller's monotonic clock, the same
    /// one animation frames are stamped with.
    pub fn dispatch(&mut self, event: Event, now_ms: f64, out: &mut Vec<Effect>) {
        if self.torn_down {
            return;
        }
        match event {
            Event::Scroll(snapshot) => {
                self.viewport = snapshot;
                out.push(Effect::Progress(snapshot.sample().progress_percent));
                self.scale.mark_dirty();
                self.request_frame(out);
            }
            Event::Resize(snapshot) => {
                self.viewport = snapshot;
                out.push(Effect::Progress(snapshot.sample().progress_percent));
                self.scale.force();
                self.request_frame(out);
            }
            Event::Frame => self.frame(now_ms, out),
            Event::RevealSignal { index, ratio } => {
                let loaded = self.loads.is_loaded(index);
                match self.visibility.on_intersection(index, ratio, loaded) {
                    RevealOutcome::Revealed => {
                        out.push(Effect::Reveal(index));
                        out.push(Effect::StopObserving(index));
                        self.scale.force();
                        self.request_frame(out);
                    }
                    RevealOutcome::Deferred => out.push(Effect::StopObserving(index)),
                    RevealOutcome::Ignored => {}
                }
            }
            Event::CurrentSignal { index, ratio } => {
                if let Some(i) = self.visibility.on_current_signal(index, ratio) {
                    if self.navigation.observe_current(i) {
                        out.push(Effect::CurrentChanged(i));
                    }
                }
            }
            Event::ImageLoaded(index) => {
                if self.loads.on_image_loaded(index) == LoadOutcome::ScheduleReconcile {
                    out.push(Effect::ScheduleReconcile {
                        delay_ms: self.config.reconcile_delay_ms,
                    });
                }
            }
            Event::ReconcileLoads => {
                let batch = self.loads.drain_batch();
                for index in batch {
                    if self.visibility.promote_loaded(index) {
                        out.push(Effect::Reveal(index));
                        self.scale.force();
                    }
                }
                if self.scale.is_dirty() {
                    self.request_frame(out);
                }
            }
            Event::Step(key) => match self.navigation.target_for_key(key) {
                Some(target) => self.navigate(target, now_ms, out),
                None => log::debug!("[nav] {:?} at boundary", key),
            },
            Event::Navigate(target) => self.navigate(target, now_ms, out),
            Event::ScrollComplete(handle) => {
                self.scroller.complete(handle);
                self.land(|nav| nav.on_scroll_complete(handle), out);
            }
            Event::NavigationTimeout(handle) => {
                // frames stalled mid-jump: finish the manual scroll in one step
                if let Some(target) = self.scroller.settle(handle) {
                    if self.scroller.backend() == ScrollBackend::Manual {
                        out.push(Effect::ScrollTo(target));
                        self.viewport.offset = target;
                        self.scale.mark_dirty();
                        self.request_frame(out);
                    }
                }
                self.land(|nav| nav.on_timeout(handle), out);
            }
            Event::Teardown => {
                self.torn_down = true;
                self.scroller.cancel();
                self.navigation.abort();
                self.frame_requested = false;
                log::info!("[reel] torn down");
                out.push(Effect::Teardown);
                return;
            }
        }
        self.sync_affordances(out);
    }

    fn frame(&mut self, now_ms: f64, out: &mut Vec<Effect>) {
        self.frame_requested = false;
        if let Some(step) = self.scroller.tick(now_ms) {
            out.push(Effect::ScrollTo(step.position));
            self.viewport.offset = step.position;
            self.scale.mark_dirty();
            if step.finished {
                self.land(|nav| nav.on_scroll_complete(step.handle), out);
            } else {
                self.request_frame(out);
            }
        }
        let visibility = &self.visibility;
        if let Some(scales) =
            self.scale
                .compute(&self.viewport, &self.registry, |i| visibility.is_revealed(i))
        {
            out.extend(scales.into_iter().map(Effect::Scale));
        }
    }

    fn navigate(&mut self, target: usize, now_ms: f64, out: &mut Vec<Effect>) {
        let plan = match self
            .navigation
            .request_navigate(target, &self.registry, &self.viewport)
        {
            Ok(plan) => plan,
            Err(e) => {
                log::debug!("[nav] request for panel {} rejected: {}", target, e);
                return;
            }
        };
        let duration_ms = self.config.nav_duration_ms;
        let easing = self.config.nav_easing;
        let handle = self.scroller.scroll_to(
            self.viewport.offset,
            plan.offset,
            duration_ms,
            easing,
            now_ms,
        );
        self.navigation.attach(handle);
        match self.scroller.backend() {
            ScrollBackend::Manual => self.request_frame(out),
            ScrollBackend::External => out.push(Effect::DelegateScroll {
                handle,
                target: plan.offset,
                duration_ms,
                easing,
            }),
        }
        out.push(Effect::ScheduleNavigationTimeout {
            handle,
            delay_ms: (duration_ms + self.config.safety_margin_ms).ceil().max(0.0) as u32,
        });
    }

    fn land(
        &mut self,
        finish: impl FnOnce(&mut NavigationController) -> Option<usize>,
        out: &mut Vec<Effect>,
    ) {
        let before = self.navigation.current_index();
        if let Some(landed) = finish(&mut self.navigation) {
            log::info!("[nav] landed on panel {}", landed);
            if landed != before {
                out.push(Effect::CurrentChanged(landed));
            }
        }
    }

    fn request_frame(&mut self, out: &mut Vec<Effect>) {
        if !self.frame_requested {
            self.frame_requested = true;
            out.push(Effect::RequestFrame);
        }
    }

    fn sync_affordances(&mut self, out: &mut Vec<Effect>) {
        let now = self.navigation.affordances();
        if self.last_affordances != Some(now) {
            self.last_affordances = Some(now);
            out.push(Effect::Affordances(now));
        }
    }
}
