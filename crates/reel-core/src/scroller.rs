use crate::easing::Easing;

/// Who moves the viewport during a programmatic scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollBackend {
    /// Interpolate in the frame callback and write the offset ourselves.
    #[default]
    Manual,
    /// Hand the target to an external inertial scroller and wait for its
    /// completion callback.
    External,
}

/// Token identifying one `scroll_to` call. Handles from superseded or
/// cancelled animations never match the active one again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScrollHandle(pub u64);

/// Time-based interpolation from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(0.0),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }

    /// Position at `now_ms`; exactly `to` once the duration has elapsed.
    pub fn sample(&self, now_ms: f64) -> f64 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

/// One frame's worth of manual scrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollStep {
    pub handle: ScrollHandle,
    pub position: f64,
    pub finished: bool,
}

#[derive(Clone, Copy, Debug)]
struct ActiveScroll {
    handle: ScrollHandle,
    tween: Tween,
}

/// Single-flight smooth scroller.
///
/// Only one animation can be active; `scroll_to` replaces whatever was
/// running, so two interpolations can never write the offset in the same
/// frame.
#[derive(Clone, Debug)]
pub struct SmoothScroller {
    backend: ScrollBackend,
    active: Option<ActiveScroll>,
    next_handle: u64,
}

impl SmoothScroller {
    pub fn new(backend: ScrollBackend) -> Self {
        Self {
            backend,
            active: None,
            next_handle: 1,
        }
    }

    pub fn backend(&self) -> ScrollBackend {
        self.backend
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_handle(&self) -> Option<ScrollHandle> {
        self.active.map(|a| a.handle)
    }

    pub fn scroll_to(
        &mut self,
        from: f64,
        target: f64,
        duration_ms: f64,
        easing: Easing,
        now_ms: f64,
    ) -> ScrollHandle {
        let handle = ScrollHandle(self.next_handle);
        self.next_handle += 1;
        if let Some(prev) = self.active.take() {
            log::debug!("[scroll] {:?} superseded by {:?}", prev.handle, handle);
        }
        self.active = Some(ActiveScroll {
            handle,
            tween: Tween::new(from, target, now_ms, duration_ms, easing),
        });
        handle
    }

    /// Advance the manual interpolation. Returns `None` when idle or when the
    /// external backend owns the motion.
    pub fn tick(&mut self, now_ms: f64) -> Option<ScrollStep> {
        if self.backend != ScrollBackend::Manual {
            return None;
        }
        let active = self.active?;
        let finished = active.tween.is_done(now_ms);
        if finished {
            self.active = None;
        }
        Some(ScrollStep {
            handle: active.handle,
            position: active.tween.sample(now_ms),
            finished,
        })
    }

    /// Completion reported by the external backend. Stale handles are ignored.
    pub fn complete(&mut self, handle: ScrollHandle) -> bool {
        match self.active {
            Some(a) if a.handle == handle => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Stop the animation for `handle` and return its target, so the caller
    /// can jump straight there. `None` when `handle` is no longer active.
    pub fn settle(&mut self, handle: ScrollHandle) -> Option<f64> {
        match self.active {
            Some(a) if a.handle == handle => {
                self.active = None;
                Some(a.tween.to)
            }
            _ => None,
        }
    }

    /// Stop the active animation, if any, without settling at its target.
    pub fn cancel(&mut self) -> Option<ScrollHandle> {
        self.active.take().map(|a| a.handle)
    }
}
