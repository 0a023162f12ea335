use crate::error::NavigateRejected;
use crate::metrics::ViewportSnapshot;
use crate::registry::{PanelGeometry, PanelRegistry};
use crate::scroller::ScrollHandle;

/// Which panel is current and whether a programmatic jump is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub current_index: usize,
    pub navigating: bool,
}

/// Direction requested by a key press or a navigation button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Previous,
    Next,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value. Only the four arrow keys navigate.
    #[inline]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "ArrowLeft" => Some(NavKey::Previous),
            "ArrowDown" | "ArrowRight" => Some(NavKey::Next),
            _ => None,
        }
    }
}

/// Enabled state of the previous/next buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Affordances {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Accepted navigation: the panel to land on and the offset that centers it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationPlan {
    pub target: usize,
    pub offset: f64,
}

/// Offset that puts the middle of `geom` at the middle of the viewport,
/// floored at the top of the document.
#[inline]
pub fn centering_offset(geom: PanelGeometry, viewport_height: f64) -> f64 {
    (geom.top - viewport_height / 2.0 + geom.height / 2.0).max(0.0)
}

#[derive(Clone, Copy, Debug)]
struct InFlight {
    target: usize,
    handle: Option<ScrollHandle>,
}

/// Owns `current_index` and the navigation lock.
///
/// Requests made while a jump is in flight are rejected, not queued: the
/// first request wins until its animation completes or the safety timeout
/// fires.
#[derive(Clone, Debug)]
pub struct NavigationController {
    state: NavigationState,
    panel_count: usize,
    in_flight: Option<InFlight>,
}

impl NavigationController {
    pub fn new(panel_count: usize) -> Self {
        Self {
            state: NavigationState::default(),
            panel_count,
            in_flight: None,
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_navigating(&self) -> bool {
        self.state.navigating
    }

    pub fn in_flight_target(&self) -> Option<usize> {
        self.in_flight.map(|f| f.target)
    }

    pub fn affordances(&self) -> Affordances {
        let idle = !self.state.navigating;
        Affordances {
            prev_enabled: idle && self.state.current_index > 0,
            next_enabled: idle && self.state.current_index + 1 < self.panel_count,
        }
    }

    /// Neighbour of the current panel in `key` direction, `None` at the ends.
    pub fn target_for_key(&self, key: NavKey) -> Option<usize> {
        let cur = self.state.current_index;
        match key {
            NavKey::Previous => cur.checked_sub(1),
            NavKey::Next => (cur + 1 < self.panel_count).then_some(cur + 1),
        }
    }

    /// Check and take the lock in one step.
    pub fn request_navigate<R: PanelRegistry>(
        &mut self,
        target: usize,
        registry: &R,
        viewport: &ViewportSnapshot,
    ) -> Result<NavigationPlan, NavigateRejected> {
        if self.state.navigating {
            return Err(NavigateRejected::Busy);
        }
        if target >= self.panel_count {
            return Err(NavigateRejected::OutOfRange {
                target,
                len: self.panel_count,
            });
        }
        let geom = registry
            .geometry(target)
            .ok_or(NavigateRejected::Unresolvable(target))?;
        self.state.navigating = true;
        self.in_flight = Some(InFlight {
            target,
            handle: None,
        });
        let offset = centering_offset(geom, viewport.viewport_height);
        log::info!("[nav] -> panel {} (offset {:.0})", target, offset);
        Ok(NavigationPlan { target, offset })
    }

    /// Bind the scroll animation that carries the in-flight navigation.
    pub fn attach(&mut self, handle: ScrollHandle) {
        if let Some(f) = &mut self.in_flight {
            f.handle = Some(handle);
        }
    }

    /// Animation finished. Returns the landed panel when `handle` belongs to
    /// the in-flight navigation.
    pub fn on_scroll_complete(&mut self, handle: ScrollHandle) -> Option<usize> {
        match self.in_flight {
            Some(f) if f.handle == Some(handle) => Some(self.finish(f.target)),
            _ => None,
        }
    }

    /// Safety timeout fired. Releases the lock when the completion signal
    /// for `handle` never arrived.
    pub fn on_timeout(&mut self, handle: ScrollHandle) -> Option<usize> {
        match self.in_flight {
            Some(f) if f.handle == Some(handle) => {
                log::warn!("[nav] completion for panel {} missed, releasing lock", f.target);
                Some(self.finish(f.target))
            }
            _ => None,
        }
    }

    /// Scroll-driven current panel. Ignored mid-jump so the lock holder
    /// decides where the jump lands. Returns `true` when the index changed.
    pub fn observe_current(&mut self, index: usize) -> bool {
        if self.state.navigating || index >= self.panel_count {
            return false;
        }
        let changed = self.state.current_index != index;
        self.state.current_index = index;
        changed
    }

    /// Drop any in-flight navigation without moving `current_index`.
    pub fn abort(&mut self) {
        self.in_flight = None;
        self.state.navigating = false;
    }

    fn finish(&mut self, target: usize) -> usize {
        self.in_flight = None;
        self.state.navigating = false;
        self.state.current_index = target;
        target
    }
}
