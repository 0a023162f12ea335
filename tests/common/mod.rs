// Shared fixtures for the host-side engine tests.

#![allow(dead_code)]

use reel_core::*;

pub const PANEL_COUNT: usize = 29;
pub const PANEL_HEIGHT: f64 = 600.0;
pub const VIEWPORT_HEIGHT: f64 = 900.0;

/// 29 panels of 600px stacked without gaps.
pub fn layout() -> StaticRegistry {
    StaticRegistry::uniform(PANEL_COUNT, PANEL_HEIGHT, 0.0)
}

pub fn document_height() -> f64 {
    layout().content_height()
}

pub fn viewport_at(offset: f64) -> ViewportSnapshot {
    ViewportSnapshot::new(offset, VIEWPORT_HEIGHT, document_height())
}

pub fn config(policy: RevealPolicy) -> ViewerConfig {
    ViewerConfig {
        reveal_policy: policy,
        ..ViewerConfig::with_panels(PANEL_COUNT)
    }
}

/// Engine over the standard layout, sized and positioned at the top.
pub fn engine(cfg: ViewerConfig) -> ReelEngine<StaticRegistry> {
    let mut e = ReelEngine::new(cfg, layout()).expect("valid config");
    let mut out = Vec::new();
    e.dispatch(Event::Resize(viewport_at(0.0)), 0.0, &mut out);
    e
}

pub fn dispatch<R: PanelRegistry>(e: &mut ReelEngine<R>, event: Event, now_ms: f64) -> Vec<Effect> {
    let mut out = Vec::new();
    e.dispatch(event, now_ms, &mut out);
    out
}

pub fn reveals(effects: &[Effect]) -> Vec<usize> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Reveal(i) => Some(*i),
            _ => None,
        })
        .collect()
}

pub fn scales(effects: &[Effect]) -> Vec<PanelScale> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Scale(s) => Some(*s),
            _ => None,
        })
        .collect()
}

pub fn frame_requests(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::RequestFrame))
        .count()
}

pub fn timeout_handle(effects: &[Effect]) -> Option<ScrollHandle> {
    effects.iter().find_map(|e| match e {
        Effect::ScheduleNavigationTimeout { handle, .. } => Some(*handle),
        _ => None,
    })
}

pub fn scroll_writes(effects: &[Effect]) -> Vec<f64> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::ScrollTo(y) => Some(*y),
            _ => None,
        })
        .collect()
}

/// Run frames every 16ms from `start_ms` until the navigation lock clears.
/// Returns the time of the last frame.
pub fn run_frames<R: PanelRegistry>(e: &mut ReelEngine<R>, start_ms: f64) -> f64 {
    let mut now = start_ms;
    for _ in 0..1000 {
        if !e.navigation().navigating {
            break;
        }
        now += 16.0;
        dispatch(e, Event::Frame, now);
    }
    now
}

/// Registry where some panels cannot be resolved.
pub struct HoleyRegistry {
    pub inner: StaticRegistry,
    pub missing: Vec<usize>,
}

impl PanelRegistry for HoleyRegistry {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn geometry(&self, index: usize) -> Option<PanelGeometry> {
        if self.missing.contains(&index) {
            None
        } else {
            self.inner.geometry(index)
        }
    }
}
