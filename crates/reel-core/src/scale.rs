//! Proximity-to-center scale for revealed panels.
//!
//! The compute step here is pure. The front-end applies the returned values as
//! a visual transform on the image element only, so layout never changes and
//! the next measurement is not affected by the last write.

use crate::metrics::ViewportSnapshot;
use crate::registry::PanelRegistry;

/// Shape of the scale falloff.
///
/// - `max_distance_fraction`: distance at which the floor is reached, as a
///   fraction of viewport height
/// - `spread`: how much scale is lost at full distance
/// - `floor`: smallest scale ever produced
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleParams {
    pub max_distance_fraction: f64,
    pub spread: f64,
    pub floor: f64,
}

/// Scale for a panel whose center is `distance` pixels from the viewport
/// center. Always within `[floor, 1]`; exactly 1 at distance 0.
#[inline]
pub fn proximity_scale(distance: f64, max_distance: f64, spread: f64, floor: f64) -> f64 {
    let normalized = if max_distance > 0.0 {
        (distance.abs() / max_distance).min(1.0)
    } else if distance == 0.0 {
        0.0
    } else {
        1.0
    };
    (1.0 - normalized * spread).clamp(floor.min(1.0), 1.0)
}

/// Desired scale for one panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelScale {
    pub index: usize,
    pub scale: f64,
}

/// Per-frame scale computation with coalescing.
///
/// Scroll notifications only call [`ScaleTransformer::mark_dirty`]; the
/// actual computation happens in [`ScaleTransformer::compute`], which the
/// engine runs from the frame callback.
#[derive(Clone, Debug)]
pub struct ScaleTransformer {
    params: ScaleParams,
    skip_below_px: Option<f64>,
    last_offset: Option<f64>,
    dirty: bool,
    forced: bool,
}

impl ScaleTransformer {
    pub fn new(params: ScaleParams, skip_below_px: Option<f64>) -> Self {
        Self {
            params,
            skip_below_px,
            last_offset: None,
            dirty: false,
            forced: false,
        }
    }

    pub fn params(&self) -> ScaleParams {
        self.params
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Mark dirty and bypass the small-delta skip on the next run.
    pub fn force(&mut self) {
        self.dirty = true;
        self.forced = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Compute scales for every revealed panel if a recomputation is due.
    ///
    /// Returns `None` when nothing changed since the last frame or the offset
    /// moved less than the configured skip threshold.
    pub fn compute<R: PanelRegistry>(
        &mut self,
        viewport: &ViewportSnapshot,
        registry: &R,
        revealed: impl Fn(usize) -> bool,
    ) -> Option<Vec<PanelScale>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        let forced = std::mem::take(&mut self.forced);
        if let (false, Some(min_delta), Some(last)) = (forced, self.skip_below_px, self.last_offset)
        {
            if (viewport.offset - last).abs() < min_delta {
                return None;
            }
        }
        self.last_offset = Some(viewport.offset);

        let viewport_center = viewport.center();
        let max_distance = viewport.viewport_height * self.params.max_distance_fraction;
        let out = (0..registry.len())
            .filter(|&i| revealed(i))
            .filter_map(|i| {
                let geom = registry.geometry(i)?;
                let distance = (viewport_center - geom.center()).abs();
                Some(PanelScale {
                    index: i,
                    scale: proximity_scale(
                        distance,
                        max_distance,
                        self.params.spread,
                        self.params.floor,
                    ),
                })
            })
            .collect();
        Some(out)
    }
}
