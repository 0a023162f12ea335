//! Viewport measurements and scroll progress.
//!
//! Everything here is a pure function of an environment snapshot taken by the
//! front-end at the time of the scroll or resize notification.

/// Snapshot of the scrolling environment.
///
/// - `offset`: current vertical scroll offset in CSS pixels
/// - `viewport_height`: visible height of the window
/// - `document_height`: full scrollable height of the document
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSnapshot {
    pub offset: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ViewportSnapshot {
    pub fn new(offset: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            offset,
            viewport_height,
            document_height,
        }
    }

    /// Distance that can actually be scrolled, floored at 1 so it is always a
    /// safe denominator.
    #[inline]
    pub fn scrollable_height(&self) -> f64 {
        (self.document_height - self.viewport_height).max(1.0)
    }

    /// Vertical center of the viewport in document coordinates.
    #[inline]
    pub fn center(&self) -> f64 {
        self.offset + self.viewport_height / 2.0
    }

    pub fn sample(&self) -> ScrollSample {
        ScrollSample {
            offset: self.offset,
            progress_percent: compute_progress(
                self.offset,
                self.viewport_height,
                self.document_height,
            ),
        }
    }
}

/// Progress derived from a single scroll notification. Not persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    pub offset: f64,
    pub progress_percent: f64,
}

/// Percentage of the scrollable distance traversed.
///
/// Values outside [0, 100] are passed through unchanged so elastic overscroll
/// at either end stays visible to the caller.
#[inline]
pub fn compute_progress(offset: f64, viewport_height: f64, document_height: f64) -> f64 {
    offset / (document_height - viewport_height).max(1.0) * 100.0
}
