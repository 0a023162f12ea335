/// Layout box of a panel in absolute document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelGeometry {
    pub top: f64,
    pub height: f64,
}

impl PanelGeometry {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Ordered collection of panel handles created once and shared with the
/// engine.
///
/// Geometry is read on every call because layout can shift between frames
/// (late images, font loads, resizes). Implementations must not cache it.
pub trait PanelRegistry {
    fn len(&self) -> usize;

    /// Current geometry of panel `index`, or `None` when the panel cannot be
    /// resolved right now (detached element, index out of range).
    fn geometry(&self, index: usize) -> Option<PanelGeometry>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registry backed by a plain list of boxes. Used by hosts that compute their
/// own layout.
#[derive(Clone, Debug, Default)]
pub struct StaticRegistry {
    pub panels: Vec<PanelGeometry>,
}

impl StaticRegistry {
    pub fn new(panels: Vec<PanelGeometry>) -> Self {
        Self { panels }
    }

    /// `count` panels of equal `height` stacked with `gap` pixels between them.
    pub fn uniform(count: usize, height: f64, gap: f64) -> Self {
        let panels = (0..count)
            .map(|i| PanelGeometry::new(i as f64 * (height + gap), height))
            .collect();
        Self { panels }
    }

    /// Bottom edge of the last panel.
    pub fn content_height(&self) -> f64 {
        self.panels
            .last()
            .map(|p| p.top + p.height)
            .unwrap_or(0.0)
    }
}

impl PanelRegistry for StaticRegistry {
    fn len(&self) -> usize {
        self.panels.len()
    }

    fn geometry(&self, index: usize) -> Option<PanelGeometry> {
        self.panels.get(index).copied()
    }
}
