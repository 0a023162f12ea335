//! Apply step for the per-panel visual state computed by the engine.
//!
//! Only transforms and classes are written here; nothing that affects layout.

use crate::constants::{scale_transform, REVEALED_CLASS};
use crate::panels::DomPanels;
use reel_core::PanelScale;

#[inline]
pub fn apply_scale(panels: &DomPanels, s: PanelScale) {
    if let Some(img) = panels.image(s.index) {
        _ = img
            .style()
            .set_property("transform", &scale_transform(s.scale));
    }
}

#[inline]
pub fn reveal(panels: &DomPanels, index: usize) {
    if let Some(section) = panels.section(index) {
        _ = section.class_list().add_1(REVEALED_CLASS);
    }
}
