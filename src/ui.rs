use crate::constants::{
    counter_text, progress_width, COUNTER_ID, NEXT_BUTTON_ID, PREV_BUTTON_ID, PROGRESS_ID,
    PROGRESS_VAR,
};
use reel_core::Affordances;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Progress bar, counter and navigation buttons around the reel. Every piece
/// is optional in the markup.
pub struct Chrome {
    root: web::HtmlElement,
    progress: Option<web::HtmlElement>,
    counter: Option<web::Element>,
    prev: Option<web::Element>,
    next: Option<web::Element>,
}

impl Chrome {
    pub fn find(document: &web::Document, root: web::HtmlElement) -> Self {
        Self {
            root,
            progress: document
                .get_element_by_id(PROGRESS_ID)
                .and_then(|el| el.dyn_into::<web::HtmlElement>().ok()),
            counter: document.get_element_by_id(COUNTER_ID),
            prev: document.get_element_by_id(PREV_BUTTON_ID),
            next: document.get_element_by_id(NEXT_BUTTON_ID),
        }
    }

    pub fn set_progress(&self, percent: f64) {
        _ = self
            .root
            .style()
            .set_property(PROGRESS_VAR, &format!("{:.2}", percent));
        if let Some(bar) = &self.progress {
            _ = bar.style().set_property("width", &progress_width(percent));
        }
    }

    pub fn set_current(&self, current: usize, total: usize) {
        _ = self.root.set_attribute("data-current", &current.to_string());
        if let Some(el) = &self.counter {
            el.set_text_content(Some(&counter_text(current, total)));
        }
    }

    pub fn set_affordances(&self, a: Affordances) {
        if let Some(el) = &self.prev {
            set_enabled(el, a.prev_enabled);
        }
        if let Some(el) = &self.next {
            set_enabled(el, a.next_enabled);
        }
    }
}

fn set_enabled(el: &web::Element, enabled: bool) {
    if let Some(button) = el.dyn_ref::<web::HtmlButtonElement>() {
        button.set_disabled(!enabled);
    } else if enabled {
        _ = el.remove_attribute("disabled");
    } else {
        _ = el.set_attribute("disabled", "");
    }
}
