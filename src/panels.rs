use crate::constants::{IMAGE_CLASS, INDEX_ATTR, PANEL_CLASS};
use reel_core::{AssetPattern, PanelGeometry, PanelRegistry};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Panel sections and their images, in reel order.
pub struct DomPanels {
    sections: Vec<web::HtmlElement>,
    images: Vec<Option<web::HtmlImageElement>>,
}

impl DomPanels {
    /// Collect the panels already in `root`, or build `count` of them from
    /// `assets` when the markup ships an empty container.
    pub fn mount(
        document: &web::Document,
        root: &web::Element,
        count: usize,
        assets: &AssetPattern,
    ) -> anyhow::Result<Self> {
        let existing = collect_sections(root)?;
        let sections = if existing.is_empty() {
            build_sections(document, root, count, assets)?
        } else {
            log::info!("[panels] using {} panels from markup", existing.len());
            existing
        };
        let images = sections
            .iter()
            .map(|s| {
                s.query_selector("img")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok())
            })
            .collect();
        Ok(Self { sections, images })
    }

    pub fn section(&self, index: usize) -> Option<&web::HtmlElement> {
        self.sections.get(index)
    }

    pub fn image(&self, index: usize) -> Option<&web::HtmlImageElement> {
        self.images.get(index).and_then(|i| i.as_ref())
    }

    pub fn sections(&self) -> &[web::HtmlElement] {
        &self.sections
    }
}

impl PanelRegistry for DomPanels {
    fn len(&self) -> usize {
        self.sections.len()
    }

    fn geometry(&self, index: usize) -> Option<PanelGeometry> {
        let section = self.sections.get(index)?;
        if !section.is_connected() {
            return None;
        }
        let scroll_y = web::window()?.scroll_y().ok()?;
        let rect = section.get_bounding_client_rect();
        Some(PanelGeometry::new(rect.top() + scroll_y, rect.height()))
    }
}

/// Panel index stored on a section by [`DomPanels::mount`] or the markup.
pub fn index_of(el: &web::Element) -> Option<usize> {
    el.get_attribute(INDEX_ATTR)?.parse().ok()
}

fn collect_sections(root: &web::Element) -> anyhow::Result<Vec<web::HtmlElement>> {
    let list = root
        .query_selector_all(&crate::constants::panel_selector())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        let Some(node) = list.get(i) else { continue };
        let Ok(el) = node.dyn_into::<web::HtmlElement>() else {
            continue;
        };
        // markup may omit the index; position in the list is authoritative
        _ = el.set_attribute(INDEX_ATTR, &out.len().to_string());
        out.push(el);
    }
    Ok(out)
}

fn build_sections(
    document: &web::Document,
    root: &web::Element,
    count: usize,
    assets: &AssetPattern,
) -> anyhow::Result<Vec<web::HtmlElement>> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let section: web::HtmlElement = document
            .create_element("section")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        section.set_class_name(PANEL_CLASS);
        _ = section.set_attribute(INDEX_ATTR, &i.to_string());

        let img: web::HtmlImageElement = document
            .create_element("img")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        img.set_class_name(IMAGE_CLASS);
        img.set_alt("");
        img.set_decoding("async");
        _ = img.set_attribute("loading", "lazy");
        img.set_src(&assets.path_for(i));

        section
            .append_child(&img)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        root.append_child(&section)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        out.push(section);
    }
    log::info!("[panels] built {} panels under {}", count, assets.base);
    Ok(out)
}
