use crate::constants::CONFIG_KEYS;
use reel_core::ViewerConfig;
use web_sys as web;

/// Build the viewer configuration from the root element's `data-*`
/// attributes. Bad values are logged and the default is kept.
pub fn read_config(root: &web::Element) -> ViewerConfig {
    let mut config = ViewerConfig::default();
    for key in CONFIG_KEYS {
        let Some(value) = root.get_attribute(&format!("data-{}", key)) else {
            continue;
        };
        if let Err(e) = config.apply_override(key, &value) {
            log::warn!("[config] {}; keeping default", e);
        }
    }
    config
}
