/// Deterministic mapping from panel index to image resource.
///
/// Panels are numbered from 1 externally, so index 0 resolves to `1.<ext>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPattern {
    pub base: String,
    pub extension: String,
}

impl Default for AssetPattern {
    fn default() -> Self {
        Self {
            base: "images".to_string(),
            extension: "jpg".to_string(),
        }
    }
}

impl AssetPattern {
    pub fn new(base: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            extension: extension.into(),
        }
    }

    /// Resource path for the 0-based panel `index`.
    pub fn path_for(&self, index: usize) -> String {
        let base = self.base.trim_end_matches('/');
        let ext = self.extension.trim_start_matches('.');
        if base.is_empty() {
            format!("{}.{}", index + 1, ext)
        } else {
            format!("{}/{}.{}", base, index + 1, ext)
        }
    }
}
