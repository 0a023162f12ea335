use thiserror::Error;

/// Problems found while building a [`crate::ViewerConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("a reel needs at least one panel")]
    NoPanels,
    #[error("unknown reveal policy `{0}` (expected `eager` or `load-gated`)")]
    UnknownPolicy(String),
    #[error("unknown scale profile `{0}` (expected `full` or `compact`)")]
    UnknownProfile(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: &'static str, value: String },
}

/// Why a navigation request was dropped. Rejections are absorbed by the
/// engine; the type exists so callers and tests can tell the cases apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigateRejected {
    #[error("a navigation is already in flight")]
    Busy,
    #[error("panel {target} is outside 0..{len}")]
    OutOfRange { target: usize, len: usize },
    #[error("panel {0} has no resolvable geometry")]
    Unresolvable(usize),
}
