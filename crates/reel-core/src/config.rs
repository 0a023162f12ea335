use crate::assets::AssetPattern;
use crate::easing::Easing;
use crate::error::ConfigError;
use crate::scale::ScaleParams;
use crate::scroller::ScrollBackend;
use std::str::FromStr;

/// When a panel that crossed the reveal threshold becomes visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RevealPolicy {
    /// Reveal on threshold crossing; the image may still be loading.
    #[default]
    Eager,
    /// Hold the reveal until the panel's image has finished loading.
    LoadGated,
}

impl FromStr for RevealPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(RevealPolicy::Eager),
            "load-gated" | "load_gated" | "loadgated" => Ok(RevealPolicy::LoadGated),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Named presets for the proximity scale curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleProfile {
    /// Falloff over a full viewport height, 0.8 floor.
    #[default]
    Full,
    /// Falloff over 80% of the viewport, 0.85 floor.
    Compact,
}

impl ScaleProfile {
    pub fn params(self) -> ScaleParams {
        match self {
            ScaleProfile::Full => ScaleParams {
                max_distance_fraction: 1.0,
                spread: 0.2,
                floor: 0.8,
            },
            ScaleProfile::Compact => ScaleParams {
                max_distance_fraction: 0.8,
                spread: 0.15,
                floor: 0.85,
            },
        }
    }
}

impl FromStr for ScaleProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(ScaleProfile::Full),
            "compact" => Ok(ScaleProfile::Compact),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }
}

/// Everything the engine needs to know at construction time.
///
/// - `panel_count`: number of panels in the reel (must be > 0)
/// - `reveal_policy`: eager or load-gated reveal
/// - `scale`: proximity scale curve
/// - `skip_below_px`: skip scale recomputation for sub-threshold scroll deltas
/// - `track_current`: follow the most visible panel as the user scrolls
/// - `nav_duration_ms` / `nav_easing`: programmatic scroll animation
/// - `safety_margin_ms`: extra time past the animation before the lock is
///   force-released
/// - `reconcile_delay_ms`: batching window for image load reconciliation
/// - `backend`: manual frame interpolation or an external inertial scroller
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub panel_count: usize,
    pub reveal_policy: RevealPolicy,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub track_current: bool,
    pub current_threshold: f64,
    pub scale: ScaleParams,
    pub skip_below_px: Option<f64>,
    pub nav_duration_ms: f64,
    pub nav_easing: Easing,
    pub safety_margin_ms: f64,
    pub reconcile_delay_ms: u32,
    pub backend: ScrollBackend,
    pub assets: AssetPattern,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            panel_count: 29,
            reveal_policy: RevealPolicy::Eager,
            reveal_threshold: 0.15,
            reveal_root_margin: "0px 0px -10% 0px".to_string(),
            track_current: true,
            current_threshold: 0.5,
            scale: ScaleProfile::Full.params(),
            skip_below_px: None,
            nav_duration_ms: 800.0,
            nav_easing: Easing::CubicInOut,
            safety_margin_ms: 200.0,
            reconcile_delay_ms: 50,
            backend: ScrollBackend::Manual,
            assets: AssetPattern::default(),
        }
    }
}

impl ViewerConfig {
    pub fn with_panels(panel_count: usize) -> Self {
        Self {
            panel_count,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.panel_count == 0 {
            return Err(ConfigError::NoPanels);
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::InvalidValue {
                key: "reveal_threshold",
                value: self.reveal_threshold.to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.current_threshold) {
            return Err(ConfigError::InvalidValue {
                key: "current_threshold",
                value: self.current_threshold.to_string(),
            });
        }
        if !is_valid_duration(self.nav_duration_ms) {
            return Err(ConfigError::InvalidValue {
                key: "duration",
                value: self.nav_duration_ms.to_string(),
            });
        }
        if !is_valid_duration(self.safety_margin_ms) {
            return Err(ConfigError::InvalidValue {
                key: "safety_margin",
                value: self.safety_margin_ms.to_string(),
            });
        }
        Ok(())
    }

    /// Apply a single `key = value` override, as read from markup attributes.
    ///
    /// Unknown keys are ignored so new attributes can be added to the page
    /// without breaking older builds.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "panels" => {
                self.panel_count = parse_value("panels", value)?;
            }
            "policy" => self.reveal_policy = value.parse()?,
            "profile" => self.scale = value.parse::<ScaleProfile>()?.params(),
            "asset-base" => self.assets.base = value.trim().to_string(),
            "asset-ext" => self.assets.extension = value.trim().to_string(),
            "track-current" => {
                self.track_current = parse_value("track-current", value)?;
            }
            "skip-px" => {
                let px: f64 = parse_value("skip-px", value)?;
                self.skip_below_px = (px > 0.0).then_some(px);
            }
            "duration" => {
                let ms: f64 = parse_value("duration", value)?;
                if !is_valid_duration(ms) {
                    return Err(ConfigError::InvalidValue {
                        key: "duration",
                        value: value.to_string(),
                    });
                }
                self.nav_duration_ms = ms;
            }
            _ => log::debug!("[config] ignoring unknown key {}", key),
        }
        Ok(())
    }
}

/// Longest navigation animation or safety margin accepted, in ms.
pub const MAX_DURATION_MS: f64 = 10_000.0;

/// The navigation lock is held for duration plus margin, so both must be
/// finite and bounded.
fn is_valid_duration(ms: f64) -> bool {
    ms.is_finite() && (0.0..=MAX_DURATION_MS).contains(&ms)
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
