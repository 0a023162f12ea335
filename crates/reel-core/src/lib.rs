pub mod assets;
pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod image_load;
pub mod metrics;
pub mod navigation;
pub mod registry;
pub mod scale;
pub mod scroller;
pub mod visibility;

pub use assets::*;
pub use config::*;
pub use easing::*;
pub use engine::*;
pub use error::*;
pub use image_load::*;
pub use metrics::*;
pub use navigation::*;
pub use registry::*;
pub use scale::*;
pub use scroller::*;
pub use visibility::*;
