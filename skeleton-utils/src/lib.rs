// SkeletonView: shared types
//
// Colours, gradients and configuration used by the render and host crates.

pub mod color;
pub mod config;
pub mod gradient;

pub use color::{ParseColorError, Rgba};
pub use config::{Config, ConfigError, ConfigResult, MaskStyle, ShimmerConfig};
pub use gradient::{GradientStop, LinearGradient, UnitPoint};
