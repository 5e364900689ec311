// SkeletonView: Configuration
//
// Effect parameters loaded from a KDL document:
//
// ```kdl
// fps 30
// background "#000000"
// redacted true
// shimmer {
//     active true
//     duration 1.5
//     bounce false
// }
// mask {
//     color "#808080"
//     edge_opacity 0.5
//     center_opacity 1.0
//     band_width 0.1
//     scale 3.0
// }
// ```
//
// Every key is optional. Unknown nodes are logged and skipped.

use std::fs;
use std::path::Path;

use kdl::{KdlDocument, KdlNode, KdlValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{ParseColorError, Rgba};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Kdl(#[from] kdl::KdlError),

    #[error("missing value for '{0}'")]
    MissingValue(String),

    #[error("invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: &'static str },

    #[error(transparent)]
    InvalidColor(#[from] ParseColorError),

    #[error("fps must be greater than zero")]
    ZeroFps,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Shimmer parameters: whether it runs, the cycle length in seconds, and
/// whether each cycle reverses the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimmerConfig {
    pub active: bool,
    pub duration: f64,
    pub bounce: bool,
}

impl ShimmerConfig {
    pub const DEFAULT_DURATION: f64 = 1.5;

    pub fn new(active: bool, duration: f64, bounce: bool) -> Self {
        Self {
            active,
            duration,
            bounce,
        }
    }

    fn from_kdl(node: &KdlNode) -> ConfigResult<Self> {
        let mut config = Self::default();
        for child in children(node) {
            match child.name().value() {
                "active" => config.active = bool_arg(child)?,
                "duration" => config.duration = float_arg(child)?,
                "bounce" => config.bounce = bool_arg(child)?,
                other => log::warn!("Ignoring unknown shimmer option '{}'", other),
            }
        }
        Ok(config)
    }
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self {
            active: true,
            duration: Self::DEFAULT_DURATION,
            bounce: false,
        }
    }
}

/// Appearance of the shimmer mask
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskStyle {
    /// Base hue shared by every stop
    pub color: Rgba,
    /// Opacity of the outer stops
    pub edge_opacity: f32,
    /// Opacity of the middle stop
    pub center_opacity: f32,
    /// Distance between neighbouring stops along the gradient axis
    pub band_width: f32,
    /// Size of the mask relative to the content it covers
    pub scale: f32,
}

impl MaskStyle {
    fn from_kdl(node: &KdlNode) -> ConfigResult<Self> {
        let mut style = Self::default();
        for child in children(node) {
            match child.name().value() {
                "color" => style.color = color_arg(child)?,
                "edge_opacity" => style.edge_opacity = float_arg(child)? as f32,
                "center_opacity" => style.center_opacity = float_arg(child)? as f32,
                "band_width" => style.band_width = float_arg(child)? as f32,
                "scale" => style.scale = float_arg(child)? as f32,
                other => log::warn!("Ignoring unknown mask option '{}'", other),
            }
        }
        Ok(style)
    }
}

impl Default for MaskStyle {
    fn default() -> Self {
        Self {
            color: Rgba::GRAY,
            edge_opacity: 0.5,
            center_opacity: 1.0,
            band_width: 0.1,
            scale: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frames per second requested from the scheduler
    pub fps: u32,
    /// Colour translucent cells are composited over
    pub background: Rgba,
    /// Whether content starts in the placeholder state
    pub redacted: bool,
    pub shimmer: ShimmerConfig,
    pub mask: MaskStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 30,
            background: Rgba::BLACK,
            redacted: true,
            shimmer: ShimmerConfig::default(),
            mask: MaskStyle::default(),
        }
    }
}

impl Config {
    /// Parse a KDL document, falling back to defaults for absent keys.
    pub fn from_kdl(source: &str) -> ConfigResult<Self> {
        let document: KdlDocument = source.parse()?;
        let mut config = Config::default();

        for node in document.nodes() {
            match node.name().value() {
                "fps" => {
                    let fps = int_arg(node)?;
                    config.fps = u32::try_from(fps).map_err(|_| ConfigError::InvalidValue {
                        key: "fps".to_string(),
                        expected: "a non-negative 32-bit integer",
                    })?;
                }
                "background" => config.background = color_arg(node)?,
                "redacted" => config.redacted = bool_arg(node)?,
                "shimmer" => config.shimmer = ShimmerConfig::from_kdl(node)?,
                "mask" => config.mask = MaskStyle::from_kdl(node)?,
                other => log::warn!("Ignoring unknown config node '{}'", other),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Read and parse a KDL config file.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let source = fs::read_to_string(path)?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_kdl(&source)
    }

    /// Shimmer durations are not checked; a non-positive duration leaves the
    /// effect at rest.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(())
    }
}

fn children(node: &KdlNode) -> impl Iterator<Item = &KdlNode> {
    node.children()
        .map(|doc| doc.nodes())
        .unwrap_or_default()
        .iter()
}

fn first_arg(node: &KdlNode) -> ConfigResult<&KdlValue> {
    node.entries()
        .iter()
        .find(|entry| entry.name().is_none())
        .map(|entry| entry.value())
        .ok_or_else(|| ConfigError::MissingValue(node.name().value().to_string()))
}

fn invalid(node: &KdlNode, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key: node.name().value().to_string(),
        expected,
    }
}

fn bool_arg(node: &KdlNode) -> ConfigResult<bool> {
    first_arg(node)?
        .as_bool()
        .ok_or_else(|| invalid(node, "a boolean"))
}

fn int_arg(node: &KdlNode) -> ConfigResult<i64> {
    first_arg(node)?
        .as_i64()
        .ok_or_else(|| invalid(node, "an integer"))
}

fn float_arg(node: &KdlNode) -> ConfigResult<f64> {
    let value = first_arg(node)?;
    value
        .as_f64()
        .or_else(|| value.as_i64().map(|v| v as f64))
        .ok_or_else(|| invalid(node, "a number"))
}

fn color_arg(node: &KdlNode) -> ConfigResult<Rgba> {
    let value = first_arg(node)?
        .as_string()
        .ok_or_else(|| invalid(node, "a \"#rrggbb\" string"))?;
    Ok(value.parse()?)
}
