//! Typed panel configuration.
//!
//! The host serializes panel options as a loosely-typed JSON document with
//! camelCase keys. Everything is validated here, once, at the boundary;
//! the rest of the crate works with the typed [`PanelConfig`] and never
//! re-checks value shapes.

use serde::Deserialize;
use tracing::debug;

/// Error type for panel configuration parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The options document is not valid JSON or a field has the wrong type.
    Json(String),
    /// Unrecognized `coloringType` value.
    UnknownColoringType(String),
    /// Unrecognized `titleViewType` value.
    InvalidTitleViewType(String),
    /// A `thresholds` element that does not parse as a number.
    InvalidThreshold { raw: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(msg) => write!(f, "Bad panel options document: {}", msg),
            ConfigError::UnknownColoringType(value) => {
                write!(f, "Unknown color type {}", value)
            }
            ConfigError::InvalidTitleViewType(value) => {
                write!(f, "Wrong titleType: {}", value)
            }
            ConfigError::InvalidThreshold { raw } => {
                write!(f, "Threshold '{}' is not a number", raw)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Coloring policy selector. The three policies are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoringType {
    /// Defer to the renderer's default palette (the `"auto"` sentinel).
    Auto,
    /// Numeric breakpoints mapped to a parallel color list.
    Thresholds,
    /// Fixed color per series name, with a configured fallback.
    KeyMapping,
}

impl ColoringType {
    /// Parses the raw `coloringType` string.
    ///
    /// The recognized spellings are the host's exact values: `auto`,
    /// `thresholds`, `key mapping`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw {
            "auto" => Ok(Self::Auto),
            "thresholds" => Ok(Self::Thresholds),
            "key mapping" => Ok(Self::KeyMapping),
            other => Err(ConfigError::UnknownColoringType(other.to_string())),
        }
    }
}

/// Title layout selector, see [`crate::model::TitleParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleViewType {
    /// Title on its own line above the bar.
    SeparateTitleLine,
    /// Title inline with the bar.
    Inline,
}

impl TitleViewType {
    /// Parses the raw `titleViewType` string.
    ///
    /// Host documents carry either the spaced spelling
    /// (`separate title line`) or the enum-constant spelling
    /// (`SEPARATE_TITLE_LINE`), so matching is case-insensitive and `_`/`-`
    /// are treated as spaces.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.to_lowercase().replace(['_', '-'], " ").as_str() {
            "separate title line" => Ok(Self::SeparateTitleLine),
            "inline" => Ok(Self::Inline),
            _ => Err(ConfigError::InvalidTitleViewType(raw.to_string())),
        }
    }
}

/// One `colorKeyMappings` entry: a series name bound to a fixed color.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorKeyMapping {
    pub key: String,
    pub color: String,
}

/// Validated panel options.
///
/// Construct via [`PanelConfig::from_json`] for host documents, or fill the
/// fields directly when the host assembles options programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Prepended to the formatted total.
    pub prefix: String,
    /// Appended to the formatted total.
    pub postfix: String,
    /// Fractional digits in the formatted total.
    pub decimals: u32,
    pub title_view_type: TitleViewType,
    /// Passed through to the renderer untouched.
    pub opacity: String,
    pub coloring_type: ColoringType,
    /// Breakpoints for the `thresholds` policy, parsed from the raw
    /// comma-separated string. Order is taken as given, not sorted.
    pub thresholds: Vec<f64>,
    /// Palette for the `thresholds` policy; must match `thresholds` in
    /// length (checked during color resolution).
    pub colors: Vec<String>,
    /// Mappings for the `key mapping` policy, scanned in order.
    pub color_key_mappings: Vec<ColorKeyMapping>,
    /// Fallback color when no mapping matches a series name.
    pub colors_key_mapping_default: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            postfix: String::new(),
            decimals: 2,
            title_view_type: TitleViewType::SeparateTitleLine,
            opacity: "1".to_string(),
            coloring_type: ColoringType::Auto,
            thresholds: Vec::new(),
            colors: Vec::new(),
            color_key_mappings: Vec::new(),
            colors_key_mapping_default: String::new(),
        }
    }
}

/// The options document as the host serializes it: camelCase keys,
/// enum selectors still strings, thresholds still one comma-separated
/// string. Absent fields take the panel defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPanelConfig {
    prefix: String,
    postfix: String,
    decimals: u32,
    title_view_type: String,
    opacity: String,
    coloring_type: String,
    thresholds: String,
    colors: Vec<String>,
    color_key_mappings: Vec<ColorKeyMapping>,
    colors_key_mapping_default: String,
}

impl Default for RawPanelConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            postfix: String::new(),
            decimals: 2,
            title_view_type: "separate title line".to_string(),
            opacity: "1".to_string(),
            coloring_type: "auto".to_string(),
            thresholds: String::new(),
            colors: Vec::new(),
            color_key_mappings: Vec::new(),
            colors_key_mapping_default: String::new(),
        }
    }
}

impl PanelConfig {
    /// Parses and validates a raw panel-options JSON document.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let raw: RawPanelConfig =
            serde_json::from_str(document).map_err(|e| ConfigError::Json(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawPanelConfig) -> Result<Self, ConfigError> {
        let coloring_type = ColoringType::parse(&raw.coloring_type)?;
        let title_view_type = TitleViewType::parse(&raw.title_view_type)?;
        let thresholds = parse_thresholds(&raw.thresholds)?;

        debug!(
            coloring = ?coloring_type,
            thresholds = thresholds.len(),
            colors = raw.colors.len(),
            mappings = raw.color_key_mappings.len(),
            "panel config validated"
        );

        Ok(Self {
            prefix: raw.prefix,
            postfix: raw.postfix,
            decimals: raw.decimals,
            title_view_type,
            opacity: raw.opacity,
            coloring_type,
            thresholds,
            colors: raw.colors,
            color_key_mappings: raw.color_key_mappings,
            colors_key_mapping_default: raw.colors_key_mapping_default,
        })
    }
}

/// Parses the comma-separated `thresholds` string into breakpoints.
///
/// An empty or blank string yields no breakpoints; whitespace around
/// elements is tolerated.
pub fn parse_thresholds(raw: &str) -> Result<Vec<f64>, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| ConfigError::InvalidThreshold {
                    raw: part.to_string(),
                })
        })
        .collect()
}
