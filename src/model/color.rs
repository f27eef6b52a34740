//! Value-to-color resolution policies.

use tracing::warn;

use super::ModelError;
use crate::config::{ColoringType, PanelConfig};

/// Resolves a display color for one series item.
///
/// Pure function of its arguments. Returns `None` when no concrete color
/// applies and the renderer should fall back to its default palette; the
/// `auto` policy returns the literal `"auto"` sentinel, which renderers
/// treat the same way.
pub fn resolve_color(
    value: f64,
    name: &str,
    config: &PanelConfig,
) -> Result<Option<String>, ModelError> {
    match config.coloring_type {
        ColoringType::Auto => Ok(Some("auto".to_string())),
        ColoringType::Thresholds => resolve_thresholds(value, config),
        ColoringType::KeyMapping => Ok(Some(resolve_key_mapping(name, config))),
    }
}

/// Top-down threshold scan.
///
/// A match on the threshold at index `i - 1` yields the color at index `i`,
/// one above it; a match at the top index therefore reads one past the
/// palette and resolves to `None`. Deployed panel configs rely on this
/// exact mapping, so it is reproduced rather than realigned. A value below
/// every threshold falls back to the first palette entry.
fn resolve_thresholds(value: f64, config: &PanelConfig) -> Result<Option<String>, ModelError> {
    let thresholds = &config.thresholds;
    let colors = &config.colors;
    if colors.len() != thresholds.len() {
        return Err(ModelError::PaletteLengthMismatch {
            colors: colors.len(),
            thresholds: thresholds.len(),
        });
    }

    for i in (1..=thresholds.len()).rev() {
        if value >= thresholds[i - 1] {
            let color = colors.get(i).cloned();
            if color.is_none() {
                warn!(value, "value at or above top threshold, no palette entry one past it");
            }
            return Ok(color);
        }
    }
    Ok(colors.first().cloned())
}

/// First mapping whose key equals the series name wins; otherwise the
/// configured default color.
fn resolve_key_mapping(name: &str, config: &PanelConfig) -> String {
    config
        .color_key_mappings
        .iter()
        .find(|mapping| mapping.key == name)
        .map(|mapping| mapping.color.clone())
        .unwrap_or_else(|| config.colors_key_mapping_default.clone())
}
