//! Progress panel model.
//!
//! [`ProgressModel`] is the derived presentation state for one render
//! cycle: built fresh from the current series values and panel config,
//! read by the rendering layer, then discarded when the next cycle
//! constructs its replacement. It does not react to config changes after
//! construction; build a new model instead.

mod color;
mod title;

pub use color::resolve_color;
pub use title::TitleParams;

use serde::{Deserialize, Serialize};

use crate::config::PanelConfig;
use crate::util::format_value;

/// Error type for model construction and color resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// `names` and `values` differ in length at construction.
    SeriesLengthMismatch { names: usize, values: usize },
    /// `colors` and `thresholds` differ in length in the panel config.
    PaletteLengthMismatch { colors: usize, thresholds: usize },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::SeriesLengthMismatch { names, values } => write!(
                f,
                "names amount should be equal to values amount: {} names, {} values",
                names, values
            ),
            ModelError::PaletteLengthMismatch { colors, thresholds } => write!(
                f,
                "Bad colors/thresholds config: {} colors, {} thresholds",
                colors, thresholds
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// One series item with its resolved display color.
///
/// `color` is `None` when no concrete color applies and the renderer's
/// default palette takes over; the `auto` policy yields the literal
/// `Some("auto")` sentinel, which renderers treat the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Headroom factor applied to the percent-width base. Segment widths must
/// never sum to the full row (wraparound in the renderer starts above 98%).
const WIDTH_HEADROOM: f64 = 1.1;

/// Derived presentation state for a multi-segment progress indicator.
///
/// Owns an ordered list of (name, value) series items, a caller-supplied
/// maximum for aggregate progress (not validated against the data), and
/// its own copy of the panel config. Bars are resolved once at
/// construction; all other derived figures are pure functions of the
/// stored fields.
#[derive(Debug, Clone)]
pub struct ProgressModel {
    config: PanelConfig,
    title: String,
    names: Vec<String>,
    values: Vec<f64>,
    max_value: f64,
    bars: Vec<Bar>,
    active: bool,
}

impl ProgressModel {
    /// Builds the model, resolving one color per series item in input
    /// order.
    ///
    /// Fails with [`ModelError::SeriesLengthMismatch`] when `names` and
    /// `values` differ in length, and propagates
    /// [`ModelError::PaletteLengthMismatch`] from color resolution.
    pub fn new(
        config: PanelConfig,
        title: impl Into<String>,
        names: Vec<String>,
        values: Vec<f64>,
        max_value: f64,
    ) -> Result<Self, ModelError> {
        if names.len() != values.len() {
            return Err(ModelError::SeriesLengthMismatch {
                names: names.len(),
                values: values.len(),
            });
        }

        let mut bars = Vec::with_capacity(names.len());
        for (name, &value) in names.iter().zip(values.iter()) {
            bars.push(Bar {
                name: name.clone(),
                value,
                color: resolve_color(value, name, &config)?,
            });
        }

        Ok(Self {
            config,
            title: title.into(),
            names,
            values,
            max_value,
            bars,
            active: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Alias for [`names`](Self::names), for hosts that bind the series
    /// identifiers under their legacy name.
    pub fn keys(&self) -> &[String] {
        self.names()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Series items with their resolved colors, in input order.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Lifecycle marker toggled by the host; not derived from anything.
    pub fn active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Exact sum over all tracked values.
    pub fn sum_of_values(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Per-item display widths as floored percentages of the inflated sum.
    ///
    /// A zero sum divides by zero: `0/0` floors to `NaN`, anything else to
    /// `±inf`, per IEEE-754. Callers with empty or all-zero series get
    /// those values back unguarded.
    pub fn percent_values(&self) -> Vec<f64> {
        let base = self.sum_of_values() * WIDTH_HEADROOM;
        self.values
            .iter()
            .map(|value| (value / base * 100.0).floor())
            .collect()
    }

    /// Sum of values as a percentage of the configured maximum.
    ///
    /// Not clamped to [0, 100]: inputs above the maximum or negative
    /// inputs show through.
    pub fn aggregated_progress(&self) -> f64 {
        self.sum_of_values() / self.max_value * 100.0
    }

    /// The sum rendered with the configured prefix, postfix, and decimals.
    pub fn formatted_value(&self) -> String {
        format_value(
            self.sum_of_values(),
            &self.config.prefix,
            &self.config.postfix,
            self.config.decimals,
        )
    }

    /// Layout offsets for the configured title view type.
    pub fn title_params(&self) -> TitleParams {
        TitleParams::for_view_type(self.config.title_view_type)
    }

    /// Renderer opacity, passed through from the config untouched.
    pub fn opacity(&self) -> &str {
        &self.config.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColoringType, PanelConfig, TitleViewType};

    fn series(items: &[(&str, f64)]) -> (Vec<String>, Vec<f64>) {
        (
            items.iter().map(|(n, _)| n.to_string()).collect(),
            items.iter().map(|(_, v)| *v).collect(),
        )
    }

    #[test]
    fn test_construction_preserves_order() {
        let (names, values) = series(&[("cpu", 10.0), ("mem", 20.0), ("dsk", 30.0)]);
        let model =
            ProgressModel::new(PanelConfig::default(), "Load", names, values, 100.0).unwrap();

        assert_eq!(model.bars().len(), 3);
        let bar_names: Vec<&str> = model.bars().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(bar_names, vec!["cpu", "mem", "dsk"]);
        assert_eq!(model.title(), "Load");
        assert_eq!(model.values(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_keys_aliases_names() {
        let (names, values) = series(&[("cpu", 10.0), ("mem", 20.0)]);
        let model =
            ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();
        assert_eq!(model.keys(), model.names());
        assert_eq!(model.keys(), &["cpu".to_string(), "mem".to_string()]);
    }

    #[test]
    fn test_length_mismatch_fails() {
        let err = ProgressModel::new(
            PanelConfig::default(),
            "Load",
            vec!["cpu".to_string(), "mem".to_string()],
            vec![10.0],
            100.0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::SeriesLengthMismatch {
                names: 2,
                values: 1
            }
        );
    }

    #[test]
    fn test_empty_series_constructs() {
        let model =
            ProgressModel::new(PanelConfig::default(), "", vec![], vec![], 100.0).unwrap();
        assert!(model.bars().is_empty());
        assert_eq!(model.sum_of_values(), 0.0);
    }

    #[test]
    fn test_auto_coloring_on_every_bar() {
        let (names, values) = series(&[("a", -1.0), ("b", 0.0), ("c", 1e9)]);
        let model =
            ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();
        for bar in model.bars() {
            assert_eq!(bar.color.as_deref(), Some("auto"));
        }
    }

    #[test]
    fn test_palette_mismatch_surfaces_at_construction() {
        let config = PanelConfig {
            coloring_type: ColoringType::Thresholds,
            thresholds: vec![0.0, 10.0],
            colors: vec!["red".to_string()],
            ..Default::default()
        };
        let err = ProgressModel::new(config, "t", vec!["a".to_string()], vec![5.0], 100.0)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::PaletteLengthMismatch {
                colors: 1,
                thresholds: 2
            }
        );
    }

    #[test]
    fn test_sum_of_values() {
        let (names, values) = series(&[("a", 10.0), ("b", 20.0), ("c", 30.0)]);
        let model = ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();
        assert_eq!(model.sum_of_values(), 60.0);
    }

    #[test]
    fn test_percent_values_headroom() {
        // sum = 60, inflated base = 66: floor(10/66*100) etc.
        let (names, values) = series(&[("a", 10.0), ("b", 20.0), ("c", 30.0)]);
        let model = ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();
        assert_eq!(model.percent_values(), vec![15.0, 30.0, 45.0]);
    }

    #[test]
    fn test_percent_values_never_fill_the_row() {
        let (names, values) = series(&[("a", 50.0), ("b", 50.0)]);
        let model = ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();
        let total: f64 = model.percent_values().iter().sum();
        assert!(total < 100.0, "inflated base must keep total under 100%");
    }

    #[test]
    fn test_percent_values_zero_sum_is_nan() {
        let (names, values) = series(&[("a", 0.0), ("b", 0.0)]);
        let model = ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();
        // 0/0 per IEEE-754; documented, not guarded.
        assert!(model.percent_values().iter().all(|p| p.is_nan()));
    }

    #[test]
    fn test_aggregated_progress() {
        let (names, values) = series(&[("a", 10.0), ("b", 20.0), ("c", 30.0)]);
        let model = ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();
        assert_eq!(model.aggregated_progress(), 60.0);
    }

    #[test]
    fn test_aggregated_progress_is_not_clamped() {
        let (names, values) = series(&[("a", 150.0)]);
        let model =
            ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();
        assert_eq!(model.aggregated_progress(), 150.0);

        let (names, values) = series(&[("a", -50.0)]);
        let model =
            ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();
        assert_eq!(model.aggregated_progress(), -50.0);
    }

    #[test]
    fn test_formatted_value_uses_config() {
        let config = PanelConfig {
            prefix: "$".to_string(),
            postfix: " total".to_string(),
            decimals: 1,
            ..Default::default()
        };
        let (names, values) = series(&[("a", 10.0), ("b", 20.0)]);
        let model = ProgressModel::new(config, "t", names, values, 100.0).unwrap();
        assert_eq!(model.formatted_value(), "$30.0 total");
    }

    #[test]
    fn test_title_params_from_config() {
        let config = PanelConfig {
            title_view_type: TitleViewType::Inline,
            ..Default::default()
        };
        let model = ProgressModel::new(config, "t", vec![], vec![], 100.0).unwrap();
        assert_eq!(
            model.title_params(),
            TitleParams {
                bar_height: 20,
                title_top_margin: -20,
                value_top_margin: -18
            }
        );
    }

    #[test]
    fn test_active_flag() {
        let mut model =
            ProgressModel::new(PanelConfig::default(), "t", vec![], vec![], 100.0).unwrap();
        assert!(!model.active());
        model.set_active(true);
        assert!(model.active());
    }

    #[test]
    fn test_getters_are_idempotent() {
        let (names, values) = series(&[("a", 10.0), ("b", 20.0), ("c", 30.0)]);
        let model = ProgressModel::new(PanelConfig::default(), "t", names, values, 100.0).unwrap();

        assert_eq!(model.percent_values(), model.percent_values());
        assert_eq!(model.sum_of_values(), model.sum_of_values());
        assert_eq!(model.aggregated_progress(), model.aggregated_progress());
        assert_eq!(model.formatted_value(), model.formatted_value());
        assert_eq!(model.bars(), model.bars());
    }

    #[test]
    fn test_opacity_passthrough() {
        let config = PanelConfig {
            opacity: "0.8".to_string(),
            ..Default::default()
        };
        let model = ProgressModel::new(config, "t", vec![], vec![], 100.0).unwrap();
        assert_eq!(model.opacity(), "0.8");
    }

    #[test]
    fn test_from_raw_document_to_bars() {
        let doc = r#"{
            "coloringType": "thresholds",
            "thresholds": "0,10,20",
            "colors": ["red", "yellow", "green"],
            "decimals": 0,
            "postfix": "%"
        }"#;
        let config = PanelConfig::from_json(doc).unwrap();
        let (names, values) = series(&[("low", -5.0), ("mid", 15.0), ("high", 25.0)]);
        let model = ProgressModel::new(config, "Load", names, values, 100.0).unwrap();

        let colors: Vec<Option<&str>> =
            model.bars().iter().map(|b| b.color.as_deref()).collect();
        assert_eq!(colors, vec![Some("red"), Some("green"), None]);
        assert_eq!(model.formatted_value(), "35%");
    }

    #[test]
    fn test_bar_serialization_omits_absent_color() {
        let bar = Bar {
            name: "cpu".to_string(),
            value: 25.0,
            color: None,
        };
        let json = serde_json::to_string(&bar).unwrap();
        assert!(
            !json.contains("color"),
            "absent color should not appear in serialized bar: {}",
            json
        );
    }
}
