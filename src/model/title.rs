//! Title layout presets.

use serde::Serialize;

use crate::config::TitleViewType;

/// Fixed layout offsets for positioning the title and value relative to
/// the bar. Serialized with the host's camelCase keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleParams {
    pub bar_height: i32,
    pub title_top_margin: i32,
    pub value_top_margin: i32,
}

impl TitleParams {
    /// Returns the layout preset for a title view type.
    pub fn for_view_type(view_type: TitleViewType) -> Self {
        match view_type {
            TitleViewType::SeparateTitleLine => Self {
                bar_height: 8,
                title_top_margin: 0,
                value_top_margin: -12,
            },
            TitleViewType::Inline => Self {
                bar_height: 20,
                title_top_margin: -20,
                value_top_margin: -18,
            },
        }
    }
}
