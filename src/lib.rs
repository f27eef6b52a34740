//! multibar - derived presentation state for a multi-segment progress panel.
//!
//! The host dashboard hands this library a panel-options document and a set
//! of named numeric series; it derives everything the rendering layer needs
//! to draw the panel: per-segment colors, percentage widths, aggregate
//! totals, the formatted total string, and title layout offsets.
//!
//! Rendering, data polling, and persistence stay on the host side.

pub mod config;
pub mod model;
pub mod util;
