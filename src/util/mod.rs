//! Utility modules for multibar.

mod value_format;

pub use value_format::format_value;
