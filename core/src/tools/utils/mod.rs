//! Helpers shared by the tool result renderers

pub mod text;

pub use text::{format_timestamp, preview, strip_markup, title_case, truncate_with_ellipsis};
