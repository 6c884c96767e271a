//! Tool results, classification and formatting

pub mod base;
pub mod kind;
pub mod output_formatter;
pub mod utils;

pub use base::ToolResult;
pub use kind::ToolKind;
pub use output_formatter::ResponseFormatter;
