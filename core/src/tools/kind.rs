//! Tool result classification

use serde_json::{Map, Value};
use std::fmt;

/// Domain a tool result belongs to, used to pick a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Calendar,
    Email,
    Drive,
    Generic,
}

impl ToolKind {
    /// Classify a result.
    ///
    /// A non-empty tool name wins; otherwise well-known payload keys are
    /// probed. Anything unrecognised is [`ToolKind::Generic`].
    pub fn classify(tool_name: Option<&str>, data: Option<&Map<String, Value>>) -> Self {
        if let Some(name) = tool_name.filter(|name| !name.is_empty()) {
            return Self::from_tool_name(name);
        }

        match data {
            Some(data) if !data.is_empty() => Self::from_data(data),
            _ => ToolKind::Generic,
        }
    }

    /// Classify by case-insensitive substring match on the tool name
    pub fn from_tool_name(tool_name: &str) -> Self {
        let name = tool_name.to_lowercase();

        if name.contains("calendar") {
            ToolKind::Calendar
        } else if name.contains("mail") || name.contains("email") {
            ToolKind::Email
        } else if name.contains("drive") || name.contains("file") {
            ToolKind::Drive
        } else {
            ToolKind::Generic
        }
    }

    /// Classify by probing the payload keys
    pub fn from_data(data: &Map<String, Value>) -> Self {
        if data.contains_key("events") {
            ToolKind::Calendar
        } else if data.contains_key("messages") {
            ToolKind::Email
        } else if data.contains_key("files") {
            ToolKind::Drive
        } else {
            ToolKind::Generic
        }
    }

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Calendar => "calendar",
            ToolKind::Email => "email",
            ToolKind::Drive => "drive",
            ToolKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
