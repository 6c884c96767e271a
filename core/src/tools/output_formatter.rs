//! Output formatter for tool results
//!
//! Classifies a [`ToolResult`] with [`ToolKind`] and renders a human-readable
//! report with the matching renderer. Renderers never fail: a missing or
//! mistyped optional field is left out of the report.

use super::base::ToolResult;
use super::kind::ToolKind;
use super::utils::{format_timestamp, preview, strip_markup, title_case, truncate_with_ellipsis};
use serde_json::{Map, Value};

/// Maximum characters of an event description
pub const DESCRIPTION_LIMIT: usize = 100;
/// Characters of an email snippet shown as preview
pub const SNIPPET_LIMIT: usize = 100;
/// Maximum characters of a scalar value in the generic report
pub const VALUE_LIMIT: usize = 50;
/// Number of keys listed individually in the generic report
pub const GENERIC_KEY_LIMIT: usize = 5;

const DEFAULT_TITLE: &str = "No title";
const DEFAULT_ID: &str = "N/A";
const DEFAULT_FILE_NAME: &str = "Unknown";
const DEFAULT_STATUS: &str = "unknown";

/// Formatter for tool execution results
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Create a new formatter instance
    pub fn new() -> Self {
        Self
    }

    /// Render `result` as a report.
    ///
    /// Returns the composed text (lines separated by `\n`, no trailing newline)
    /// instead of printing it; callers decide where it goes.
    pub fn format(&self, result: &ToolResult, tool_name: Option<&str>) -> String {
        let kind = ToolKind::classify(tool_name, result.payload());
        self.format_as(kind, result)
    }

    /// Render `result` with the renderer for `kind`
    pub fn format_as(&self, kind: ToolKind, result: &ToolResult) -> String {
        let empty = Map::new();
        let data = result.data.as_ref().unwrap_or(&empty);

        let lines = match kind {
            ToolKind::Calendar => self.format_calendar(data),
            ToolKind::Email => self.format_email(data),
            ToolKind::Drive => self.format_drive(data),
            ToolKind::Generic => self.format_generic(data, result.execution_id.as_deref()),
        };

        lines.join("\n")
    }

    /// Render calendar events
    fn format_calendar(&self, data: &Map<String, Value>) -> Vec<String> {
        let events = items(data, "events");
        let mut lines = vec![format!("📅 Found {} event(s)", events.len())];

        if let Some(calendar_id) = str_field(data, "calendar_id") {
            lines.push(format!("📆 Calendar: {}", calendar_id));
        }

        for (index, event) in events.iter().enumerate() {
            let event = as_object(event);
            let title = str_field(event, "summary").unwrap_or(DEFAULT_TITLE);
            lines.push(format!("  {}. {}", index + 1, title));

            if let Some(start) = event_time(event, "start") {
                lines.push(format!("     🕐 Start: {}", start));
            }
            if let Some(end) = event_time(event, "end") {
                lines.push(format!("     🕑 End: {}", end));
            }

            if let Some(email) = event
                .get("organizer")
                .and_then(Value::as_object)
                .and_then(|organizer| str_field(organizer, "email"))
            {
                lines.push(format!("     👤 Organizer: {}", email));
            }

            if let Some(description) = str_field(event, "description") {
                let cleaned = strip_markup(description);
                lines.push(format!(
                    "     📝 Description: {}",
                    truncate_with_ellipsis(&cleaned, DESCRIPTION_LIMIT)
                ));
            }

            if let Some(attendees) = event.get("attendees").and_then(Value::as_array) {
                lines.push(format!("     👥 Attendees: {}", attendees.len()));
            }

            let status = str_field(event, "status").unwrap_or(DEFAULT_STATUS);
            let marker = if status == "confirmed" { "✅" } else { "❓" };
            lines.push(format!("     {} Status: {}", marker, title_case(status)));
        }

        if let Some(token) = str_field(data, "next_page_token") {
            lines.push(format!("📄 More events available (next page token: {})", token));
        }

        lines
    }

    /// Render email messages
    fn format_email(&self, data: &Map<String, Value>) -> Vec<String> {
        let messages = items(data, "messages");
        let mut lines = vec![format!("📧 Found {} message(s)", messages.len())];

        for (index, message) in messages.iter().enumerate() {
            let message = as_object(message);
            let id = str_field(message, "id").unwrap_or(DEFAULT_ID);
            lines.push(format!("  {}. ID: {}", index + 1, id));

            if let Some(snippet) = str_field(message, "snippet") {
                lines.push(format!("     Preview: {}", preview(snippet, SNIPPET_LIMIT)));
            }
            if let Some(subject) = str_field(message, "subject") {
                lines.push(format!("     Subject: {}", subject));
            }
        }

        lines
    }

    /// Render drive files
    fn format_drive(&self, data: &Map<String, Value>) -> Vec<String> {
        let files = items(data, "files");
        let mut lines = vec![format!("📁 Found {} file(s)", files.len())];

        for (index, file) in files.iter().enumerate() {
            let file = as_object(file);
            let name = str_field(file, "name").unwrap_or(DEFAULT_FILE_NAME);
            let id = str_field(file, "id").unwrap_or(DEFAULT_ID);
            lines.push(format!("  {}. {}", index + 1, name));
            lines.push(format!("     ID: {}", id));

            if let Some(mime_type) =
                str_field(file, "mimeType").or_else(|| str_field(file, "mime_type"))
            {
                lines.push(format!("     Type: {}", mime_type));
            }
        }

        lines
    }

    /// Render any other payload as a field summary
    fn format_generic(&self, data: &Map<String, Value>, execution_id: Option<&str>) -> Vec<String> {
        let mut lines = vec![format!("📊 Result contains {} field(s)", data.len())];

        for (key, value) in data.iter().take(GENERIC_KEY_LIMIT) {
            let summary = match value {
                Value::Array(items) => format!("{} item(s)", items.len()),
                Value::Object(fields) => format!("{} field(s)", fields.len()),
                Value::String(text) => truncate_with_ellipsis(text, VALUE_LIMIT),
                other => truncate_with_ellipsis(&other.to_string(), VALUE_LIMIT),
            };
            lines.push(format!("  • {}: {}", key, summary));
        }

        if data.len() > GENERIC_KEY_LIMIT {
            lines.push(format!(
                "  ... and {} more field(s)",
                data.len() - GENERIC_KEY_LIMIT
            ));
        }

        if let Some(execution_id) = execution_id {
            lines.push(format!("🔖 Execution ID: {}", execution_id));
        }

        lines
    }
}

/// Sequence stored under `key`, or nothing when absent or not a sequence
fn items<'a>(data: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// View a sequence entry as a mapping; non-mappings have no fields
fn as_object(value: &Value) -> &Map<String, Value> {
    static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
    value
        .as_object()
        .unwrap_or_else(|| EMPTY.get_or_init(Map::new))
}

fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// Start or end time of an event.
///
/// Accepts a bare timestamp string or an object carrying `dateTime` or `date`.
fn event_time(event: &Map<String, Value>, key: &str) -> Option<String> {
    let raw = match event.get(key)? {
        Value::String(raw) => raw.as_str(),
        Value::Object(time) => str_field(time, "dateTime").or_else(|| str_field(time, "date"))?,
        _ => return None,
    };
    format_timestamp(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(data: Value) -> ToolResult {
        ToolResult::from_value(data)
    }

    fn render(data: Value, tool_name: Option<&str>) -> String {
        ResponseFormatter::new().format(&result(data), tool_name)
    }

    #[test]
    fn test_calendar_full_event() {
        let output = render(
            json!({
                "calendar_id": "primary",
                "events": [{
                    "summary": "Team sync",
                    "start": {"dateTime": "2024-01-15T10:00:00Z"},
                    "end": "2024-01-15T11:00:00+00:00",
                    "organizer": {"email": "lead@example.com"},
                    "description": "Weekly<br>sync",
                    "attendees": [{"email": "a@example.com"}, {"email": "b@example.com"}],
                    "status": "confirmed"
                }],
                "next_page_token": "tok_2"
            }),
            Some("googlecalendar_list_events"),
        );

        let expected = [
            "📅 Found 1 event(s)",
            "📆 Calendar: primary",
            "  1. Team sync",
            "     🕐 Start: 2024-01-15 10:00 +00:00",
            "     🕑 End: 2024-01-15 11:00 +00:00",
            "     👤 Organizer: lead@example.com",
            "     📝 Description: Weeklysync",
            "     👥 Attendees: 2",
            "     ✅ Status: Confirmed",
            "📄 More events available (next page token: tok_2)",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_calendar_defaults_and_missing_fields() {
        let output = render(json!({"events": [{}]}), None);
        assert_eq!(
            output,
            "📅 Found 1 event(s)\n  1. No title\n     ❓ Status: Unknown"
        );
    }

    #[test]
    fn test_calendar_non_confirmed_status() {
        let output = render(json!({"events": [{"status": "tentative"}]}), None);
        assert!(output.contains("❓ Status: Tentative"));
        assert!(!output.contains("✅"));
    }

    #[test]
    fn test_calendar_description_truncated_to_103() {
        let description = "d".repeat(150);
        let output = render(json!({"events": [{"description": description}]}), None);
        let line = output
            .lines()
            .find(|line| line.contains("Description:"))
            .unwrap();
        let rendered = line.split("Description: ").nth(1).unwrap();
        assert_eq!(rendered.chars().count(), 103);
        assert!(rendered.ends_with("..."));
    }

    #[test]
    fn test_calendar_description_at_limit_untouched() {
        let description = "d".repeat(100);
        let output = render(json!({"events": [{"description": description.clone()}]}), None);
        assert!(output.contains(&format!("Description: {}\n", description)));
    }

    #[test]
    fn test_calendar_unparsable_time_is_omitted() {
        let output = render(
            json!({"events": [{"summary": "x", "start": "not-a-date", "end": {"date": "2024-01-16"}}]}),
            None,
        );
        assert!(!output.contains("Start:"));
        assert!(output.contains("🕑 End: 2024-01-16 (all day)"));
    }

    #[test]
    fn test_calendar_local_time_without_offset() {
        let output = render(
            json!({"events": [{"start": {"dateTime": "2024-01-15T10:00:00"}}]}),
            None,
        );
        assert!(output.contains("🕐 Start: 2024-01-15 10:00\n"));
    }

    #[test]
    fn test_calendar_ignores_non_object_events() {
        let output = render(json!({"events": ["oops", 42]}), None);
        assert!(output.starts_with("📅 Found 2 event(s)"));
        assert_eq!(output.matches("No title").count(), 2);
    }

    #[test]
    fn test_email_messages() {
        let snippet = "s".repeat(130);
        let output = render(
            json!({"messages": [
                {"id": "m1", "snippet": "Lunch tomorrow?", "subject": "Lunch"},
                {"snippet": snippet},
            ]}),
            Some("gmail_fetch_mails"),
        );

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "📧 Found 2 message(s)");
        assert_eq!(lines[1], "  1. ID: m1");
        assert_eq!(lines[2], "     Preview: Lunch tomorrow?...");
        assert_eq!(lines[3], "     Subject: Lunch");
        assert_eq!(lines[4], "  2. ID: N/A");
        assert_eq!(lines[5], format!("     Preview: {}...", "s".repeat(100)));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_email_without_snippet_has_no_preview() {
        let output = render(json!({"messages": [{"id": "m1"}]}), None);
        assert!(!output.contains("Preview:"));
        assert!(output.contains("ID: m1"));
    }

    #[test]
    fn test_drive_files() {
        let output = render(
            json!({"files": [
                {"name": "report.pdf", "id": "f1", "mimeType": "application/pdf"},
                {"mime_type": "text/plain"},
                {}
            ]}),
            None,
        );

        let expected = [
            "📁 Found 3 file(s)",
            "  1. report.pdf",
            "     ID: f1",
            "     Type: application/pdf",
            "  2. Unknown",
            "     ID: N/A",
            "     Type: text/plain",
            "  3. Unknown",
            "     ID: N/A",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_generic_lists_five_keys() {
        let output = render(
            json!({
                "a": [1, 2, 3],
                "b": {"x": 1, "y": 2},
                "c": "short",
                "d": 42,
                "e": true,
                "f": "hidden",
                "g": null
            }),
            Some("slack_send_message"),
        );

        let expected = [
            "📊 Result contains 7 field(s)",
            "  • a: 3 item(s)",
            "  • b: 2 field(s)",
            "  • c: short",
            "  • d: 42",
            "  • e: true",
            "  ... and 2 more field(s)",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_generic_truncates_long_values() {
        let output = render(json!({"text": "v".repeat(80)}), None);
        assert!(output.contains(&format!("  • text: {}...", "v".repeat(50))));

        let exact = render(json!({"text": "v".repeat(50)}), None);
        assert!(exact.ends_with(&format!("  • text: {}", "v".repeat(50))));
    }

    #[test]
    fn test_generic_execution_id() {
        let result = result(json!({"ok": true})).with_execution_id("exec_42");
        let output = ResponseFormatter::new().format(&result, None);
        assert!(output.ends_with("🔖 Execution ID: exec_42"));
    }

    #[test]
    fn test_empty_data_for_every_renderer() {
        let formatter = ResponseFormatter::new();
        for result in [ToolResult::empty(), ToolResult::with_data(Map::new())] {
            assert_eq!(
                formatter.format(&result, Some("googlecalendar_list_events")),
                "📅 Found 0 event(s)"
            );
            assert_eq!(
                formatter.format(&result, Some("gmail_fetch_mails")),
                "📧 Found 0 message(s)"
            );
            assert_eq!(
                formatter.format(&result, Some("googledrive_list_files")),
                "📁 Found 0 file(s)"
            );
            assert_eq!(formatter.format(&result, None), "📊 Result contains 0 field(s)");
        }
    }

    #[test]
    fn test_format_does_not_mutate_input() {
        let original = result(json!({"events": [{"summary": "x", "description": "<br>y"}]}));
        let copy = original.clone();
        let _ = ResponseFormatter::new().format(&original, None);
        assert_eq!(original, copy);
    }

    #[test]
    fn test_format_as_overrides_classification() {
        let output = ResponseFormatter::new()
            .format_as(ToolKind::Generic, &result(json!({"events": [1, 2]})));
        assert_eq!(output, "📊 Result contains 1 field(s)\n  • events: 2 item(s)");
    }
}
