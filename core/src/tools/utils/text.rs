//! Text helpers for rendering tool results
//!
//! All lengths are counted in characters, so multi-byte text never splits
//! inside a code point.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Suffix appended to shortened text
pub const ELLIPSIS: &str = "...";

/// Markup removed from event descriptions before display
const STRIPPED_MARKUP: &[&str] = &["<br />", "<br/>", "<br>", "<a>", "</a>"];

/// Accepted layouts for date-times without an offset
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Shorten `text` to `limit` characters, appending an ellipsis only when
/// something was cut.
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// First `limit` characters of `text` followed by an ellipsis, always.
pub fn preview(text: &str, limit: usize) -> String {
    let end = text
        .char_indices()
        .nth(limit)
        .map(|(cut, _)| cut)
        .unwrap_or(text.len());
    format!("{}{}", &text[..end], ELLIPSIS)
}

/// Remove line-break and anchor tags by literal substring removal.
pub fn strip_markup(text: &str) -> String {
    STRIPPED_MARKUP
        .iter()
        .fold(text.to_string(), |acc, tag| acc.replace(tag, ""))
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word starts after any non-alphabetic character.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }

    out
}

/// Render an ISO-8601 timestamp for display.
///
/// A trailing `Z` is read as `+00:00`. Local date-times are shown without an
/// offset and date-only values as all-day. Returns `None` for anything that
/// does not parse.
pub fn format_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let normalized = match raw.strip_suffix('Z') {
        Some(stem) => format!("{}+00:00", stem),
        None => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.format("%Y-%m-%d %H:%M %:z").to_string());
    }

    if let Some(local) = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
    {
        return Some(local.format("%Y-%m-%d %H:%M").to_string());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(format!("{} (all day)", date.format("%Y-%m-%d")));
    }

    None
}
