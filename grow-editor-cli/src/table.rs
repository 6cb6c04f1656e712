//! Terminal-aware table utilities.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::Value;

/// Create a table sized to the terminal, or 120 columns without a TTY.
pub fn new_table() -> Table {
    let width = crossterm::terminal::size()
        .map(|(w, _)| w)
        .unwrap_or(120);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// Truncate a string to `max` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// One-line rendering of a front-matter value for a table cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.replace('\n', " "),
        Value::Array(items) => format!("[{} items]", items.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_str_long() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_str_unicode() {
        let s = "こんにちは世界テスト";
        assert_eq!(truncate_str(s, 6), "こんに...");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!("a\nb")), "a b");
        assert_eq!(display_value(&json!([1, 2])), "[2 items]");
        assert_eq!(display_value(&json!(3)), "3");
    }
}
