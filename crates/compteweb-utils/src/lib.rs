//! Utility functions and helpers

/// Format a number with a fixed count of decimals, `-0.00` printed as `0.00`
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// Escape text for safe interpolation into HTML bodies and attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `selected` marker for an `<option>` when its value is the current one
pub fn selected_if(value: &str, current: &str) -> &'static str {
    if value == current { "selected" } else { "" }
}
