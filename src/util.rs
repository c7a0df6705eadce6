// ABOUTME: Utility functions for name sanitization and date formatting
// ABOUTME: Provides consistent filename generation and timestamp reformatting

use chrono::{DateTime, NaiveDateTime};

/// Makes a project or task name safe for use as a filesystem component.
///
/// Replaces `< > : " / \ | ? *` with `_`, trims leading/trailing spaces and
/// dots, and collapses runs of underscores. Idempotent.
pub fn sanitize_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect();

    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');

    let mut collapsed = String::with_capacity(trimmed.len());
    let mut prev_underscore = false;
    for c in trimmed.chars() {
        if c == '_' {
            if !prev_underscore {
                collapsed.push(c);
            }
            prev_underscore = true;
        } else {
            collapsed.push(c);
            prev_underscore = false;
        }
    }

    if collapsed.is_empty() {
        "unnamed_project".to_string()
    } else {
        collapsed
    }
}

/// Truncates to at most `max_chars` characters (not bytes).
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Reformats an ISO 8601 timestamp to `YYYY-MM-DD HH:MM:SS`.
///
/// TickTick emits offsets both with and without a colon (`+0000`) and with
/// millisecond fractions. Anything unparseable passes through unchanged.
pub fn format_date(raw: &str) -> String {
    const OUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(OUT_FORMAT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return dt.format(OUT_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(OUT_FORMAT).to_string();
    }

    raw.to_string()
}

#[cfg(test)]
mod sanitize_tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_invalid_chars() {
        assert_eq!(sanitize_name("My/Project:Name"), "My_Project_Name");
        assert_eq!(sanitize_name(r#"a<b>c"d|e?f*g"#), "a_b_c_d_e_f_g");
    }

    #[test]
    fn test_sanitize_trims_spaces_and_dots() {
        assert_eq!(sanitize_name("  notes. "), "notes");
        assert_eq!(sanitize_name("...inbox..."), "inbox");
    }

    #[test]
    fn test_sanitize_collapses_underscores() {
        assert_eq!(sanitize_name("a//b::c"), "a_b_c");
        assert_eq!(sanitize_name("already_clean"), "already_clean");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_name(""), "unnamed_project");
        assert_eq!(sanitize_name(" ... "), "unnamed_project");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for input in ["My/Project:Name", "  notes. ", "a//b::c", "plain"] {
            let once = sanitize_name(input);
            assert_eq!(sanitize_name(&once), once);
        }
    }
}
