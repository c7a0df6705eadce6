// ABOUTME: Renders a task to a markdown document with frontmatter
// ABOUTME: Also derives the per-project parent/child index and file stems

use crate::model::Task;
use crate::util::{format_date, sanitize_name, truncate_chars};
use crate::Result;
use std::collections::HashMap;

const STATUS_COMPLETED_GLYPH: &str = "✅";
const STATUS_NORMAL_GLYPH: &str = "⬜";

/// Max characters of sanitized title carried into a filename stem.
const FILENAME_TITLE_MAX: usize = 50;

fn priority_glyph(priority: i64) -> &'static str {
    // Priority codes: None 0, Low 1, Medium 3, High 5
    match priority {
        1 => "🟢",
        3 => "🟡",
        5 => "🔴",
        _ => "⚪",
    }
}

fn status_glyph(completed: bool) -> &'static str {
    if completed {
        STATUS_COMPLETED_GLYPH
    } else {
        STATUS_NORMAL_GLYPH
    }
}

/// Frontmatter values that a metadata parser would read as a boolean, null,
/// number, comment, or broken string get wrapped in double quotes.
fn needs_quotes(value: &str) -> bool {
    if value.contains('"') || value.contains(':') {
        return true;
    }
    if value.trim() != value {
        return true;
    }
    if value.starts_with('#') {
        return true;
    }
    if value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("null")
    {
        return true;
    }

    let stripped: String = value.chars().filter(|c| *c != '.' && *c != '-').collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit())
}

fn header_value(value: &str) -> String {
    if needs_quotes(value) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// Filename stem for a task: the bare id, or `<sanitized-title>_<id>` when
/// titles are included in filenames.
pub fn file_stem(task: &Task, title_in_filename: bool) -> String {
    if title_in_filename {
        let slug = truncate_chars(&sanitize_name(task.display_title()), FILENAME_TITLE_MAX);
        format!("{}_{}", slug, task.id)
    } else {
        task.id.clone()
    }
}

/// Groups a project's flat task list by `parentId`, preserving list order.
/// Pure derivation; task structs are never mutated.
pub fn children_index(tasks: &[Task]) -> HashMap<&str, Vec<&Task>> {
    let mut index: HashMap<&str, Vec<&Task>> = HashMap::new();
    for task in tasks {
        if let Some(parent_id) = task.parent_id.as_deref() {
            if !parent_id.is_empty() {
                index.entry(parent_id).or_default().push(task);
            }
        }
    }
    index
}

/// Renders one task as a complete markdown document.
///
/// `parent` is the resolved parent task when it exists in the same project's
/// list; `children` are the tasks whose `parentId` points at this one.
pub fn render_task(
    task: &Task,
    project_name: &str,
    parent: Option<&Task>,
    children: &[&Task],
    title_in_filename: bool,
) -> Result<String> {
    let mut doc = String::new();

    doc.push_str("---\n");
    doc.push_str(&format!("title: {}\n", header_value(task.display_title())));
    doc.push_str(&format!("project: {}\n", header_value(project_name)));
    doc.push_str(&format!("icon: {}\n", status_glyph(task.is_completed())));
    doc.push_str(&format!("priority: {}\n", priority_glyph(task.priority)));

    if let Some(date) = task.start_date.as_deref().filter(|s| !s.is_empty()) {
        doc.push_str(&format!("startDate: {}\n", format_date(date)));
    }
    if let Some(date) = task.due_date.as_deref().filter(|s| !s.is_empty()) {
        doc.push_str(&format!("dueDate: {}\n", format_date(date)));
    }
    if let Some(date) = task.completed_time.as_deref().filter(|s| !s.is_empty()) {
        doc.push_str(&format!("completedTime: {}\n", format_date(date)));
    }
    if let Some(flag) = task.repeat_flag.as_deref().filter(|s| !s.is_empty()) {
        doc.push_str(&format!("repeatFlag: \"{}\"\n", flag));
    }
    if !task.reminders.is_empty() {
        // JSON flow sequence, which is also valid YAML
        doc.push_str(&format!(
            "reminders: {}\n",
            serde_json::to_string(&task.reminders)?
        ));
    }
    if let Some(parent_id) = task.parent_id.as_deref().filter(|s| !s.is_empty()) {
        let target = match parent {
            Some(parent) => file_stem(parent, title_in_filename),
            None => parent_id.to_string(),
        };
        doc.push_str(&format!("parent: \"[[{}]]\"\n", target));
    }
    doc.push_str("---\n\n");

    if let Some(desc) = task.desc.as_deref().filter(|s| !s.is_empty()) {
        doc.push_str(&format!("## Description\n{}\n\n", desc));
    }
    if let Some(content) = task.content.as_deref().filter(|s| !s.is_empty()) {
        doc.push_str(&format!("## Content\n{}\n\n", content));
    }

    if !task.items.is_empty() || !children.is_empty() {
        doc.push_str("## Subtasks\n\n");

        for item in &task.items {
            doc.push_str(&format!(
                "- {} {}\n",
                status_glyph(item.is_completed()),
                item.display_title()
            ));
            if let Some(date) = item.start_date.as_deref().filter(|s| !s.is_empty()) {
                doc.push_str(&format!("  - Start: {}\n", format_date(date)));
            }
            if let Some(date) = item.completed_time.as_deref().filter(|s| !s.is_empty()) {
                doc.push_str(&format!("  - Completed: {}\n", format_date(date)));
            }
        }

        for child in children {
            let stem = file_stem(child, title_in_filename);
            match child.title.as_deref().filter(|t| !t.is_empty()) {
                Some(label) => doc.push_str(&format!("- [[{}|{}]]\n", stem, label)),
                None => doc.push_str(&format!("- [[{}]]\n", stem)),
            }
        }

        doc.push('\n');
    }

    Ok(doc)
}

#[cfg(test)]
mod glyph_tests {
    use super::*;

    #[test]
    fn test_priority_glyphs() {
        assert_eq!(priority_glyph(0), "⚪");
        assert_eq!(priority_glyph(1), "🟢");
        assert_eq!(priority_glyph(3), "🟡");
        assert_eq!(priority_glyph(5), "🔴");
    }

    #[test]
    fn test_priority_unknown_defaults_to_none() {
        assert_eq!(priority_glyph(2), "⚪");
        assert_eq!(priority_glyph(-1), "⚪");
        assert_eq!(priority_glyph(99), "⚪");
    }

    #[test]
    fn test_status_glyphs() {
        assert_eq!(status_glyph(true), "✅");
        assert_eq!(status_glyph(false), "⬜");
    }
}
