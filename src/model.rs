// ABOUTME: Serde data models for TickTick Open API responses
// ABOUTME: Tolerant parsing with optional fields and camelCase wire names

use serde::{Deserialize, Serialize};

/// Task status codes: 0 = normal, 2 = completed.
pub const TASK_STATUS_COMPLETED: i64 = 2;

/// Checklist item status codes: 0 = normal, 1 = completed.
pub const ITEM_STATUS_COMPLETED: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub view_mode: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub closed: Option<bool>,
    #[serde(default)]
    pub group_id: Option<String>,
}

impl Project {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed Project")
    }
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed_time: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub repeat_flag: Option<String>,
    #[serde(default)]
    pub reminders: Vec<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Task {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled Task")
    }

    pub fn is_completed(&self) -> bool {
        self.status == TASK_STATUS_COMPLETED
    }
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub completed_time: Option<String>,
}

impl ChecklistItem {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled Subtask")
    }

    pub fn is_completed(&self) -> bool {
        self.status == ITEM_STATUS_COMPLETED
    }
}

/// Per-project payload from `/open/v1/project/{id}/data`. Columns and the
/// echoed project object are ignored; only the flat task list is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub tasks: Vec<Task>,
}


#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}
