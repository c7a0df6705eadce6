// ABOUTME: Blocking HTTP client for the TickTick Open API
// ABOUTME: Handles bearer auth headers and fail-fast errors

use crate::{Error, Project, ProjectData, Result};
use reqwest::blocking::Client;
use std::time::Duration;

pub(crate) fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        return s.to_string();
    }

    // Find a valid UTF-8 boundary at or before max_chars
    let mut boundary = max_chars;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    if boundary == 0 {
        return String::new();
    }

    format!("{}...", &s[..boundary])
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(token: String, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(ApiClient {
            client,
            base_url: base_url.unwrap_or_else(|| "https://api.ticktick.com".into()),
            token,
        })
    }

    fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .header("User-Agent", "tickmark/0.1 (Rust)")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            let preview = truncate_str(&message, 100);
            return Err(Error::Api {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                message: preview,
            });
        }

        // Get response text for better error messages
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| {
            eprintln!("Failed to parse response from {}: {}", endpoint, e);
            eprintln!("Response body (first 500 chars): {}", truncate_str(&body, 500));
            Error::Parse(e)
        })
    }

    /// Lists every project visible to the token.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        self.get("/open/v1/project")
    }

    /// Fetches a project's payload, including its flat task list.
    pub fn get_project_data(&self, project_id: &str) -> Result<ProjectData> {
        self.get(&format!("/open/v1/project/{}/data", project_id))
    }
}
