use assert_fs::prelude::*;
use std::fs;
use tickmark::api::ApiClient;
use tickmark::export::{export_all, ExportOptions};
use tickmark::storage::Paths;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_project_list(server: &MockServer, projects: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/open/v1/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(projects))
        .mount(server)
        .await;
}

async fn mount_project_data(server: &MockServer, project_id: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/open/v1/project/{}/data", project_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(data))
        .mount(server)
        .await;
}

fn run_export(
    uri: String,
    base_dir: std::path::PathBuf,
    title_in_filename: bool,
) -> tokio::task::JoinHandle<tickmark::Result<()>> {
    tokio::task::spawn_blocking(move || {
        let client = ApiClient::new("test_token".into(), Some(uri))?;
        let paths = Paths::new(base_dir);
        export_all(&client, &paths, &ExportOptions { title_in_filename })
    })
}

#[tokio::test]
async fn test_export_end_to_end() {
    let mock_server = MockServer::start().await;

    mount_project_list(
        &mock_server,
        serde_json::json!([
            {"id": "p1", "name": "Work"},
            {"id": "p2", "name": "Empty"},
            {"id": "p3", "name": "Broken"},
            {"id": "p4", "name": "Home"}
        ]),
    )
    .await;

    mount_project_data(
        &mock_server,
        "p1",
        serde_json::json!({
            "tasks": [
                {"id": "t1", "title": "Plan", "status": 0, "priority": 5},
                {"id": "t2", "title": "Draft", "status": 2, "priority": 0, "parentId": "t1"}
            ]
        }),
    )
    .await;

    mount_project_data(&mock_server, "p2", serde_json::json!({"tasks": []})).await;

    Mock::given(method("GET"))
        .and(path("/open/v1/project/p3/data"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    mount_project_data(
        &mock_server,
        "p4",
        serde_json::json!({
            "tasks": [{"id": "t9", "title": "Tidy desk", "status": 0}]
        }),
    )
    .await;

    let temp = assert_fs::TempDir::new().unwrap();
    let result = run_export(mock_server.uri(), temp.path().to_path_buf(), false)
        .await
        .unwrap();

    // Partial per-project failure still counts as a successful run
    result.unwrap();

    let parent_doc = fs::read_to_string(temp.child("Work/t1.md").path()).unwrap();
    assert!(parent_doc.contains("title: Plan"));
    assert!(parent_doc.contains("project: Work"));
    assert!(parent_doc.contains("icon: ⬜"));
    assert!(parent_doc.contains("priority: 🔴"));
    assert!(parent_doc.contains("## Subtasks"));
    assert!(parent_doc.contains("- [[t2|Draft]]"));

    let child_doc = fs::read_to_string(temp.child("Work/t2.md").path()).unwrap();
    assert!(child_doc.contains("icon: ✅"));
    assert!(child_doc.contains("priority: ⚪"));
    assert!(child_doc.contains("parent: \"[[t1]]\""));
    assert!(!child_doc.contains("## Subtasks"));

    // Frontmatter must be parseable by downstream metadata tools
    let yaml = parent_doc
        .strip_prefix("---\n")
        .and_then(|rest| rest.split("\n---\n").next())
        .unwrap();
    let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(parsed["title"].as_str(), Some("Plan"));
    assert_eq!(parsed["icon"].as_str(), Some("⬜"));

    // Empty project: directory created, no files
    let empty_dir = temp.child("Empty");
    assert!(empty_dir.path().is_dir());
    assert_eq!(fs::read_dir(empty_dir.path()).unwrap().count(), 0);

    // A failed project fetch must not block later projects
    assert!(temp.child("Home/t9.md").path().exists());
    assert_eq!(fs::read_dir(temp.child("Broken").path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_export_title_in_filename() {
    let mock_server = MockServer::start().await;

    mount_project_list(&mock_server, serde_json::json!([{"id": "p1", "name": "Work"}])).await;
    mount_project_data(
        &mock_server,
        "p1",
        serde_json::json!({
            "tasks": [
                {"id": "t1", "title": "Plan sprint", "status": 0},
                {"id": "t2", "title": "Draft notes", "status": 0, "parentId": "t1"}
            ]
        }),
    )
    .await;

    let temp = assert_fs::TempDir::new().unwrap();
    let result = run_export(mock_server.uri(), temp.path().to_path_buf(), true)
        .await
        .unwrap();
    result.unwrap();

    let parent_doc =
        fs::read_to_string(temp.child("Work/Plan sprint_t1.md").path()).unwrap();
    // Child links follow the child's own filename convention
    assert!(parent_doc.contains("- [[Draft notes_t2|Draft notes]]"));

    let child_doc =
        fs::read_to_string(temp.child("Work/Draft notes_t2.md").path()).unwrap();
    assert!(child_doc.contains("parent: \"[[Plan sprint_t1]]\""));
}

#[tokio::test]
async fn test_export_aborts_when_listing_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open/v1/project"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let temp = assert_fs::TempDir::new().unwrap();
    let result = run_export(mock_server.uri(), temp.path().join("tasks"), false)
        .await
        .unwrap();

    match result {
        Err(tickmark::Error::Api { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected API error, got {:?}", other.map(|_| ())),
    }

    // Nothing gets written when enumeration itself fails
    assert!(!temp.path().join("tasks").exists());
}
