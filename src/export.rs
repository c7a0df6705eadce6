// ABOUTME: Core export logic driving projects → tasks → markdown files
// ABOUTME: Isolates per-project and per-file failures, reports counts

use crate::{
    api::ApiClient,
    convert::{children_index, file_stem, render_task},
    model::{Project, Task},
    storage::{write_task_file, Paths},
    Result,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;

pub struct ExportOptions {
    pub title_in_filename: bool,
}

/// One-shot batch export: list projects, then fetch and render every
/// project's tasks. A project-level fetch failure skips that project only;
/// a listing failure aborts the run.
pub fn export_all(client: &ApiClient, paths: &Paths, options: &ExportOptions) -> Result<()> {
    println!("Fetching project list...");
    let projects = client.list_projects()?;

    display_projects(&projects);

    let created_dirs = paths.ensure_project_dirs(&projects)?;
    for dir in &created_dirs {
        println!("Created directory: {}", dir.display());
    }

    let mut total_files = 0;

    for project in &projects {
        let name = project.display_name();
        println!("\n--- Exporting tasks for project: {} ---", name);

        let data = match client.get_project_data(&project.id) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Failed to get data for project {}: {}", name, e);
                continue;
            }
        };

        total_files += export_project(&data.tasks, name, paths, options);
    }

    println!(
        "\nExported {} task files to {}",
        total_files,
        paths.base_dir.display()
    );
    Ok(())
}

/// Renders and writes one project's tasks. Write failures are logged per
/// file and never abort the batch. Returns the number of files written.
fn export_project(
    tasks: &[Task],
    project_name: &str,
    paths: &Paths,
    options: &ExportOptions,
) -> usize {
    if tasks.is_empty() {
        println!("No tasks found in project: {}", project_name);
        return 0;
    }

    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let index = children_index(tasks);

    let pb = ProgressBar::new(tasks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} tasks {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut created = 0;

    for task in tasks {
        let parent = task
            .parent_id
            .as_deref()
            .filter(|pid| !pid.is_empty())
            .and_then(|pid| by_id.get(pid).copied());
        let children = index
            .get(task.id.as_str())
            .map(|c| c.as_slice())
            .unwrap_or(&[]);

        let path = paths.task_file(project_name, &file_stem(task, options.title_in_filename));
        let result = render_task(task, project_name, parent, children, options.title_in_filename)
            .and_then(|doc| write_task_file(&path, &doc));

        match result {
            Ok(()) => created += 1,
            Err(e) => eprintln!("Error creating file {}: {}", path.display(), e),
        }

        pb.inc(1);
    }

    pb.finish_with_message(format!("({} files for {})", created, project_name));
    created
}

fn display_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found");
        return;
    }

    println!("\nFound {} projects:", projects.len());
    println!("{}", "-".repeat(60));

    for (i, project) in projects.iter().enumerate() {
        println!("{}. {}", i + 1, project.display_name());
        println!("   ID: {}", project.id);
        println!("   Color: {}", project.color.as_deref().unwrap_or("N/A"));
        println!(
            "   View Mode: {}",
            project.view_mode.as_deref().unwrap_or("N/A")
        );
        println!(
            "   Permission: {}",
            project.permission.as_deref().unwrap_or("N/A")
        );
        println!("   Kind: {}", project.kind.as_deref().unwrap_or("N/A"));
        println!("   Closed: {}", project.closed.unwrap_or(false));
        if let Some(group_id) = &project.group_id {
            println!("   Group ID: {}", group_id);
        }
        println!();
    }
}
