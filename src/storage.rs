// ABOUTME: Output tree layout for exported task files
// ABOUTME: One directory per project under the base dir, created on demand

use crate::model::Project;
use crate::util::sanitize_name;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Paths {
    pub base_dir: PathBuf,
}

impl Paths {
    pub fn new(base_dir: PathBuf) -> Self {
        Paths { base_dir }
    }

    pub fn project_dir(&self, project_name: &str) -> PathBuf {
        self.base_dir.join(sanitize_name(project_name))
    }

    pub fn task_file(&self, project_name: &str, stem: &str) -> PathBuf {
        self.project_dir(project_name).join(format!("{}.md", stem))
    }

    /// Creates the base directory and one directory per project.
    /// Pre-existing directories are left untouched. Returns the paths that
    /// were newly created.
    pub fn ensure_project_dirs(&self, projects: &[Project]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.base_dir)?;

        let mut created = Vec::new();
        for project in projects {
            let dir = self.project_dir(project.display_name());
            if !dir.exists() {
                fs::create_dir_all(&dir)?;
                created.push(dir);
            }
        }
        Ok(created)
    }
}

pub fn write_task_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
