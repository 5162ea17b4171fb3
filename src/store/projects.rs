use super::{Store, keys};
use crate::errors::{AppError, AppResult};
use crate::models::next_id;
use crate::models::project::{NewProject, Project, ProjectPatch};
use crate::utils::time::now_ms;

impl Store {
    pub fn projects(&self) -> AppResult<Vec<Project>> {
        let projects: Vec<Project> = self.read_list(keys::PROJECTS)?;
        Ok(projects.into_iter().map(Project::normalized).collect())
    }

    pub fn save_projects(&self, projects: &[Project]) -> AppResult<()> {
        self.write(keys::PROJECTS, projects)
    }

    pub fn project(&self, id: i64) -> AppResult<Project> {
        self.projects()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Project #{}", id)))
    }

    pub fn project_by_name(&self, name: &str) -> AppResult<Option<Project>> {
        let name = name.trim();
        Ok(self.projects()?.into_iter().find(|p| p.name == name))
    }

    /// Project names are unique.
    pub fn add_project(&self, input: NewProject) -> AppResult<Project> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("project name is empty".into()));
        }

        let mut projects = self.projects()?;
        if projects.iter().any(|p| p.name == name) {
            return Err(AppError::Duplicate(format!("Project '{}'", name)));
        }

        let created = Project {
            id: next_id(projects.iter().map(|p| p.id)),
            app_name: input.app_name.unwrap_or_else(|| name.clone()),
            name,
            kind: input.kind,
            link: input.ref_link.clone(),
            created_at: now_ms(),
            app_type: input.app_type,
            ref_link: input.ref_link,
            mixed: input.mixed,
        }
        .normalized();

        projects.push(created.clone());
        self.save_projects(&projects)?;
        Ok(created)
    }

    /// Id and creation time never change.
    pub fn update_project(&self, id: i64, patch: ProjectPatch) -> AppResult<Project> {
        let mut projects = self.projects()?;
        let index = projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Project #{}", id)))?;

        if let Some(new_name) = patch.name.as_deref().map(str::trim) {
            if new_name.is_empty() {
                return Err(AppError::Validation("project name is empty".into()));
            }
            if projects.iter().any(|p| p.id != id && p.name == new_name) {
                return Err(AppError::Duplicate(format!("Project '{}'", new_name)));
            }
        }

        let prev = projects[index].clone();
        let ref_link = patch.ref_link.unwrap_or(prev.ref_link);
        let updated = Project {
            id: prev.id,
            created_at: prev.created_at,
            name: patch.name.map(|n| n.trim().to_string()).unwrap_or(prev.name),
            kind: patch.kind.unwrap_or(prev.kind),
            link: ref_link.clone(),
            app_name: patch.app_name.unwrap_or(prev.app_name),
            app_type: patch.app_type.unwrap_or(prev.app_type),
            ref_link,
            mixed: patch.mixed.unwrap_or(prev.mixed),
        }
        .normalized();

        projects[index] = updated.clone();
        self.save_projects(&projects)?;
        Ok(updated)
    }

    pub fn delete_project(&self, id: i64) -> AppResult<bool> {
        let projects = self.projects()?;
        let next: Vec<Project> = projects.iter().filter(|p| p.id != id).cloned().collect();
        if next.len() == projects.len() {
            return Ok(false);
        }
        self.save_projects(&next)?;
        Ok(true)
    }
}
