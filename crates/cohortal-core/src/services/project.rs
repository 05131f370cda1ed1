// ── Project service ──

use std::sync::Arc;

use cohortal_api::ApiClient;
use cohortal_api::models::ProjectDto;

use crate::error::CoreError;
use crate::model::{Project, ProjectStatus, UserId};
use crate::store::{ResourceCell, ResourceStream};

/// Observable cache over the project endpoints.
pub struct ProjectService {
    api: Arc<ApiClient>,
    projects: ResourceCell<Vec<Project>>,
}

impl ProjectService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            projects: ResourceCell::new(),
        }
    }

    /// The cached project list.
    pub fn projects(&self) -> ResourceStream<Vec<Project>> {
        self.projects.subscribe()
    }

    /// Fetch all projects and broadcast them.
    pub async fn fetch_all(&self) -> Result<Arc<Vec<Project>>, CoreError> {
        let projects = self.api.get_projects().await?;
        let projects: Vec<Project> = projects.into_iter().map(Project::from).collect();
        Ok(self.projects.publish(projects))
    }

    /// Create a project. The backend echo (with assigned id) is returned.
    pub async fn create(&self, project: &Project) -> Result<Project, CoreError> {
        let stored = self.api.create_project(&ProjectDto::from(project)).await?;
        Ok(Project::from(stored))
    }

    /// Update an existing project.
    pub async fn update(&self, project: &Project) -> Result<Project, CoreError> {
        let id = project.id.ok_or_else(|| CoreError::Rejected {
            message: "cannot update an unsaved project".into(),
        })?;
        let stored = self
            .api
            .update_project(id, &ProjectDto::from(project))
            .await?;
        Ok(Project::from(stored))
    }

    /// Move a project to a new lifecycle status.
    ///
    /// The transition is pre-checked against the workflow table so a
    /// disallowed move fails without a round-trip.
    pub async fn set_status(
        &self,
        project: &Project,
        next: ProjectStatus,
    ) -> Result<Project, CoreError> {
        let id = project.id.ok_or_else(|| CoreError::Rejected {
            message: "cannot change status of an unsaved project".into(),
        })?;

        if !project.status.can_transition_to(next) {
            return Err(CoreError::Rejected {
                message: format!("status transition {} -> {next} not allowed", project.status),
            });
        }

        let stored = self.api.set_project_status(id, next.as_wire()).await?;
        Ok(Project::from(stored))
    }

    /// Replace the set of researchers assigned to a project.
    pub async fn set_researchers(
        &self,
        project_id: i64,
        researchers: &[UserId],
    ) -> Result<Project, CoreError> {
        let ids: Vec<String> = researchers.iter().map(|u| u.as_str().to_owned()).collect();
        let stored = self.api.set_project_researchers(project_id, &ids).await?;
        Ok(Project::from(stored))
    }
}
