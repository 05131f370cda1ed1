// Project endpoints
//
// Research-project CRUD, status transitions, and researcher assignment.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::ProjectDto;

impl ApiClient {
    /// List all projects visible to the authenticated user.
    ///
    /// `GET /api/project`
    pub async fn get_projects(&self) -> Result<Vec<ProjectDto>, Error> {
        let url = self.api_url("project");
        debug!("fetching project list");
        self.get(url).await
    }

    /// Create a new project. The backend echoes the stored entity.
    ///
    /// `POST /api/project`
    pub async fn create_project(&self, project: &ProjectDto) -> Result<ProjectDto, Error> {
        let url = self.api_url("project");
        debug!(name = %project.name, "creating project");
        self.post(url, project).await
    }

    /// Update an existing project.
    ///
    /// `PUT /api/project/{id}`
    pub async fn update_project(&self, id: i64, project: &ProjectDto) -> Result<ProjectDto, Error> {
        let url = self.api_url(&format!("project/{id}"));
        debug!(id, "updating project");
        self.put(url, project).await
    }

    /// Move a project to a new lifecycle status.
    ///
    /// `POST /api/project/{id}/status`
    pub async fn set_project_status(&self, id: i64, status: &str) -> Result<ProjectDto, Error> {
        let url = self.api_url(&format!("project/{id}/status"));
        debug!(id, status, "changing project status");
        self.post(url, &json!({ "status": status })).await
    }

    /// Replace the set of researchers assigned to a project.
    ///
    /// `POST /api/project/{id}/researchers`
    pub async fn set_project_researchers(
        &self,
        id: i64,
        user_ids: &[String],
    ) -> Result<ProjectDto, Error> {
        let url = self.api_url(&format!("project/{id}/researchers"));
        debug!(id, count = user_ids.len(), "assigning researchers");
        self.post(url, &json!({ "userIds": user_ids })).await
    }
}
