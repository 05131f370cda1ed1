// AQL endpoints
//
// Stored-query CRUD, execution, and the editor's backend validator.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{AqlDto, AqlExecutionDto, AqlValidationDto};

impl ApiClient {
    /// List all AQL queries visible to the authenticated user.
    ///
    /// `GET /api/aql`
    pub async fn get_aqls(&self) -> Result<Vec<AqlDto>, Error> {
        let url = self.api_url("aql");
        debug!("fetching aql list");
        self.get(url).await
    }

    /// Store a new AQL query. The backend echoes the stored entity
    /// (with its assigned id and timestamps).
    ///
    /// `POST /api/aql`
    pub async fn create_aql(&self, aql: &AqlDto) -> Result<AqlDto, Error> {
        let url = self.api_url("aql");
        debug!(name = %aql.name, "creating aql");
        self.post(url, aql).await
    }

    /// Update an existing AQL query.
    ///
    /// `PUT /api/aql/{id}`
    pub async fn update_aql(&self, id: i64, aql: &AqlDto) -> Result<AqlDto, Error> {
        let url = self.api_url(&format!("aql/{id}"));
        debug!(id, "updating aql");
        self.put(url, aql).await
    }

    /// Delete an AQL query.
    ///
    /// `DELETE /api/aql/{id}`
    pub async fn delete_aql(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("aql/{id}"));
        debug!(id, "deleting aql");
        self.delete(url).await
    }

    /// Execute a stored AQL query against the clinical data repository.
    ///
    /// `POST /api/aql/{id}/execute`
    pub async fn execute_aql(&self, id: i64) -> Result<AqlExecutionDto, Error> {
        let url = self.api_url(&format!("aql/{id}/execute"));
        debug!(id, "executing aql");
        self.post_empty(url).await
    }

    /// Ask the backend validator whether a candidate query parses.
    ///
    /// `POST /api/aqleditor/validate`
    pub async fn validate_aql(&self, query: &str) -> Result<AqlValidationDto, Error> {
        let url = self.api_url("aqleditor/validate");
        debug!("validating aql query");
        self.post(url, &json!({ "query": query })).await
    }
}
