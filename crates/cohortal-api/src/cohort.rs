// Cohort endpoints
//
// Cohort definitions (criteria trees over stored AQL queries) and the
// size-preview query used while building a cohort.

use serde::Deserialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::CohortDto;

#[derive(Debug, Deserialize)]
struct CohortSizeDto {
    count: u64,
}

impl ApiClient {
    /// Fetch one cohort definition.
    ///
    /// `GET /api/cohort/{id}`
    pub async fn get_cohort(&self, id: i64) -> Result<CohortDto, Error> {
        let url = self.api_url(&format!("cohort/{id}"));
        debug!(id, "fetching cohort");
        self.get(url).await
    }

    /// Store a new cohort definition. The backend echoes the stored entity.
    ///
    /// `POST /api/cohort`
    pub async fn create_cohort(&self, cohort: &CohortDto) -> Result<CohortDto, Error> {
        let url = self.api_url("cohort");
        debug!("creating cohort");
        self.post(url, cohort).await
    }

    /// Update an existing cohort definition.
    ///
    /// `PUT /api/cohort/{id}`
    pub async fn update_cohort(&self, id: i64, cohort: &CohortDto) -> Result<CohortDto, Error> {
        let url = self.api_url(&format!("cohort/{id}"));
        debug!(id, "updating cohort");
        self.put(url, cohort).await
    }

    /// Preview how many patients a candidate cohort definition matches,
    /// without storing it.
    ///
    /// `POST /api/cohort/size`
    pub async fn get_cohort_size(&self, cohort: &CohortDto) -> Result<u64, Error> {
        let url = self.api_url("cohort/size");
        debug!("querying cohort size");
        let size: CohortSizeDto = self.post(url, cohort).await?;
        Ok(size.count)
    }
}
