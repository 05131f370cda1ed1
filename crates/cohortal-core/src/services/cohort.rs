// ── Cohort service ──
//
// Cohorts are edited per project and fetched on demand; there is no
// list view, so this service carries no cache cell.

use std::sync::Arc;

use cohortal_api::ApiClient;
use cohortal_api::models::CohortDto;

use crate::error::CoreError;
use crate::model::Cohort;

/// Gateway to the cohort endpoints.
pub struct CohortService {
    api: Arc<ApiClient>,
}

impl CohortService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch one cohort definition.
    pub async fn get(&self, id: i64) -> Result<Cohort, CoreError> {
        let cohort = self.api.get_cohort(id).await?;
        Ok(Cohort::from(cohort))
    }

    /// Store a new cohort definition. The backend echo is returned.
    pub async fn create(&self, cohort: &Cohort) -> Result<Cohort, CoreError> {
        let stored = self.api.create_cohort(&CohortDto::from(cohort)).await?;
        Ok(Cohort::from(stored))
    }

    /// Update an existing cohort definition.
    pub async fn update(&self, cohort: &Cohort) -> Result<Cohort, CoreError> {
        let id = cohort.id.ok_or_else(|| CoreError::Rejected {
            message: "cannot update an unsaved cohort".into(),
        })?;
        let stored = self.api.update_cohort(id, &CohortDto::from(cohort)).await?;
        Ok(Cohort::from(stored))
    }

    /// Preview how many patients a candidate definition matches.
    pub async fn size(&self, cohort: &Cohort) -> Result<u64, CoreError> {
        let count = self.api.get_cohort_size(&CohortDto::from(cohort)).await?;
        Ok(count)
    }
}
