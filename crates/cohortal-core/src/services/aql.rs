// ── AQL query service ──
//
// Caches the stored-query list and maintains a filtered view alongside
// it. Mutations (save, update, delete) do not touch the cached list;
// tables trigger a re-fetch after a mutation, matching the backend's
// ownership of list ordering and visibility.

use std::sync::{Arc, RwLock};

use cohortal_api::ApiClient;
use cohortal_api::models::AqlDto;

use crate::error::CoreError;
use crate::model::{Aql, AqlExecutionResult, AqlFilter};
use crate::store::{ResourceCell, ResourceStream};

/// Observable cache over the AQL endpoints.
pub struct AqlService {
    api: Arc<ApiClient>,
    aqls: ResourceCell<Vec<Aql>>,
    filtered: ResourceCell<Vec<Aql>>,
    filter: RwLock<AqlFilter>,
}

impl AqlService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            aqls: ResourceCell::new(),
            filtered: ResourceCell::new(),
            filter: RwLock::new(AqlFilter::default()),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// The full cached list.
    pub fn aqls(&self) -> ResourceStream<Vec<Aql>> {
        self.aqls.subscribe()
    }

    /// The filtered view, recomputed on every fetch and filter change.
    pub fn filtered_aqls(&self) -> ResourceStream<Vec<Aql>> {
        self.filtered.subscribe()
    }

    /// The currently active filter.
    pub fn filter(&self) -> AqlFilter {
        self.filter.read().expect("filter lock poisoned").clone()
    }

    // ── Fetch / mutate ───────────────────────────────────────────────

    /// Fetch all queries and broadcast both the full list and the
    /// filtered view.
    pub async fn fetch_all(&self) -> Result<Arc<Vec<Aql>>, CoreError> {
        let aqls = self.api.get_aqls().await?;
        let aqls: Vec<Aql> = aqls.into_iter().map(Aql::from).collect();
        let published = self.aqls.publish(aqls);
        self.republish_filtered(&published);
        Ok(published)
    }

    /// Change the active filter and republish the filtered view from the
    /// cached list. No network call.
    pub fn set_filter(&self, filter: AqlFilter) {
        *self.filter.write().expect("filter lock poisoned") = filter;
        if let Some(current) = self.aqls.current() {
            self.republish_filtered(&current);
        }
    }

    fn republish_filtered(&self, aqls: &[Aql]) {
        let filter = self.filter();
        let view: Vec<Aql> = aqls.iter().filter(|a| filter.matches(a)).cloned().collect();
        self.filtered.publish(view);
    }

    /// Store a new query. The backend echo (with assigned id) is returned.
    pub async fn save(&self, aql: &Aql) -> Result<Aql, CoreError> {
        let stored = self.api.create_aql(&AqlDto::from(aql)).await?;
        Ok(Aql::from(stored))
    }

    /// Update an existing query.
    pub async fn update(&self, aql: &Aql) -> Result<Aql, CoreError> {
        let id = aql.id.ok_or_else(|| CoreError::Rejected {
            message: "cannot update an unsaved query".into(),
        })?;
        let stored = self.api.update_aql(id, &AqlDto::from(aql)).await?;
        Ok(Aql::from(stored))
    }

    /// Delete a stored query.
    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.api.delete_aql(id).await?;
        Ok(())
    }

    /// Execute a stored query against the clinical data repository.
    pub async fn execute(&self, id: i64) -> Result<AqlExecutionResult, CoreError> {
        let result = self.api.execute_aql(id).await?;
        Ok(AqlExecutionResult {
            columns: result.columns,
            rows: result.rows,
        })
    }
}
