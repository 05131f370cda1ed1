// ── AQL editor service ──
//
// Backend validation for the query editor plus the local executability
// heuristic used to enable the "run" action before a full validation.

use std::sync::Arc;

use cohortal_api::ApiClient;

use crate::error::CoreError;
use crate::model::ValidationOutcome;

/// Minimum length a query needs before the executability heuristic even
/// looks at its keywords.
const MIN_EXECUTABLE_LEN: usize = 25;

/// Validation gateway for the query editor.
pub struct AqlEditorService {
    api: Arc<ApiClient>,
}

impl AqlEditorService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Ask the backend validator for a verdict on a candidate query.
    ///
    /// A rejection is a normal outcome, not an error -- callers convert
    /// it into an editor marker via [`ValidationOutcome::to_marker`].
    /// Only transport-level failures surface as `Err`.
    pub async fn validate(&self, query: &str) -> Result<ValidationOutcome, CoreError> {
        let verdict = self.api.validate_aql(query).await?;
        Ok(ValidationOutcome::from(verdict))
    }

    /// Validate and treat a rejection as an error.
    ///
    /// The strict variant for non-editor flows (e.g. saving from the CLI)
    /// where a rejected query must abort the operation.
    pub async fn ensure_valid(&self, query: &str) -> Result<(), CoreError> {
        let outcome = self.validate(query).await?;
        if outcome.valid {
            Ok(())
        } else {
            Err(CoreError::QueryInvalid {
                message: outcome
                    .message
                    .unwrap_or_else(|| "invalid query".to_owned()),
                line: outcome.start_line,
                column: outcome.start_column,
            })
        }
    }

    /// Cheap local check whether a query is plausibly executable:
    /// long enough and containing the four structural AQL keywords.
    /// A positive answer is a hint, not a guarantee -- the backend
    /// validator has the final word.
    pub fn is_executable(query: &str) -> bool {
        let upper = query.to_uppercase();
        upper.len() > MIN_EXECUTABLE_LEN
            && upper.contains("SELECT")
            && upper.contains("FROM")
            && upper.contains("CONTAINS")
            && upper.contains("COMPOSITION")
    }
}
