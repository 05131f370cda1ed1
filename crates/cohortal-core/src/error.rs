// ── Core error types ──
//
// User-facing errors from cohortal-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<cohortal_api::Error>`
// impl translates transport-layer errors into domain-appropriate
// variants. A remote failure leaves the affected cache cell at its last
// good value -- the error only describes why the refresh did not land.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Not logged in -- authentication required")]
    AuthRequired,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Missing role: requires one of {required:?}")]
    Forbidden { required: Vec<crate::model::Role> },

    // ── Remote errors ────────────────────────────────────────────────
    /// The backend call failed; cached state is unchanged.
    #[error("Remote call failed: {message}")]
    Remote {
        message: String,
        /// HTTP status code, if the failure was an HTTP-level rejection.
        status: Option<u16>,
    },

    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Validation errors ────────────────────────────────────────────
    /// The AQL validator rejected the query. Surfaced to the editor as a
    /// marker; never cached.
    #[error("Query validation failed at {line}:{column}: {message}")]
    QueryInvalid {
        message: String,
        line: u32,
        column: u32,
    },

    #[error("Operation rejected: {message}")]
    Rejected { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cohortal_api::Error> for CoreError {
    fn from(err: cohortal_api::Error) -> Self {
        match err {
            cohortal_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cohortal_api::Error::NotLoggedIn => CoreError::AuthRequired,
            cohortal_api::Error::Api { status, message } => CoreError::Remote {
                message: if message.is_empty() {
                    format!("HTTP {status}")
                } else {
                    message
                },
                status: Some(status),
            },
            cohortal_api::Error::Transport(e) => CoreError::Remote {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            cohortal_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            cohortal_api::Error::Tls(message) => CoreError::Remote {
                message: format!("TLS: {message}"),
                status: None,
            },
            cohortal_api::Error::Deserialization { message, .. } => CoreError::Remote {
                message: format!("malformed response: {message}"),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_errors_map_to_remote() {
        let err = CoreError::from(cohortal_api::Error::Api {
            status: 503,
            message: "maintenance".into(),
        });
        assert!(matches!(
            err,
            CoreError::Remote {
                status: Some(503),
                ..
            }
        ));
    }

    #[test]
    fn missing_login_maps_to_auth_required() {
        let err = CoreError::from(cohortal_api::Error::NotLoggedIn);
        assert!(matches!(err, CoreError::AuthRequired));
    }
}
