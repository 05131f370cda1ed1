//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use cohortal_core::CoreError;

/// Exit codes for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const VALIDATION: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("No configuration found")]
    #[diagnostic(
        code(cohortal::no_config),
        help(
            "Create {path} with a [profiles.default] section,\n\
             or pass --api-url, --issuer-url, and --username directly."
        )
    )]
    NoConfig { path: String },

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(cohortal::validation))]
    Validation { field: String, reason: String },

    #[error("Authentication failed")]
    #[diagnostic(
        code(cohortal::auth_failed),
        help(
            "Verify your username and password.\n\
             Set the password via COHORTAL_PASSWORD or password_env in your profile."
        )
    )]
    AuthFailed { message: String },

    #[error("Missing role: requires one of {required}")]
    #[diagnostic(
        code(cohortal::forbidden),
        help("Ask an organization admin to grant you the required role.")
    )]
    Forbidden { required: String },

    #[error("{entity_type} '{identifier}' not found")]
    #[diagnostic(code(cohortal::not_found))]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Query rejected at {line}:{column}: {message}")]
    #[diagnostic(
        code(cohortal::query_invalid),
        help("Fix the query at the reported position and validate again.")
    )]
    QueryInvalid {
        message: String,
        line: u32,
        column: u32,
    },

    #[error("Remote call failed: {message}")]
    #[diagnostic(code(cohortal::remote))]
    Remote { message: String },

    #[error("{message}")]
    #[diagnostic(code(cohortal::rejected))]
    Rejected { message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(cohortal::config))]
    Config { message: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(cohortal::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. } | Self::Config { .. } | Self::Validation { .. } => {
                exit_code::USAGE
            }
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Forbidden { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::QueryInvalid { .. } | Self::Rejected { .. } => exit_code::VALIDATION,
            Self::Remote { .. } => exit_code::CONNECTION,
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthRequired => Self::AuthFailed {
                message: "not logged in".into(),
            },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Forbidden { required } => Self::Forbidden {
                required: required
                    .iter()
                    .map(|r| r.as_wire())
                    .collect::<Vec<_>>()
                    .join(", "),
            },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                entity_type,
                identifier,
            },
            CoreError::QueryInvalid {
                message,
                line,
                column,
            } => Self::QueryInvalid {
                message,
                line,
                column,
            },
            CoreError::Remote { message, .. } => Self::Remote { message },
            CoreError::Rejected { message } => Self::Rejected { message },
            CoreError::Config { message } => Self::Config { message },
            CoreError::Internal(message) => Self::Remote { message },
        }
    }
}

impl From<cohortal_config::ConfigError> for CliError {
    fn from(err: cohortal_config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
