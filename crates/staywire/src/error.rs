//! CLI error types with miette diagnostics.
//!
//! Maps `staywire_api::Error` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use staywire_config::ConfigError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UPSTREAM: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(staywire::no_credentials),
        help(
            "Set STAYWIRE_CLIENT_ID and STAYWIRE_CLIENT_SECRET,\n\
             or add them to a profile in {path}"
        )
    )]
    NoCredentials { profile: String, path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(staywire::config))]
    Config { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(staywire::auth_failed),
        help(
            "The credential exchange was rejected.\n\
             Verify the client id/secret pair and the selected environment:\n\
             {detail}"
        )
    )]
    AuthFailed { detail: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(staywire::validation))]
    Validation { field: String, reason: String },

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("Upstream rejected the request (HTTP {status})")]
    #[diagnostic(code(staywire::upstream), help("Upstream payload:\n{body}"))]
    Upstream { status: u16, body: String },

    #[error("{resource} '{identifier}' not found")]
    #[diagnostic(code(staywire::not_found))]
    NotFound {
        resource: &'static str,
        identifier: String,
    },

    // ── Transport ────────────────────────────────────────────────────
    #[error("Could not reach the upstream service")]
    #[diagnostic(
        code(staywire::connection_failed),
        help("Check network connectivity and the environment selector.\nDetail: {detail}")
    )]
    ConnectionFailed { detail: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Upstream { .. } => exit_code::UPSTREAM,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Validation { .. } => exit_code::USAGE,
            Self::NoCredentials { .. } | Self::Config { .. } => exit_code::GENERAL,
        }
    }
}

// ── staywire_api::Error → CliError mapping ───────────────────────────

impl From<staywire_api::Error> for CliError {
    fn from(err: staywire_api::Error) -> Self {
        use staywire_api::Error as Api;

        match err {
            Api::Configuration { message } => Self::Config { message },

            Api::Authentication { message } => Self::AuthFailed { detail: message },

            Api::Validation { field, reason } => Self::Validation {
                field: field.into(),
                reason,
            },

            Api::Upstream { status: 404, body } => Self::NotFound {
                resource: "resource",
                identifier: body,
            },

            Api::Upstream { status, body } => Self::Upstream { status, body },

            Api::Transport(e) => Self::ConnectionFailed {
                detail: e.to_string(),
            },

            Api::InvalidUrl(e) => Self::Config {
                message: format!("invalid base URL: {e}"),
            },

            Api::Deserialization { message, .. } => Self::Upstream {
                status: 0,
                body: format!("unparseable upstream response: {message}"),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials {
                profile,
                path: staywire_config::config_path().display().to_string(),
            },
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
