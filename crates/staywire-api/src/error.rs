use thiserror::Error;

/// Top-level error type for the `staywire-api` crate.
///
/// Covers every failure mode across the client: configuration,
/// credential exchange, caller input validation, transport, and
/// structured upstream rejections. The CLI maps these into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Missing or invalid client credentials. Fatal at startup.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ── Authentication ──────────────────────────────────────────────
    /// The credential exchange was rejected or unreachable.
    ///
    /// Never retried automatically -- the failing operation surfaces
    /// this immediately and the next operation attempts a fresh fetch.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Caller input ────────────────────────────────────────────────
    /// A required input field was missing or out of range.
    /// Raised before any network call.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Upstream ────────────────────────────────────────────────────
    /// Non-2xx response from a search, pricing, or content endpoint.
    /// Carries the upstream status and payload verbatim.
    #[error("Upstream error (HTTP {status}): {body}")]
    Upstream { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error came from the credential exchange.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// The upstream HTTP status, if this is an upstream rejection.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" upstream response.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Upstream { status: 404, .. } => true,
            _ => false,
        }
    }
}
