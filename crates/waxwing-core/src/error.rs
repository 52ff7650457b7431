// ── Core error types ──
//
// User-facing errors from waxwing-core. These are NOT wire-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<waxwing_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to device at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Device request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("SSID not found: {group_id}")]
    SsidNotFound { group_id: String },

    #[error("No device data available yet -- poll has not completed")]
    NoData,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Device rejected the request: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<waxwing_api::Error> for CoreError {
    fn from(err: waxwing_api::Error) -> Self {
        match err {
            waxwing_api::Error::MissingSessionCookie
            | waxwing_api::Error::MissingSecurityToken => CoreError::AuthenticationFailed {
                message: err.to_string(),
            },
            waxwing_api::Error::CredentialsRejected { message } => {
                CoreError::AuthenticationFailed { message }
            }
            waxwing_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication did not recover it".into(),
            },
            waxwing_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            waxwing_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            waxwing_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            waxwing_api::Error::Decode { message, body: _ } => {
                CoreError::Internal(format!("Decode error: {message}"))
            }
            waxwing_api::Error::DeviceStatus { status } => CoreError::Rejected {
                message: format!("device status {status}"),
            },
        }
    }
}
