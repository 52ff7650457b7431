use thiserror::Error;

/// Top-level error type for the `waxwing-api` crate.
///
/// Covers the login handshake, the authenticated RPC path, and wire-format
/// decoding. `waxwing-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login step 1 did not yield the `lhttpdsid` session cookie.
    #[error("login response did not set the `lhttpdsid` session cookie")]
    MissingSessionCookie,

    /// Login step 2 carried no security token, neither in the `security`
    /// response header (older firmware) nor in the JSON body (newer firmware).
    #[error("login response carried no security token in header or body")]
    MissingSecurityToken,

    /// The device rejected the supplied credentials.
    #[error("credentials rejected: {message}")]
    CredentialsRejected { message: String },

    /// A request hit HTTP 401 even after a fresh re-login.
    #[error("session expired and re-login did not recover it")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, non-2xx, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed or an expected nested field was absent.
    /// Keeps the raw body for debugging.
    #[error("failed to decode device response: {message}")]
    Decode { message: String, body: String },

    /// The device still reported a fatal status code after the single
    /// automatic re-login retry.
    #[error("device reported status {status} after re-login")]
    DeviceStatus { status: i64 },
}
