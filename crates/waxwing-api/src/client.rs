// WAX HTTP client
//
// Wraps `reqwest::Client` with the device's cookie + security-token auth
// scheme and the single-retry-after-relogin policy every RPC funnels
// through. Endpoint groups (state, ssid, firmware) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use std::sync::{Mutex, RwLock};
use std::time::Duration;

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::throttle::Throttle;
use crate::transport::TransportConfig;

/// All authenticated RPCs go through this endpoint.
pub(crate) const RPC_PATH: &str = "/socketCommunication";

/// Name of the session cookie set during login step 1.
pub(crate) const SESSION_COOKIE: &str = "lhttpdsid";

/// Device-specific "please re-authenticate" status code.
pub(crate) const REAUTH_STATUS: i64 = 100;

/// Internet-connectivity fields are requested at most this often.
const CONNECTIVITY_CHECK_PERIOD: Duration = Duration::from_secs(3600);

/// Raw HTTP client for a Netgear WAX access point's local API.
///
/// Owns the session artifacts (cookie + security token) and performs the
/// two-step login handshake lazily: any RPC that hits HTTP 401 or the
/// device's status-100 re-auth code triggers exactly one re-login and
/// one retry.
pub struct WaxClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    /// Session cookie + security token, replaced atomically on login.
    /// One lock so re-login and authenticated calls never observe a
    /// half-written cookie/token pair.
    session: RwLock<Session>,
    pub(crate) connectivity_check: Mutex<Throttle>,
}

#[derive(Default)]
struct Session {
    cookie: String,
    token: String,
}

/// Outcome of a single RPC attempt, before the retry policy is applied.
enum PostOutcome {
    Body(serde_json::Value),
    /// HTTP 401.
    Unauthorized,
    /// HTTP 2xx but the body carried `status == 100`.
    ReauthStatus,
}

impl WaxClient {
    /// Create a new client. `base_url` is the device management root,
    /// e.g. `https://192.168.1.34`.
    pub fn new(
        base_url: Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        debug!(%base_url, %username, "creating WAX client");
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, username, password))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
            session: RwLock::new(Session::default()),
            connectivity_check: Mutex::new(Throttle::new(CONNECTIVITY_CHECK_PERIOD)),
        }
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The admin username this client logs in with.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    // ── Session state ────────────────────────────────────────────────

    /// The current session cookie and security-token header values.
    /// Both are empty until the first successful login.
    pub fn auth_headers(&self) -> (String, String) {
        let session = self.session.read().expect("session lock poisoned");
        (session.cookie.clone(), session.token.clone())
    }

    /// Atomically replace the stored session artifacts.
    pub(crate) fn set_session(&self, cookie: String, token: String) {
        *self.session.write().expect("session lock poisoned") = Session { cookie, token };
    }

    /// Attach the session cookie and security-token header, when present.
    pub(crate) fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let (cookie, token) = self.auth_headers();
        let mut builder = builder;
        if !cookie.is_empty() {
            builder = builder.header(reqwest::header::COOKIE, format!("{SESSION_COOKIE}={cookie}"));
        }
        if !token.is_empty() {
            builder = builder.header("security", token);
        }
        builder
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for a device path ("/socketCommunication", ...).
    pub(crate) fn url_for(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}")).expect("invalid API URL")
    }

    // ── RPC primitive ────────────────────────────────────────────────

    /// Send an authenticated RPC and return the parsed JSON body.
    ///
    /// On HTTP 401 or a body with `status == 100`, performs one re-login
    /// and one retry; a second auth failure is surfaced to the caller.
    /// A residual non-zero `status` on a parseable body is logged and
    /// tolerated — the device attaches advisory statuses to otherwise
    /// usable responses.
    pub(crate) async fn post(
        &self,
        payload: &(impl Serialize + Sync),
    ) -> Result<serde_json::Value, Error> {
        let value = match self.post_once(payload).await? {
            PostOutcome::Body(value) => value,
            PostOutcome::Unauthorized | PostOutcome::ReauthStatus => {
                debug!("device requested re-authentication; logging in again");
                self.login().await?;
                match self.post_once(payload).await? {
                    PostOutcome::Body(value) => value,
                    PostOutcome::Unauthorized => return Err(Error::SessionExpired),
                    PostOutcome::ReauthStatus => {
                        return Err(Error::DeviceStatus {
                            status: REAUTH_STATUS,
                        });
                    }
                }
            }
        };

        if let Some(status) = device_status(&value) {
            if status != 0 {
                warn!(status, "device returned non-zero status");
            }
        }

        Ok(value)
    }

    async fn post_once(&self, payload: &(impl Serialize + Sync)) -> Result<PostOutcome, Error> {
        let url = self.url_for(RPC_PATH);
        let builder = self.apply_auth(self.http.post(url).json(payload));
        let resp = builder.send().await.map_err(Error::Transport)?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            return Ok(PostOutcome::Unauthorized);
        }
        let resp = resp.error_for_status().map_err(Error::Transport)?;

        let body = resp.text().await.map_err(Error::Transport)?;
        let value = decode_json(&body)?;

        if device_status(&value) == Some(REAUTH_STATUS) {
            return Ok(PostOutcome::ReauthStatus);
        }
        Ok(PostOutcome::Body(value))
    }
}

// ── Shared decode helpers ────────────────────────────────────────────

/// The top-level `status` field of an RPC response, if numeric.
fn device_status(value: &serde_json::Value) -> Option<i64> {
    value.get("status").and_then(serde_json::Value::as_i64)
}

pub(crate) fn decode_json(body: &str) -> Result<serde_json::Value, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Decode {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

/// A required nested field was absent from an otherwise valid body.
pub(crate) fn missing_field(path: &str, value: &serde_json::Value) -> Error {
    Error::Decode {
        message: format!("missing field `{path}`"),
        body: value.to_string(),
    }
}
