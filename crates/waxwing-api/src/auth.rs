// Authentication
//
// Two-step login handshake and session logout. Step 1 fetches the
// `lhttpdsid` session cookie from the device root; step 2 posts the
// credentials envelope and extracts the security token, which older
// firmware returns in a `security` response header and newer firmware
// in the JSON body. The cookie header is parsed by hand because the
// device emits non-standard Set-Cookie attribute lists.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, SET_COOKIE};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;

use crate::client::{RPC_PATH, SESSION_COOKIE, WaxClient};
use crate::error::Error;
use crate::models::{LoginBasicSettings, LoginRequest, LoginResponse, LoginSystem};

impl WaxClient {
    /// Authenticate with the device, replacing any stored session.
    ///
    /// Called automatically by the RPC path when the session expires;
    /// callers only need it for an eager first login.
    pub async fn login(&self) -> Result<(), Error> {
        debug!(username = %self.username(), "logging in");

        // Step 1: unauthenticated GET to the root for the session cookie.
        let resp = self
            .http()
            .get(self.base_url().clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let cookies = parse_set_cookies(resp.headers());
        let cookie = cookies
            .get(SESSION_COOKIE)
            .cloned()
            .ok_or(Error::MissingSessionCookie)?;
        resp.error_for_status().map_err(Error::Transport)?;

        // Step 2: POST credentials with the cookie attached; the security
        // token comes back in a header (older firmware) or the body.
        let body = LoginRequest {
            system: LoginSystem {
                basic_settings: LoginBasicSettings {
                    admin_name: self.username(),
                    admin_passwd: self.password().expose_secret(),
                },
            },
        };

        let resp = self
            .http()
            .post(self.url_for(RPC_PATH))
            .header(
                reqwest::header::COOKIE,
                format!("{SESSION_COOKIE}={cookie}"),
            )
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::CredentialsRejected {
                message: format!("login failed (HTTP {status})"),
            });
        }

        let header_token = resp
            .headers()
            .get("security")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        let token = match header_token {
            Some(token) => token,
            None => {
                let text = resp.text().await.map_err(Error::Transport)?;
                serde_json::from_str::<LoginResponse>(&text)
                    .ok()
                    .and_then(|r| r.system)
                    .and_then(|s| s.security_token)
                    .ok_or(Error::MissingSecurityToken)?
            }
        };

        self.set_session(cookie, token);
        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    ///
    /// The device caps concurrent sessions, so a leaked login can lock
    /// out the next one — always log out on shutdown.
    pub async fn logout(&self) -> Result<(), Error> {
        debug!(username = %self.username(), "logging out");

        let mut body = serde_json::Map::new();
        body.insert(
            self.username().to_owned(),
            Value::String(self.username().to_owned()),
        );

        let builder = self.apply_auth(self.http().post(self.url_for("/logout")).json(&body));
        let resp = builder.send().await.map_err(Error::Transport)?;
        resp.error_for_status().map_err(Error::Transport)?;

        debug!("logout complete");
        Ok(())
    }
}

/// Parse all `Set-Cookie` lines into a name → value map.
///
/// Each line looks like `lhttpdsid=some_value; Path=/; HttpOnly`; only
/// the first `name=value` pair per line is taken, whitespace-trimmed.
/// Duplicate names resolve last-seen-wins.
fn parse_set_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for header in headers.get_all(SET_COOKIE) {
        let Ok(line) = header.to_str() else { continue };
        let pair = line.split(';').next().unwrap_or_default();
        if let Some((name, value)) = pair.split_once('=') {
            cookies.insert(name.trim().to_owned(), value.trim().to_owned());
        }
    }
    cookies
}
