// ── Runtime connection configuration ──
//
// These types describe *how* to reach one access point. They carry
// credential data and connection tuning, but never touch disk. The CLI
// constructs a `DeviceConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Default: these devices ship self-signed certs.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single access point.
///
/// Built by the CLI, passed to `Coordinator` — core never reads config
/// files.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Device management URL (e.g. `https://192.168.1.34`).
    pub url: Url,
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// How often the poll loop refreshes (seconds). 0 = never.
    pub refresh_interval_secs: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            url: "https://192.168.1.34".parse().expect("static URL"),
            username: "admin".into(),
            password: SecretString::from(String::new()),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            refresh_interval_secs: 30,
        }
    }
}
