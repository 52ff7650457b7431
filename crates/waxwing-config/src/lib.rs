//! Shared configuration for the waxwing CLI.
//!
//! TOML profiles, credential resolution (keyring + env + plaintext),
//! and translation to `waxwing_core::DeviceConfig`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use waxwing_core::{DeviceConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named access point profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named access point profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Device address: hostname or IP (e.g. "192.168.1.34").
    pub address: String,

    /// HTTPS management port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Admin username.
    #[serde(default = "default_username")]
    pub username: String,

    /// Password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Poll interval for `watch` (seconds).
    pub refresh_interval: Option<u64>,
}

fn default_port() -> u16 {
    443
}
fn default_username() -> String {
    "admin".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "waxwing", "waxwing").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("waxwing");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("WAXWING_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Keyring access ──────────────────────────────────────────────────

/// The keyring entry holding a profile's password.
pub fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        "waxwing",
        &format!("{profile_name}/password"),
    )?)
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a profile's password from the credential chain:
/// env var named by `password_env`, then `WAXWING_PASSWORD`, then the
/// system keyring, then plaintext in the config file.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(pw) = std::env::var(env_name) {
            return Ok(SecretString::from(pw));
        }
    }

    if let Ok(pw) = std::env::var("WAXWING_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `DeviceConfig` from a profile. Callers that take flag
/// overrides fold them into the profile first.
pub fn profile_to_device_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<DeviceConfig, ConfigError> {
    let url = device_url(profile)?;
    let password = resolve_password(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::DangerAcceptInvalid // these devices ship self-signed certs
    };

    Ok(DeviceConfig {
        url,
        username: profile.username.clone(),
        password,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(default_timeout())),
        refresh_interval_secs: profile.refresh_interval.unwrap_or(30),
    })
}

/// The management URL for a profile: `https://{address}:{port}`, with
/// the port elided when it is the HTTPS default.
pub fn device_url(profile: &Profile) -> Result<url::Url, ConfigError> {
    let raw = if profile.port == 443 {
        format!("https://{}", profile.address)
    } else {
        format!("https://{}:{}", profile.address, profile.port)
    };
    raw.parse().map_err(|_| ConfigError::Validation {
        field: "address".into(),
        reason: format!("invalid device address: {}", profile.address),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(address: &str, port: u16) -> Profile {
        Profile {
            address: address.into(),
            port,
            username: default_username(),
            password: Some("pw".into()),
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            refresh_interval: None,
        }
    }

    #[test]
    fn device_url_elides_default_port() {
        let url = device_url(&profile("192.168.1.34", 443)).unwrap();
        assert_eq!(url.as_str(), "https://192.168.1.34/");

        let url = device_url(&profile("ap.lan", 8443)).unwrap();
        assert_eq!(url.as_str(), "https://ap.lan:8443/");
    }

    #[test]
    fn device_url_rejects_garbage() {
        let err = device_url(&profile("not a host", 443)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn profile_translates_to_device_config() {
        let p = profile("192.168.1.34", 443);
        let cfg = profile_to_device_config(&p, "test-profile-translate").unwrap();
        assert_eq!(cfg.url.as_str(), "https://192.168.1.34/");
        assert_eq!(cfg.username, "admin");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(matches!(cfg.tls, TlsVerification::DangerAcceptInvalid));
    }

    #[test]
    fn plaintext_password_is_last_resort() {
        let p = profile("192.168.1.34", 443);
        // No env vars or keyring entries exist for this profile name.
        let pw = resolve_password(&p, "test-profile-plaintext").unwrap();
        use secrecy::ExposeSecret;
        assert_eq!(pw.expose_secret(), "pw");
    }
}
