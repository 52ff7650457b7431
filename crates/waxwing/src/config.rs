//! CLI-side configuration glue: profile selection and CLI flag overrides
//! on top of `waxwing_config`.
//!
//! Core never sees these types -- it receives a pre-built `DeviceConfig`.

use waxwing_config::{
    Config, ConfigError, Profile, load_config_or_default, profile_to_device_config,
};
use waxwing_core::DeviceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name to use: `--profile`, then the config file's
/// `default_profile`, then "default".
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `DeviceConfig` from the config file, profile, and CLI overrides.
pub fn build_device_config(global: &GlobalOpts) -> Result<DeviceConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global);
    }

    // --profile named a profile that does not exist
    if global.profile.is_some() {
        let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    // No profile at all -- build from CLI flags / env vars alone.
    let address = global.device.clone().ok_or_else(|| CliError::NoConfig {
        path: waxwing_config::config_path().display().to_string(),
    })?;

    let flags_profile = Profile {
        address,
        port: 443,
        username: global.username.clone().unwrap_or_else(|| "admin".into()),
        password: None,
        password_env: None,
        ca_cert: None,
        insecure: Some(global.insecure),
        timeout: Some(global.timeout),
        refresh_interval: None,
    };
    resolve_profile(&flags_profile, &profile_name, global)
}

/// Resolve a profile into a `DeviceConfig`: fold CLI flag overrides
/// into the profile, then let the config crate do the translation.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<DeviceConfig, CliError> {
    let mut profile = clone_profile(profile);

    if let Some(ref address) = global.device {
        profile.address.clone_from(address);
    }
    if let Some(ref username) = global.username {
        profile.username.clone_from(username);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if profile.timeout.is_none() {
        profile.timeout = Some(global.timeout);
    }

    profile_to_device_config(&profile, profile_name).map_err(|err| match err {
        ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
        other => CliError::Config(other),
    })
}

// Profile does not derive Clone (it can carry a plaintext password).
fn clone_profile(profile: &Profile) -> Profile {
    Profile {
        address: profile.address.clone(),
        port: profile.port,
        username: profile.username.clone(),
        password: profile.password.clone(),
        password_env: profile.password_env.clone(),
        ca_cert: profile.ca_cert.clone(),
        insecure: profile.insecure,
        timeout: profile.timeout,
        refresh_interval: profile.refresh_interval,
    }
}
