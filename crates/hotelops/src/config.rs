//! CLI configuration: a thin layer over `hotelops_config`.
//!
//! Adds resolution that respects `GlobalOpts` overrides (`--url`,
//! `--api-key`, `--insecure`, `--timeout`) on top of the profile.

use std::time::Duration;

use secrecy::SecretString;

use hotelops_core::{GatewayConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use hotelops_config::{
    Config, Profile, config_path, load_config_or_default, save_config, session_path,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the runtime gateway config from the config file and flags.
pub fn resolve_gateway_config(global: &GlobalOpts) -> Result<GatewayConfig, CliError> {
    resolve_with(global, &load_config_or_default())
}

/// Flag > env > profile > defaults. Without a matching profile, `--url`
/// alone is enough.
pub fn resolve_with(global: &GlobalOpts, cfg: &Config) -> Result<GatewayConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut gateway = if let Some(profile) = cfg.profiles.get(&profile_name) {
        hotelops_config::profile_to_gateway_config(profile, &profile_name, &cfg.defaults)?
    } else if let Some(ref url) = global.url {
        let mut gateway = GatewayConfig::new(hotelops_config::parse_url(url)?);
        gateway.timeout = Duration::from_secs(cfg.defaults.timeout);
        if cfg.defaults.insecure {
            gateway.tls = TlsVerification::DangerAcceptInvalid;
        }
        gateway
    } else if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(cfg),
        });
    } else {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    };

    if let Some(ref url) = global.url {
        gateway.url = hotelops_config::parse_url(url)?;
    }
    if let Some(ref key) = global.api_key {
        gateway.api_key = Some(SecretString::from(key.clone()));
    }
    if global.insecure {
        gateway.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        gateway.timeout = Duration::from_secs(secs);
    }

    Ok(gateway)
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use secrecy::ExposeSecret;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["hotelops"];
        argv.extend_from_slice(args);
        argv.push("dashboard");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_staging() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "staging".into(),
            Profile {
                url: "https://staging.example.com".into(),
                api_key: Some("profile-key".into()),
                timeout: Some(5),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn profile_flag_selects_profile() {
        let cfg = config_with_staging();
        let gateway = resolve_with(&global(&["--profile", "staging"]), &cfg).unwrap();
        assert_eq!(gateway.url.as_str(), "https://staging.example.com/");
        assert_eq!(gateway.timeout, Duration::from_secs(5));
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_staging();
        let gateway = resolve_with(
            &global(&[
                "-p",
                "staging",
                "--url",
                "http://localhost:54321",
                "--api-key",
                "flag-key",
                "--timeout",
                "9",
                "-k",
            ]),
            &cfg,
        )
        .unwrap();
        assert_eq!(gateway.url.as_str(), "http://localhost:54321/");
        assert_eq!(gateway.api_key.unwrap().expose_secret(), "flag-key");
        assert_eq!(gateway.timeout, Duration::from_secs(9));
        assert_eq!(gateway.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn url_alone_is_enough() {
        let gateway = resolve_with(&global(&["--url", "https://abc.example.com"]), &Config::default())
            .unwrap();
        assert_eq!(gateway.url.as_str(), "https://abc.example.com/");
        assert!(gateway.api_key.is_none());
        assert_eq!(gateway.timeout, Duration::from_secs(30));
    }

    #[test]
    fn unknown_named_profile_lists_available() {
        let cfg = config_with_staging();
        let err = resolve_with(&global(&["-p", "prod"]), &cfg).unwrap_err();
        assert!(matches!(
            err,
            CliError::ProfileNotFound { ref name, ref available } if name == "prod" && available == "staging"
        ));
    }

    #[test]
    fn nothing_configured_is_no_config() {
        let err = resolve_with(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn bad_url_flag_is_validation_error() {
        let err = resolve_with(&global(&["--url", "ftp://x"]), &Config::default()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}
