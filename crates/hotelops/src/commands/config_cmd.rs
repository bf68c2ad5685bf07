//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Confirm, Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the plaintext API key.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "url = \"{}\"", p.url);
        if p.api_key.is_some() {
            let _ = writeln!(out, "api_key = \"****\"");
        }
        if let Some(ref env) = p.api_key_env {
            let _ = writeln!(out, "api_key_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

/// Ask for the anon key and where to keep it. Returns the profile fields
/// `(api_key, api_key_env)`.
fn prompt_api_key(profile_name: &str) -> Result<(Option<String>, Option<String>), CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Read from an environment variable",
        "Save to config file (plaintext)",
        "No API key",
    ];
    let selection = Select::new()
        .with_prompt("Anon API key")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match selection {
        0 | 2 => {
            let key = rpassword::prompt_password("API key: ").map_err(prompt_err)?;
            if key.is_empty() {
                return Err(CliError::Validation {
                    field: "api_key".into(),
                    reason: "API key cannot be empty".into(),
                });
            }
            if selection == 0 {
                hotelops_config::store_api_key(profile_name, &key)?;
                eprintln!("   ✓ API key stored in system keyring");
                Ok((None, None))
            } else {
                Ok((Some(key), None))
            }
        }
        1 => {
            let var: String = Input::new()
                .with_prompt("Environment variable")
                .default("HOTELOPS_API_KEY".into())
                .interact_text()
                .map_err(prompt_err)?;
            Ok((None, Some(var)))
        }
        _ => Ok((None, None)),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("hotelops configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config_or_default();

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(global.profile.clone().unwrap_or_else(|| "default".into()))
                .interact_text()
                .map_err(prompt_err)?;

            let url: String = Input::new()
                .with_prompt("Backend URL")
                .default("https://your-project.supabase.co".into())
                .interact_text()
                .map_err(prompt_err)?;
            hotelops_config::parse_url(&url)?;

            let (api_key, api_key_env) = prompt_api_key(&profile_name)?;

            let insecure = Confirm::new()
                .with_prompt("Accept self-signed TLS certificates?")
                .default(false)
                .interact()
                .map_err(prompt_err)?;

            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    url,
                    api_key,
                    api_key_env,
                    insecure: insecure.then_some(true),
                    ..Profile::default()
                },
            );
            if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }

            config::save_config(&cfg)?;
            output::notice(
                global,
                &format!("Profile '{profile_name}' saved to {}", config_path.display()),
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let active = config::active_profile_name(global, &cfg);
            let out = output::render_single(&global.output, &redacted(cfg), format_config_redacted, |_| {
                active.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            let out = format!(
                "config  {}\nsession {}",
                config::config_path().display(),
                config::session_path().display()
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Copy of `cfg` with plaintext keys masked, for structured output.
fn redacted(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.api_key.is_some() {
            profile.api_key = Some("****".into());
        }
    }
    cfg
}
