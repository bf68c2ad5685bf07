mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::path::Path;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use hotelops_core::{Hotel, SessionStatus, SessionStore};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "hotelops", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let session_file = config::session_path();
            let store = restore_session(&session_file);

            let gateway_config = config::resolve_gateway_config(&cli.global)?;
            let hotel = Hotel::connect(&gateway_config, store.clone())?;

            debug!(command = ?cmd, "dispatching command");
            let outcome = commands::dispatch(cmd, &hotel, &cli.global).await;
            let persisted = persist_session(&store, &session_file);
            outcome?;
            persisted
        }
    }
}

/// Seed the session store from disk. An unreadable file starts anonymous.
fn restore_session(path: &Path) -> SessionStore {
    match hotelops_config::load_session(path) {
        Ok(Some(session)) => SessionStore::with_session(session),
        Ok(None) => SessionStore::new(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "ignoring unreadable session file");
            SessionStore::new()
        }
    }
}

/// Mirror the in-memory session to disk: write it while active, remove the
/// file once signed out or rejected by the backend.
fn persist_session(store: &SessionStore, path: &Path) -> Result<(), CliError> {
    match store.status() {
        SessionStatus::Active(session) => hotelops_config::save_session(path, &session)?,
        SessionStatus::Anonymous | SessionStatus::Expired => {
            if hotelops_config::clear_session(path)? {
                debug!(path = %path.display(), "session file removed");
            }
        }
    }
    Ok(())
}
