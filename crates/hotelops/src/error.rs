//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use hotelops_config::ConfigError;
use hotelops_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend: {message}")]
    #[diagnostic(
        code(hotelops::connection_failed),
        help(
            "Check the profile URL and your network connection.\n\
             Override it for one call with: hotelops --url <URL> ..."
        )
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hotelops::auth_failed),
        help("Sign in again with: hotelops login --email <EMAIL>")
    )]
    AuthFailed { message: String },

    #[error("Not signed in")]
    #[diagnostic(
        code(hotelops::not_signed_in),
        help("Sign in with: hotelops login --email <EMAIL>")
    )]
    NotSignedIn,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(hotelops::not_found),
        help("Run: hotelops {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{what} is not available")]
    #[diagnostic(code(hotelops::unavailable))]
    Unavailable { what: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("Request rejected{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(hotelops::rejected))]
    Rejected { status: Option<u16>, message: String },

    #[error("Backend error (HTTP {status}): {message}")]
    #[diagnostic(
        code(hotelops::server_error),
        help("The backend failed to handle the request. Try again shortly.")
    )]
    ServerError { status: u16, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hotelops::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hotelops::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: hotelops config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(hotelops::no_config),
        help(
            "Create a profile with: hotelops config init\n\
             Or pass --url (HOTELOPS_URL). Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("{0}")]
    #[diagnostic(code(hotelops::config))]
    Config(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render {format} output: {message}")]
    #[diagnostic(code(hotelops::render))]
    Render {
        format: &'static str,
        message: String,
    },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotSignedIn => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Rejected { .. } | Self::Unavailable { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

fn list_command(entity_type: &str) -> &'static str {
    match entity_type {
        "Room" => "rooms list",
        "Booking" => "bookings list",
        "Menu item" => "menu list",
        "Order" => "orders list",
        "Inventory item" => "inventory list",
        "Supplier" => "suppliers list",
        _ => "--help",
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemUnavailable { item_id } => CliError::Unavailable {
                what: format!("'{item_id}'"),
            },

            CoreError::EmptyCart => CliError::Validation {
                field: "item".into(),
                reason: "the order has no items".into(),
            },

            CoreError::MissingDestination => CliError::Validation {
                field: "room".into(),
                reason: "a room number is required to place an order".into(),
            },

            CoreError::InvalidRange { check_in, check_out } => CliError::Validation {
                field: "check-out".into(),
                reason: format!("{check_out} must be after check-in {check_in}"),
            },

            CoreError::InvalidRate { rate } => CliError::Validation {
                field: "rate".into(),
                reason: format!("must not be negative (got {rate})"),
            },

            CoreError::NotCancellable { booking_id, reason } => CliError::Validation {
                field: "booking".into(),
                reason: format!("{booking_id} cannot be cancelled: {reason}"),
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                resource_type: entity_type.into(),
                identifier,
                list_command: list_command(entity_type).into(),
            },

            CoreError::Network { message } => CliError::ConnectionFailed { message },
            CoreError::Auth { message } => CliError::AuthFailed { message },
            CoreError::Validation { status, message } => CliError::Rejected { status, message },
            CoreError::Server { status, message } => CliError::ServerError { status, message },
            CoreError::Config { message } => CliError::Config(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other.to_string()),
        }
    }
}
