// ── Core error types ──
//
// Local validation failures (cart, pricing) never reach the network. Gateway
// failures arrive through `From<hotelops_api::Error>` and keep the four-way
// classification so consumers can branch on it without seeing reqwest types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use hotelops_api::FailureKind;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local validation ─────────────────────────────────────────────
    #[error("Item {item_id} is not available")]
    ItemUnavailable { item_id: String },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("A room number is required to place an order")]
    MissingDestination,

    #[error("Check-out ({check_out}) must be after check-in ({check_in})")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Nightly rate must not be negative (got {rate})")]
    InvalidRate { rate: Decimal },

    #[error("Booking {booking_id} cannot be cancelled: {reason}")]
    NotCancellable {
        booking_id: String,
        reason: &'static str,
    },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    // ── Gateway failures ─────────────────────────────────────────────
    #[error("Cannot reach the backend: {message}")]
    Network { message: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Request rejected: {message}")]
    Validation { status: Option<u16>, message: String },

    #[error("Backend error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// `true` for failures raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::ItemUnavailable { .. }
                | Self::EmptyCart
                | Self::MissingDestination
                | Self::InvalidRange { .. }
                | Self::InvalidRate { .. }
                | Self::NotCancellable { .. }
                | Self::NotFound { .. }
                | Self::Config { .. }
        )
    }

    /// Gateway classification, `None` for local failures.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Network { .. } => Some(FailureKind::Network),
            Self::Auth { .. } => Some(FailureKind::Auth),
            Self::Validation { .. } => Some(FailureKind::Validation),
            Self::Server { .. } => Some(FailureKind::Server),
            _ => None,
        }
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Validation {
            status: None,
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hotelops_api::Error> for CoreError {
    fn from(err: hotelops_api::Error) -> Self {
        match err {
            hotelops_api::Error::Network(e) => {
                let message = if e.is_timeout() {
                    "request timed out".to_owned()
                } else if e.is_connect() {
                    match e.url() {
                        Some(url) => format!("connection to {} failed", url.origin().ascii_serialization()),
                        None => "connection failed".to_owned(),
                    }
                } else {
                    e.to_string()
                };
                CoreError::Network { message }
            }
            hotelops_api::Error::Auth { message } => CoreError::Auth { message },
            hotelops_api::Error::Validation { status, message } => CoreError::Validation {
                status: Some(status),
                message,
            },
            hotelops_api::Error::Server { status, message } => CoreError::Server { status, message },
            hotelops_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hotelops_api::Error::ClientBuild(message) => CoreError::Config { message },
        }
    }
}
