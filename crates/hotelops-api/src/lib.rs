// hotelops-api: Async Rust client for the hotel operations backend (REST tables + auth)

pub mod auth;
pub mod bookings;
pub mod client;
pub mod error;
pub mod menu;
pub mod rooms;
pub mod session;
pub mod supply;
pub mod transport;
pub mod types;

pub use auth::RegisterRequest;
pub use client::Gateway;
pub use error::{Error, FailureKind};
pub use session::{Session, SessionStatus, SessionStore, SessionUser};
pub use transport::{TlsMode, TransportConfig};
