use thiserror::Error;

/// Top-level error type for the `hotelops-api` crate.
///
/// Every gateway call resolves to a decoded value or one of these. The four
/// request-time failures (`Network`, `Auth`, `Validation`, `Server`) are the
/// ones callers are expected to branch on; the rest only occur while building
/// a [`Gateway`](crate::Gateway). `hotelops-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Request failures ────────────────────────────────────────────
    /// No usable response: connection refused, DNS failure, timeout, or the
    /// body could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP 401, or rejected credentials on the auth endpoints. When a session
    /// was active it has already been torn down by the time this is returned.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// HTTP 4xx other than 401, or a successful response whose body does not
    /// match the expected schema.
    #[error("Request rejected (HTTP {status}): {message}")]
    Validation { status: u16, message: String },

    /// HTTP 5xx.
    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    // ── Construction ────────────────────────────────────────────────
    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built (TLS material, header values).
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Four-way classification of request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Auth,
    Validation,
    Server,
}

impl Error {
    /// Classify this error. Construction errors count as validation failures
    /// since they stem from bad local input.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) => FailureKind::Network,
            Self::Auth { .. } => FailureKind::Auth,
            Self::Server { .. } => FailureKind::Server,
            Self::Validation { .. } | Self::InvalidUrl(_) | Self::ClientBuild(_) => {
                FailureKind::Validation
            }
        }
    }

    /// Returns `true` if this error tore down (or would have torn down) the session.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Auth { .. } => Some(401),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) | Self::ClientBuild(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classifies_request_failures() {
        let auth = Error::Auth {
            message: "jwt expired".into(),
        };
        assert_eq!(auth.kind(), FailureKind::Auth);
        assert!(auth.is_auth());
        assert_eq!(auth.status(), Some(401));

        let rejected = Error::Validation {
            status: 422,
            message: "bad".into(),
        };
        assert_eq!(rejected.kind(), FailureKind::Validation);
        assert!(!rejected.is_auth());

        let server = Error::Server {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(server.kind(), FailureKind::Server);
        assert_eq!(server.status(), Some(503));
    }

    #[test]
    fn construction_errors_count_as_validation() {
        let err = Error::ClientBuild("bad header".into());
        assert_eq!(err.kind(), FailureKind::Validation);
        assert_eq!(err.status(), None);
    }
}
