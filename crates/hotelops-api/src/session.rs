// Session state shared between the gateway and its consumers.
//
// One `SessionStore` is created by the application root and cloned into the
// gateway. Reads are lock-free snapshots of a `watch` channel; the only
// writers are login, logout, and the gateway's 401 teardown.

use std::sync::Arc;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Profile details returned by the auth backend at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// An authenticated identity: bearer credential plus user identifier.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: SecretString,
    pub user_id: String,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn new(access_token: SecretString, user_id: impl Into<String>) -> Self {
        Self {
            access_token,
            user_id: user_id.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: SessionUser) -> Self {
        self.user = Some(user);
        self
    }
}

/// Observable session lifecycle.
///
/// `Expired` is only ever entered from `Active` by an authorization failure;
/// consumers watch for it to send the user back to login.
#[derive(Debug, Clone, Default)]
pub enum SessionStatus {
    #[default]
    Anonymous,
    Active(Arc<Session>),
    Expired,
}

impl SessionStatus {
    pub fn session(&self) -> Option<&Arc<Session>> {
        match self {
            Self::Active(session) => Some(session),
            Self::Anonymous | Self::Expired => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Process-wide session holder. Cheap to clone; all clones share state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionStatus>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// An empty (anonymous) store.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionStatus::Anonymous);
        Self { tx: Arc::new(tx) }
    }

    /// A store seeded with a previously persisted session.
    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.establish(session);
        store
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> SessionStatus {
        self.tx.borrow().clone()
    }

    /// The active session, if any.
    pub fn current(&self) -> Option<Arc<Session>> {
        self.tx.borrow().session().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().session().is_some()
    }

    /// Subscribe to status changes (login, logout, expiry).
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.tx.subscribe()
    }

    /// Install a freshly authenticated session, replacing any previous one.
    pub fn establish(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        debug!(user_id = %session.user_id, "session established");
        self.tx.send_replace(SessionStatus::Active(Arc::clone(&session)));
        session
    }

    /// Explicit logout. Returns `true` if a session was present.
    pub fn clear(&self) -> bool {
        self.tx.send_if_modified(|status| match status {
            SessionStatus::Active(_) => {
                *status = SessionStatus::Anonymous;
                true
            }
            SessionStatus::Expired => {
                *status = SessionStatus::Anonymous;
                false
            }
            SessionStatus::Anonymous => false,
        })
    }

    /// Tear the session down after an authorization failure.
    ///
    /// Returns `true` only for the call that actually removed an active
    /// session; later failures against an already-cleared store are no-ops
    /// and do not notify subscribers again.
    pub fn expire(&self) -> bool {
        let torn_down = self.tx.send_if_modified(|status| {
            if matches!(status, SessionStatus::Active(_)) {
                *status = SessionStatus::Expired;
                true
            } else {
                false
            }
        });
        if torn_down {
            warn!("session rejected by backend, cleared");
        }
        torn_down
    }

    /// Like [`expire`](Self::expire), but only if `sent` is still the
    /// current session. A rejection of a token that has since been replaced
    /// by a fresh login leaves the new session alone.
    pub fn expire_if_current(&self, sent: &Arc<Session>) -> bool {
        let torn_down = self.tx.send_if_modified(|status| match status {
            SessionStatus::Active(current) if Arc::ptr_eq(current, sent) => {
                *status = SessionStatus::Expired;
                true
            }
            _ => false,
        });
        if torn_down {
            warn!("session rejected by backend, cleared");
        } else {
            debug!(user_id = %sent.user_id, "rejection for a superseded session ignored");
        }
        torn_down
    }
}
