// Persisted session: `session.json` in the platform data directory.
//
// Holds the bearer token under `token`, the user id under `userId` and the
// profile under `user`. Written on login, removed on logout and whenever
// the backend rejects the token.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use hotelops_core::{Session, SessionUser};

use crate::{ConfigError, data_dir};

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<SessionUser>,
}

/// Canonical location of the session file.
pub fn session_path() -> PathBuf {
    data_dir().join("session.json")
}

/// Read the session at `path`. A missing file is `Ok(None)`.
pub fn load_session(path: &Path) -> Result<Option<Session>, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let stored: StoredSession = serde_json::from_str(&raw)?;
    debug!(user_id = %stored.user_id, "restored session");

    let session = Session::new(SecretString::from(stored.token), stored.user_id);
    Ok(Some(match stored.user {
        Some(user) => session.with_user(user),
        None => session,
    }))
}

/// Write `session` to `path`, owner-readable only on Unix.
pub fn save_session(path: &Path, session: &Session) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let stored = StoredSession {
        token: session.access_token.expose_secret().to_owned(),
        user_id: session.user_id.clone(),
        user: session.user.clone(),
    };
    let json = serde_json::to_string_pretty(&stored)?;
    write_private(path, json.as_bytes())?;
    debug!(path = %path.display(), "session saved");
    Ok(())
}

/// Remove the session file. Returns `true` if one existed.
pub fn clear_session(path: &Path) -> Result<bool, ConfigError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(bytes)
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user() -> SessionUser {
        SessionUser {
            id: "user-42".into(),
            email: Some("ada@example.com".into()),
            first_name: Some("Ada".into()),
            last_name: None,
        }
    }

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("session.json");

        let session = Session::new(SecretString::from("tok".to_string()), "user-42").with_user(user());
        save_session(&path, &session).unwrap();

        let loaded = load_session(&path).unwrap().unwrap();
        assert_eq!(loaded.access_token.expose_secret(), "tok");
        assert_eq!(loaded.user_id, "user-42");
        assert_eq!(loaded.user, Some(user()));

        assert!(clear_session(&path).unwrap());
        assert!(!clear_session(&path).unwrap());
        assert!(load_session(&path).unwrap().is_none());
    }

    #[test]
    fn file_uses_documented_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        save_session(&path, &Session::new(SecretString::from("tok".to_string()), "u-1")).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["token"], "tok");
        assert_eq!(value["userId"], "u-1");
        assert!(value.get("user").is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_session(&path), Err(ConfigError::Session(_))));
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        save_session(&path, &Session::new(SecretString::from("tok".to_string()), "u-1")).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
