// 🔐 Session Guard - single-credential login gate
// Gates every view; the only state that survives a restart.
//
// This is a pure equality check against one hardcoded pair, not an
// authentication protocol. The stored session is a serialized
// { "username": ... } object read once at startup.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The single valid credential pair
pub const VALID_USERNAME: &str = "admin";
pub const VALID_PASSWORD: &str = "karate2024";

/// Environment override for the session file location
pub const SESSION_FILE_ENV: &str = "KUMITE_SESSION_FILE";

/// Default session file, relative to the working directory
pub const DEFAULT_SESSION_FILE: &str = "karate_session.json";

// ============================================================================
// SESSION USER
// ============================================================================

/// The logged-in user. No roles, no expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

// ============================================================================
// SESSION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Generic failure shown to the user; never says which field was wrong
    InvalidCredentials,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidCredentials => write!(f, "Invalid username or password"),
        }
    }
}

impl std::error::Error for SessionError {}

// ============================================================================
// SESSION GUARD
// ============================================================================

/// Holds the "logged in" flag and mirrors it to the session file.
pub struct SessionGuard {
    user: Option<SessionUser>,
    store_path: PathBuf,
}

impl SessionGuard {
    /// Create a guard with no active session, using the default store path
    /// (or the KUMITE_SESSION_FILE override).
    pub fn new() -> Self {
        let store_path = std::env::var(SESSION_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        SessionGuard {
            user: None,
            store_path,
        }
    }

    /// Create a guard with an explicit store path (used by tests)
    pub fn with_store_path<P: AsRef<Path>>(path: P) -> Self {
        SessionGuard {
            user: None,
            store_path: path.as_ref().to_path_buf(),
        }
    }

    /// Attempt login. Succeeds only for the hardcoded pair; on success the
    /// session is held in memory and persisted to the session file.
    pub fn login(&mut self, username: &str, password: &str) -> Result<SessionUser, SessionError> {
        if username == VALID_USERNAME && password == VALID_PASSWORD {
            let user = SessionUser {
                username: username.to_string(),
            };
            self.user = Some(user.clone());
            self.persist();
            Ok(user)
        } else {
            Err(SessionError::InvalidCredentials)
        }
    }

    /// Clear the session and remove the session file.
    pub fn logout(&mut self) {
        self.user = None;
        let _ = fs::remove_file(&self.store_path);
    }

    /// Read the session file once at startup. A corrupt file is discarded
    /// and removed, leaving no session.
    pub fn restore(&mut self) -> Result<()> {
        if !self.store_path.exists() {
            return Ok(());
        }

        let raw = fs::read_to_string(&self.store_path)?;
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => {
                self.user = Some(user);
            }
            Err(_) => {
                eprintln!("Failed to parse stored session data");
                let _ = fs::remove_file(&self.store_path);
            }
        }

        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    // Best-effort write; a failed write still leaves the in-memory session
    // valid for this run.
    fn persist(&self) {
        if let Some(user) = &self.user {
            if let Ok(json) = serde_json::to_string(user) {
                if let Err(e) = fs::write(&self.store_path, json) {
                    eprintln!("Failed to write session file: {}", e);
                }
            }
        }
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn guard_in(dir: &tempfile::TempDir) -> SessionGuard {
        SessionGuard::with_store_path(dir.path().join("session.json"))
    }

    #[test]
    fn test_login_with_valid_credentials() {
        let dir = tempdir().unwrap();
        let mut guard = guard_in(&dir);

        let user = guard.login(VALID_USERNAME, VALID_PASSWORD).unwrap();
        assert_eq!(user.username, "admin");
        assert!(guard.is_authenticated());
        assert!(guard.store_path().exists());
    }

    #[test]
    fn test_login_with_invalid_credentials() {
        let dir = tempdir().unwrap();
        let mut guard = guard_in(&dir);

        assert_eq!(
            guard.login("admin", "wrong"),
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(
            guard.login("root", VALID_PASSWORD),
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(guard.login("", ""), Err(SessionError::InvalidCredentials));

        assert!(!guard.is_authenticated());
        assert!(!guard.store_path().exists());
    }

    #[test]
    fn test_logout_clears_session_and_file() {
        let dir = tempdir().unwrap();
        let mut guard = guard_in(&dir);

        guard.login(VALID_USERNAME, VALID_PASSWORD).unwrap();
        guard.logout();

        assert!(!guard.is_authenticated());
        assert!(guard.current_user().is_none());
        assert!(!guard.store_path().exists());
    }

    #[test]
    fn test_restore_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut guard = SessionGuard::with_store_path(&path);
        guard.login(VALID_USERNAME, VALID_PASSWORD).unwrap();

        // Fresh guard, same file - simulates a restart
        let mut restored = SessionGuard::with_store_path(&path);
        restored.restore().unwrap();

        assert!(restored.is_authenticated());
        assert_eq!(restored.current_user().unwrap().username, "admin");
    }

    #[test]
    fn test_restore_discards_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let mut guard = SessionGuard::with_store_path(&path);
        guard.restore().unwrap();

        assert!(!guard.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn test_restore_with_no_file_is_noop() {
        let dir = tempdir().unwrap();
        let mut guard = guard_in(&dir);

        guard.restore().unwrap();
        assert!(!guard.is_authenticated());
    }
}
