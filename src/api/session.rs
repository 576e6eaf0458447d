//! Auth Session
//!
//! The bearer token and primary role of the signed-in user. A [`Session`] is
//! passed explicitly to whatever needs it; [`SessionStore`] persists it
//! between runs the way the web app kept it in local storage.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Role that unlocks the user, resident and shop-owner directories
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Credentials of the current user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl Session {
    /// Build a session from a login: the first role is the primary one
    pub fn from_login(token: impl Into<String>, roles: &[String]) -> Self {
        Self {
            token: Some(token.into()),
            role: roles.first().cloned(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.role() == Some(ADMIN_ROLE)
    }
}

/// File-backed persistence for the session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session; no file means signed out
    pub fn hydrate(&self) -> Result<Session, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "No persisted session");
                return Ok(Session::default());
            }
            Err(e) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    error: e.to_string(),
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }

    /// Persist the session, creating parent directories as needed.
    /// On unix the file is readable by its owner only.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let io_err = |e: std::io::Error| SessionError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(session).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(io_err)?;
        // mode() only applies to new files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }
        file.write_all(content.as_bytes()).map_err(io_err)?;

        tracing::debug!(path = ?self.path, "Session saved");
        Ok(())
    }

    /// Forget the persisted session (logout). Clearing twice is fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io {
                path: self.path.clone(),
                error: e.to_string(),
            }),
        }
    }
}

/// Session persistence errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to access session file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Corrupt session file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: String },
}
