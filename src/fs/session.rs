//! Session persistence.
//!
//! The backend issues a credential token and a user profile at login
//! (outside this client's scope); both are stored together in
//! `.mediquote/session.json`, read once at startup, and removed wholesale
//! on logout. A session counts as authenticated only when both the token
//! and the profile email are present.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Profile half of the persisted session.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Persisted credential + profile, as written by the login tooling.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: String,
    pub user: UserProfile,
}

impl PersistedSession {
    /// Converts to a live session, or `None` when the token or email is
    /// missing (matching the authenticated-only-with-both rule).
    #[must_use]
    pub fn into_session(self) -> Option<UserSession> {
        if self.token.is_empty() || self.user.email.is_empty() {
            return None;
        }
        Some(UserSession {
            token: self.token,
            email: self.user.email,
            name: self.user.name,
        })
    }
}

/// In-memory session used by the UI for the lifetime of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub token: String,
    pub email: String,
    pub name: String,
}

impl UserSession {
    /// Name shown in the header greeting; falls back to the email when no
    /// display name was stored.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Loads the session from the given path.
///
/// A missing file yields `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_session(path: &Path) -> Result<Option<PersistedSession>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).context("Failed to read session file")?;
    let session = serde_json::from_str(&content).context("Failed to parse session file")?;
    Ok(Some(session))
}

/// Saves the session to the given path as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_session(path: &Path, session: &PersistedSession) -> Result<()> {
    let json = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
    std::fs::write(path, json).context("Failed to write session file")
}
