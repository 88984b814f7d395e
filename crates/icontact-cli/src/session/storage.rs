//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use icontact::{ApiUrl, Session, SessionToken};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
///
/// A session only applies to the account and API it was created for.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub api_url: String,
    pub username: String,
    token: String,
    pub sequence: u64,
    pub created_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(api_url: &ApiUrl, username: &str, session: &Session) -> Self {
        Self {
            api_url: api_url.to_string(),
            username: username.to_string(),
            token: session.token().as_str().to_string(),
            sequence: session.sequence(),
            created_at: Utc::now(),
        }
    }

    /// Returns true if this session was created for the given account.
    pub fn belongs_to(&self, api_url: &ApiUrl, username: &str) -> bool {
        self.api_url == api_url.as_str() && self.username == username
    }

    pub fn session(&self) -> Session {
        Session::new(SessionToken::new(self.token.as_str()), self.sequence)
    }
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "icontact").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk, replacing any stored one.
pub fn save(stored: &StoredSession) -> Result<()> {
    let path = session_path()?;
    let json = serde_json::to_string_pretty(stored)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load the stored session, whichever account it belongs to.
pub fn load() -> Result<Option<StoredSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored = serde_json::from_str(&json).context("Invalid session file")?;
    Ok(Some(stored))
}

/// Load the stored session if it belongs to the given account.
pub fn load_for(api_url: &ApiUrl, username: &str) -> Result<Option<Session>> {
    match load()? {
        Some(stored) if stored.belongs_to(api_url, username) => Ok(Some(stored.session())),
        Some(stored) => {
            debug!(
                stored_username = %stored.username,
                stored_api_url = %stored.api_url,
                "Ignoring session stored for another account"
            );
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Clear the stored session. Returns true if there was one.
pub fn clear() -> Result<bool> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
        return Ok(true);
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_matches_only_its_account() {
        let url = ApiUrl::new("https://api.icontact.com/icp/core/api/v1.0/").unwrap();
        let other = ApiUrl::new("http://localhost:9000/").unwrap();
        let stored = StoredSession::new(&url, "jdoe", &Session::new(SessionToken::new("t"), 3));

        assert!(stored.belongs_to(&url, "jdoe"));
        assert!(!stored.belongs_to(&url, "someone"));
        assert!(!stored.belongs_to(&other, "jdoe"));
        assert_eq!(stored.session().sequence(), 3);
        assert_eq!(stored.session().token().as_str(), "t");
    }
}
