//! Session obtained from a login call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The opaque token returned by the login call.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Create a new session token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in request parameters.
    ///
    /// # Security
    ///
    /// Use only when constructing requests or persisting the session.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

/// An authenticated session: the login token plus its sequence number.
///
/// Every call other than login sends both values. A session belongs to one
/// client; use [`IContactClient::session`](crate::IContactClient::session)
/// to export it and
/// [`IContactClient::restore_session`](crate::IContactClient::restore_session)
/// to resume it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: SessionToken,
    sequence: u64,
}

impl Session {
    /// Create a session from a token and sequence.
    pub fn new(token: SessionToken, sequence: u64) -> Self {
        Self { token, sequence }
    }

    /// Returns the session token.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Returns the sequence value issued with the token.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_hides_value_in_debug() {
        let session = Session::new(SessionToken::new("tok-abc123"), 7);
        let debug = format!("{:?}", session);
        assert!(!debug.contains("tok-abc123"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains('7'));
    }

    #[test]
    fn session_serializes_token_as_plain_string() {
        let session = Session::new(SessionToken::new("tok"), 3);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json, serde_json::json!({"token": "tok", "sequence": 3}));
    }
}
