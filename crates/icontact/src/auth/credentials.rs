//! Application credentials type.

use std::fmt;

use md5::{Digest, Md5};

/// Credentials identifying an API application and the account it acts for.
///
/// The API key and shared secret are issued when the application is
/// registered with iContact. The username is the account's web login and
/// the password is the separate "API application password", stored only as
/// its MD5 hex digest.
///
/// # Security
///
/// The shared secret and password digest are never exposed in Debug output.
///
/// # Example
///
/// ```
/// use icontact::Credentials;
///
/// let creds = Credentials::with_password("key", "secret", "jdoe", "app-password");
/// assert_eq!(creds.username(), "jdoe");
/// assert_eq!(creds.password_md5().len(), 32);
/// ```
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    shared_secret: String,
    username: String,
    password_md5: String,
}

impl Credentials {
    /// Create credentials from an already-hashed application password.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The application's API key
    /// * `shared_secret` - The application's shared secret
    /// * `username` - The iContact account username
    /// * `password_md5` - MD5 hex digest of the API application password
    pub fn new(
        api_key: impl Into<String>,
        shared_secret: impl Into<String>,
        username: impl Into<String>,
        password_md5: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            shared_secret: shared_secret.into(),
            username: username.into(),
            password_md5: password_md5.into().to_ascii_lowercase(),
        }
    }

    /// Create credentials from the plain application password.
    ///
    /// Only the digest is kept.
    pub fn with_password(
        api_key: impl Into<String>,
        shared_secret: impl Into<String>,
        username: impl Into<String>,
        password: &str,
    ) -> Self {
        Self::new(api_key, shared_secret, username, hash_password(password))
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the account username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the MD5 hex digest of the application password.
    ///
    /// # Security
    ///
    /// It is part of the login path. Never log or display this value.
    pub fn password_md5(&self) -> &str {
        &self.password_md5
    }

    pub(crate) fn shared_secret(&self) -> &str {
        &self.shared_secret
    }
}

/// MD5 hex digest of an application password, as the login call expects it.
pub fn hash_password(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("username", &self.username)
            .field("shared_secret", &"[REDACTED]")
            .field("password_md5", &"[REDACTED]")
            .finish()
    }
}
