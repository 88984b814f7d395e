//! Mailing list representation.

use serde::{Deserialize, Serialize};

use super::de;

/// A mailing list and its welcome/opt-in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactList {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the account owner receives a copy of each message.
    #[serde(default, deserialize_with = "de::flag")]
    pub ownerreceipt: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub systemwelcome: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub signupwelcome: bool,
    #[serde(default)]
    pub welcome_html: Option<String>,
    #[serde(default)]
    pub welcome_text: Option<String>,
    #[serde(default)]
    pub optin_html: Option<String>,
    #[serde(default)]
    pub optin_text: Option<String>,
}
