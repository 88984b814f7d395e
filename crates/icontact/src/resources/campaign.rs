//! Campaign representation.

use serde::{Deserialize, Serialize};

use super::de;

/// A campaign: sender identity and postal address used by its messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fromname: Option<String>,
    #[serde(default)]
    pub fromemail: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub publicarchiveurl: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub archivebydefault: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub useaccountaddress: bool,
}
