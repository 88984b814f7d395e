//! List subscription representation.

use serde::{Deserialize, Serialize};

use super::de;

/// Subscription state of a contact on a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    Subscribed,
    Unsubscribed,
    Pending,
    Other(String),
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Subscribed => "subscribed",
            SubscriptionStatus::Unsubscribed => "unsubscribed",
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Other(s) => s,
        }
    }
}

impl From<String> for SubscriptionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "subscribed" => SubscriptionStatus::Subscribed,
            "unsubscribed" => SubscriptionStatus::Unsubscribed,
            "pending" => SubscriptionStatus::Pending,
            _ => SubscriptionStatus::Other(s),
        }
    }
}

impl From<SubscriptionStatus> for String {
    fn from(status: SubscriptionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl From<bool> for SubscriptionStatus {
    fn from(subscribed: bool) -> Self {
        if subscribed {
            SubscriptionStatus::Subscribed
        } else {
            SubscriptionStatus::Unsubscribed
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contact's subscription to one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename(deserialize = "id"), deserialize_with = "de::id")]
    pub list_id: u64,
    pub status: SubscriptionStatus,
}

impl Subscription {
    pub fn is_subscribed(&self) -> bool {
        self.status == SubscriptionStatus::Subscribed
    }
}
