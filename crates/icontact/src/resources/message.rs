//! Message representations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use crate::timestamp;

/// An email message belonging to a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(rename(deserialize = "campaign"), deserialize_with = "de::id")]
    pub campaign_id: u64,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created: DateTime<Utc>,
    #[serde(default, rename(deserialize = "type"))]
    pub message_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename(deserialize = "html_body"))]
    pub body_html: Option<String>,
    #[serde(default, rename(deserialize = "text_body"))]
    pub body_text: Option<String>,
}

/// Content of a message to create. Creating does not send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub campaign_id: u64,
    pub subject: String,
    pub body_html: String,
    pub body_text: String,
}

/// When and to which lists an existing message is sent.
///
/// A message can be scheduled once; later changes go through the web
/// interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSchedule {
    pub list_ids: Vec<u64>,
    pub send_at: DateTime<Utc>,
    pub archive: bool,
}

impl MessageSchedule {
    pub fn new(list_ids: impl IntoIterator<Item = u64>, send_at: DateTime<Utc>) -> Self {
        Self {
            list_ids: list_ids.into_iter().collect(),
            send_at,
            archive: true,
        }
    }

    pub fn with_archive(mut self, archive: bool) -> Self {
        self.archive = archive;
        self
    }
}
