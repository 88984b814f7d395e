//! Message delivery statistics.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use crate::error::{Error, InvalidInputError};
use crate::timestamp;

/// Kinds of recipient action whose contacts can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Opens,
    Clicks,
    Bounces,
    Unsubscribes,
    Forwards,
}

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Opens,
        StatKind::Clicks,
        StatKind::Bounces,
        StatKind::Unsubscribes,
        StatKind::Forwards,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Opens => "opens",
            StatKind::Clicks => "clicks",
            StatKind::Bounces => "bounces",
            StatKind::Unsubscribes => "unsubscribes",
            StatKind::Forwards => "forwards",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                InvalidInputError::Other {
                    message: format!("unknown statistic kind '{s}'"),
                }
                .into()
            })
    }
}

/// Totals for one statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    #[serde(default, deserialize_with = "de::count")]
    pub count: u64,
    /// Distinct contacts; only reported for opens and clicks.
    #[serde(default, deserialize_with = "de::optional_count")]
    pub unique: Option<u64>,
    #[serde(default, deserialize_with = "de::number")]
    pub percent: f64,
    #[serde(default)]
    pub href: Option<String>,
}

/// A contact who performed the requested action, with when they did it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatContact {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_vec")]
    pub dates: Vec<DateTime<Utc>>,
}

/// Statistics for a sent message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageStats {
    #[serde(default)]
    pub released: Option<StatSummary>,
    #[serde(default)]
    pub bounces: Option<StatSummary>,
    #[serde(default)]
    pub unsubscribes: Option<StatSummary>,
    #[serde(default)]
    pub opens: Option<StatSummary>,
    #[serde(default)]
    pub clicks: Option<StatSummary>,
    #[serde(default)]
    pub forwards: Option<StatSummary>,
    #[serde(default)]
    pub comments: Option<StatSummary>,
    #[serde(default)]
    pub complaints: Option<StatSummary>,
    /// Populated only when a specific [`StatKind`] was requested.
    #[serde(default)]
    pub contacts: Vec<StatContact>,
}

impl MessageStats {
    pub fn summary(&self, kind: StatKind) -> Option<&StatSummary> {
        match kind {
            StatKind::Opens => self.opens.as_ref(),
            StatKind::Clicks => self.clicks.as_ref(),
            StatKind::Bounces => self.bounces.as_ref(),
            StatKind::Unsubscribes => self.unsubscribes.as_ref(),
            StatKind::Forwards => self.forwards.as_ref(),
        }
    }
}

/// A list a message was delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryChannel {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Recipients on this list.
    #[serde(default, deserialize_with = "de::count")]
    pub count: u64,
}

/// Delivery summary of a sent message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub stats: MessageStats,
    pub channels: Vec<DeliveryChannel>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Clicks".parse::<StatKind>().unwrap(), StatKind::Clicks);
        assert!("likes".parse::<StatKind>().is_err());
    }

    #[test]
    fn summary_totals_accept_string_attributes() {
        let stats: MessageStats = serde_json::from_value(json!({
            "opens": {"count": "30", "unique": "25", "percent": "25.0"}
        }))
        .unwrap();
        let opens = stats.summary(StatKind::Opens).unwrap();
        assert_eq!(opens.count, 30);
        assert_eq!(opens.unique, Some(25));
        assert_eq!(opens.percent, 25.0);
    }

    #[test]
    fn stats_parse_contacts_and_dates() {
        let stats: MessageStats = serde_json::from_value(json!({
            "released": {"count": "120", "percent": 100.0},
            "opens": {"count": 30, "unique": 25, "percent": 25.0, "href": "/message/9/stats/opens"},
            "contacts": [
                {
                    "email": "a@b.com",
                    "name": "A",
                    "dates": ["2008-06-02 10:00:00", "2008-06-03T09:00:00Z"]
                }
            ]
        }))
        .unwrap();
        assert_eq!(stats.released.as_ref().unwrap().count, 120);
        assert_eq!(stats.summary(StatKind::Opens).unwrap().unique, Some(25));
        assert!(stats.summary(StatKind::Clicks).is_none());
        assert_eq!(stats.contacts[0].dates.len(), 2);
    }
}
