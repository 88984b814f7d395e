//! Resource representations.
//!
//! Every value here is built fresh from a single response and owned by the
//! caller. The client keeps no copies.

mod campaign;
mod contact;
pub(crate) mod de;
mod list;
mod message;
mod stats;
mod subscription;

use serde::{Deserialize, Serialize};

pub use campaign::Campaign;
pub use contact::{Contact, ContactDetails, ContactQuery, CustomField};
pub use list::ContactList;
pub use message::{Message, MessageSchedule, NewMessage};
pub use stats::{DeliveryChannel, DeliveryDetails, MessageStats, StatContact, StatKind, StatSummary};
pub use subscription::{Subscription, SubscriptionStatus};

/// Identifier and link of a remote resource, as returned by listings and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    #[serde(default)]
    pub href: Option<String>,
}
