//! icontact - client library for the iContact email-marketing API.
//!
//! All operations flow through an [`IContactClient`], which signs each
//! request with the application's shared secret and manages the login
//! session for you.
//!
//! # Example
//!
//! ```no_run
//! use icontact::{ContactDetails, Credentials, IContactClient};
//!
//! # async fn example() -> Result<(), icontact::Error> {
//! let creds = Credentials::with_password("api-key", "shared-secret", "jdoe", "app-password");
//! let mut client = IContactClient::new(creds)?;
//!
//! let mut details = ContactDetails::new("john.doe@nowhere.com");
//! details.fname = Some("John".to_string());
//! let created = client.add_update_contact(&details).await?;
//!
//! for list in client.lists().await? {
//!     client.contact_change_subscription(created.id, list.id, true).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod timestamp;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Session, SessionToken};
pub use client::IContactClient;
pub use config::ClientConfig;
pub use error::Error;
pub use resources::{
    Campaign, Contact, ContactDetails, ContactList, ContactQuery, CustomField, DeliveryChannel,
    DeliveryDetails, Message, MessageSchedule, MessageStats, NewMessage, ResourceRef, StatContact,
    StatKind, StatSummary, Subscription, SubscriptionStatus,
};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
