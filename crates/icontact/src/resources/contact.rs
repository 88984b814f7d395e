//! Contact representations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::de;

/// A contact record.
///
/// Only `contact_id` and `email` are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename(deserialize = "id"), deserialize_with = "de::id")]
    pub contact_id: u64,
    pub email: String,
    #[serde(default)]
    pub fname: Option<String>,
    #[serde(default)]
    pub lname: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(
        default,
        rename(deserialize = "custom_fields"),
        deserialize_with = "de::link"
    )]
    pub custom_fields_href: Option<String>,
    #[serde(
        default,
        rename(deserialize = "subscriptions"),
        deserialize_with = "de::link"
    )]
    pub subscriptions_href: Option<String>,
}

/// Fields for creating a contact, or updating one when `contact_id` is set.
///
/// Fields left as `None` are not sent and keep their remote value.
///
/// # Example
///
/// ```
/// use icontact::ContactDetails;
///
/// let mut details = ContactDetails::new("john.doe@nowhere.com");
/// details.fname = Some("John".to_string());
/// assert!(details.contact_id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<u64>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
}

impl ContactDetails {
    /// Details for a new contact with the given email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }
}

impl From<Contact> for ContactDetails {
    fn from(contact: Contact) -> Self {
        Self {
            contact_id: Some(contact.contact_id),
            email: contact.email,
            fname: contact.fname,
            lname: contact.lname,
            prefix: contact.prefix,
            suffix: contact.suffix,
            business: contact.business,
            address1: contact.address1,
            address2: contact.address2,
            city: contact.city,
            state: contact.state,
            zip: contact.zip,
            phone: contact.phone,
            fax: contact.fax,
        }
    }
}

/// Field constraints for a contact search.
///
/// Values may contain `*` wildcards and are compared case-insensitively by
/// the service. An empty query matches every contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
    constraints: BTreeMap<String, String>,
}

impl ContactQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain any contact field, e.g. `state` or `lname`.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constraints.insert(name.into(), value.into());
        self
    }

    pub fn email(self, pattern: impl Into<String>) -> Self {
        self.field("email", pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constraints
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A custom field attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    #[serde(default, rename(deserialize = "formal_name"))]
    pub public_name: Option<String>,
    #[serde(default, rename(deserialize = "type"))]
    pub field_type: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}
