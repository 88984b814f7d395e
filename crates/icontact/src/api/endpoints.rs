//! Endpoint call paths and request/response types.

use serde::{Deserialize, Serialize};

use crate::resources::{
    Campaign, Contact, ContactDetails, ContactList, CustomField, DeliveryChannel, Message,
    MessageStats, ResourceRef, StatKind, Subscription, SubscriptionStatus, de,
};

// ============================================================================
// Call Paths
// ============================================================================

pub const LISTS: &str = "lists";
pub const CAMPAIGNS: &str = "campaigns";
pub const CONTACTS: &str = "contacts";
pub const CONTACT: &str = "contact";
pub const MESSAGE: &str = "message";

/// Message the service returns when a session token is stale.
pub const STALE_AUTHORIZATION_MESSAGE: &str = "Authorization problem. Access not allowed.";

/// Category attached to list channels of a sending schedule.
pub const SCHEDULE_CATEGORY: &str = "hidden";

pub fn login(username: &str, password_md5: &str) -> String {
    format!("auth/login/{username}/{password_md5}")
}

pub fn list(list_id: u64) -> String {
    format!("list/{list_id}")
}

pub fn campaign(campaign_id: u64) -> String {
    format!("campaign/{campaign_id}")
}

pub fn contact(contact_id: u64) -> String {
    format!("contact/{contact_id}")
}

pub fn contact_subscription(contact_id: u64, list_id: u64) -> String {
    format!("contact/{contact_id}/subscription/{list_id}")
}

pub fn contact_custom_fields(contact_id: u64) -> String {
    format!("contact/{contact_id}/custom_fields")
}

pub fn contact_subscriptions(contact_id: u64, list_id: Option<u64>) -> String {
    match list_id {
        Some(list_id) => format!("contact/{contact_id}/subscriptions/{list_id}"),
        None => format!("contact/{contact_id}/subscriptions"),
    }
}

pub fn message(message_id: u64) -> String {
    format!("message/{message_id}")
}

pub fn message_sending_info(message_id: u64) -> String {
    format!("message/{message_id}/sending_info")
}

pub fn message_delivery_summary(message_id: u64) -> String {
    format!("message/{message_id}/sending_info/summary")
}

pub fn message_stats(message_id: u64, kind: Option<StatKind>) -> String {
    match kind {
        Some(kind) => format!("message/{message_id}/stats/{kind}"),
        None => format!("message/{message_id}/stats"),
    }
}

// ============================================================================
// Response Envelope
// ============================================================================

/// Status value of a successful response.
pub const STATUS_SUCCESS: &str = "success";

/// Failure fields of the response envelope.
#[derive(Debug, Deserialize)]
pub struct FailureEnvelope {
    #[serde(default, deserialize_with = "optional_code")]
    pub error_code: Option<u16>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A code that is not a number is dropped so the message still surfaces.
fn optional_code<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| de::id(value).ok())
        .and_then(|code| u16::try_from(code).ok()))
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub auth: LoginAuth,
}

#[derive(Debug, Deserialize)]
pub struct LoginAuth {
    pub token: String,
    #[serde(deserialize_with = "de::id")]
    pub seq: u64,
}

#[derive(Debug, Deserialize)]
pub struct ListsResponse {
    #[serde(default)]
    pub lists: Vec<ResourceRef>,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub list: ContactList,
}

#[derive(Debug, Deserialize)]
pub struct CampaignsResponse {
    #[serde(default)]
    pub campaigns: Vec<ResourceRef>,
}

#[derive(Debug, Deserialize)]
pub struct CampaignResponse {
    pub campaign: Campaign,
}

#[derive(Debug, Deserialize)]
pub struct ContactsResponse {
    #[serde(deserialize_with = "de::count")]
    pub total: u64,
    #[serde(default)]
    pub contacts: Vec<ResourceRef>,
}

#[derive(Debug, Deserialize)]
pub struct ContactResponse {
    pub contact: Contact,
}

#[derive(Debug, Deserialize)]
pub struct CustomFieldsResponse {
    pub contact: CustomFieldsBody,
}

#[derive(Debug, Deserialize)]
pub struct CustomFieldsBody {
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionsResponse {
    pub contact: SubscriptionsBody,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionsBody {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: Message,
}

/// Response to a PUT that created or updated a resource.
#[derive(Debug, Deserialize)]
pub struct WriteResponse {
    pub result: WriteResult,
}

#[derive(Debug, Deserialize)]
pub struct WriteResult {
    #[serde(default)]
    pub contact: Option<ResourceRef>,
    #[serde(default)]
    pub subscription: Option<ResourceRef>,
    #[serde(default)]
    pub message: Option<ResourceRef>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    pub results: ScheduleResult,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleResult {
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub message: StatsBody,
}

#[derive(Debug, Deserialize)]
pub struct StatsBody {
    pub stats: MessageStats,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryResponse {
    pub message: DeliveryBody,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryBody {
    pub sending_info: SendingInfo,
}

#[derive(Debug, Deserialize)]
pub struct SendingInfo {
    pub stats: MessageStats,
    #[serde(default)]
    pub channels: Vec<ChannelGroup>,
}

/// Channels of one kind; only list channels are read.
#[derive(Debug, Deserialize)]
pub struct ChannelGroup {
    #[serde(default)]
    pub lists: Vec<DeliveryChannel>,
}

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ContactRequest<'a> {
    pub contact: &'a ContactDetails,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionRequest {
    pub subscription: SubscriptionChange,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionChange {
    pub id: u64,
    pub status: SubscriptionStatus,
}

#[derive(Debug, Serialize)]
pub struct MessageRequest<'a> {
    pub message: NewMessageBody<'a>,
}

#[derive(Debug, Serialize)]
pub struct NewMessageBody<'a> {
    pub subject: &'a str,
    pub campaign: u64,
    pub text_body: &'a str,
    pub html_body: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ScheduleRequest {
    pub message: ScheduleMessage,
}

#[derive(Debug, Serialize)]
pub struct ScheduleMessage {
    pub id: u64,
    pub sending_info: ScheduleSendingInfo,
}

#[derive(Debug, Serialize)]
pub struct ScheduleSendingInfo {
    pub time: String,
    pub channels: ScheduleChannels,
}

#[derive(Debug, Serialize)]
pub struct ScheduleChannels {
    pub archive: bool,
    pub category: &'static str,
    pub lists: Vec<ListChannel>,
}

#[derive(Debug, Serialize)]
pub struct ListChannel {
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_paths() {
        assert_eq!(contact_subscriptions(3, None), "contact/3/subscriptions");
        assert_eq!(contact_subscriptions(3, Some(9)), "contact/3/subscriptions/9");
        assert_eq!(message_stats(5, None), "message/5/stats");
        assert_eq!(message_stats(5, Some(StatKind::Clicks)), "message/5/stats/clicks");
    }

    #[test]
    fn failure_envelope_accepts_string_code() {
        let env: FailureEnvelope = serde_json::from_value(json!({
            "status": "failure",
            "error_code": "402",
            "error_message": "Invalid list"
        }))
        .unwrap();
        assert_eq!(env.error_code, Some(402));
        assert_eq!(env.error_message.as_deref(), Some("Invalid list"));
    }

    #[test]
    fn failure_envelope_ignores_unreadable_code() {
        let env: FailureEnvelope = serde_json::from_value(json!({
            "status": "failure",
            "error_code": "E_BAD",
            "error_message": "Invalid list"
        }))
        .unwrap();
        assert_eq!(env.error_code, None);
        assert_eq!(env.error_message.as_deref(), Some("Invalid list"));

        let env: FailureEnvelope =
            serde_json::from_value(json!({"error_code": 70000, "error_message": "x"})).unwrap();
        assert_eq!(env.error_code, None);
    }

    #[test]
    fn schedule_body_shape() {
        let body = ScheduleRequest {
            message: ScheduleMessage {
                id: 7,
                sending_info: ScheduleSendingInfo {
                    time: "Sun, 01 Jun 2008 08:00:00 -0400".to_string(),
                    channels: ScheduleChannels {
                        archive: false,
                        category: SCHEDULE_CATEGORY,
                        lists: vec![ListChannel { id: 1 }, ListChannel { id: 2 }],
                    },
                },
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"message": {"id": 7, "sending_info": {
                "time": "Sun, 01 Jun 2008 08:00:00 -0400",
                "channels": {
                    "archive": false,
                    "category": "hidden",
                    "lists": [{"id": 1}, {"id": 2}]
                }
            }}})
        );
    }
}
