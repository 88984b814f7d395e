//! The iContact API client.

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::api::{self, ApiClient, ApiRequest};
use crate::auth::{Credentials, Session, SessionToken};
use crate::config::ClientConfig;
use crate::error::{ApiError, AuthError, Error, InvalidInputError, ParseError};
use crate::resources::{
    Campaign, Contact, ContactDetails, ContactList, ContactQuery, CustomField, DeliveryDetails,
    Message, MessageSchedule, MessageStats, NewMessage, ResourceRef, StatKind, Subscription,
    SubscriptionStatus,
};
use crate::timestamp;
use crate::types::ApiUrl;

/// Client for the iContact API.
///
/// The client starts unauthenticated. [`login()`](Self::login) obtains a
/// [`Session`]; any other operation logs in first when there is none. A
/// session the service reports as stale is dropped and the call fails with
/// [`AuthError::SessionExpired`]; the next call logs in again.
///
/// Operations take `&mut self` because they may replace the session. Share
/// a client across tasks only behind a lock.
///
/// # Example
///
/// ```no_run
/// use icontact::{ContactQuery, Credentials, IContactClient};
///
/// # async fn example() -> Result<(), icontact::Error> {
/// let creds = Credentials::with_password("api-key", "shared-secret", "jdoe", "app-password");
/// let mut client = IContactClient::new(creds)?;
///
/// for contact in client.contacts(&ContactQuery::new().email("*@nowhere.com")).await? {
///     let contact = client.contact(contact.id).await?;
///     println!("{}: {}", contact.contact_id, contact.email);
/// }
/// # Ok(())
/// # }
/// ```
pub struct IContactClient {
    credentials: Credentials,
    api: ApiClient,
    session: Option<Session>,
}

impl IContactClient {
    /// Create a client against the default API URL.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with explicit configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            credentials,
            api: ApiClient::new(&config)?,
            session: None,
        })
    }

    /// Returns the credentials this client signs with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &ApiUrl {
        self.api.base_url()
    }

    /// Returns the current session, if logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Resume a session exported from an earlier client.
    ///
    /// The caller is responsible for the session belonging to these
    /// credentials; a stale one is detected on first use.
    pub fn restore_session(&mut self, session: Session) {
        debug!(sequence = session.sequence(), "Restoring session");
        self.session = Some(session);
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Log in and store the new session, replacing any current one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::LoginRejected`] if the service refuses the
    /// credentials. Rate limiting and server faults stay API errors.
    #[instrument(skip(self), fields(username = %self.credentials.username()))]
    pub async fn login(&mut self) -> Result<Session, Error> {
        info!("Logging in");

        let request = ApiRequest::get(
            "login",
            api::login(self.credentials.username(), self.credentials.password_md5()),
        );

        let response: api::LoginResponse =
            match self.api.send(&self.credentials, None, request).await {
                Ok(response) => response,
                Err(Error::Api(err)) if is_login_rejection(&err) => {
                    warn!(status = err.status, "Login rejected");
                    return Err(AuthError::LoginRejected {
                        code: err.code.or(Some(err.status)),
                        message: err.message,
                    }
                    .into());
                }
                Err(err) => return Err(err),
            };

        let session = Session::new(SessionToken::new(response.auth.token), response.auth.seq);
        debug!(sequence = session.sequence(), "Session created successfully");
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Forget the current session. Returns it, if there was one.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Option<Session> {
        info!("Logging out");
        self.session.take()
    }

    async fn ensure_session(&mut self) -> Result<Session, Error> {
        match self.session {
            Some(ref session) => Ok(session.clone()),
            None => {
                debug!("No session, logging in first");
                self.login().await
            }
        }
    }

    /// Send an authenticated request, tracking session expiry.
    async fn call<R: DeserializeOwned>(&mut self, request: ApiRequest) -> Result<R, Error> {
        let session = self.ensure_session().await?;
        match self.api.send(&self.credentials, Some(&session), request).await {
            Err(Error::Api(err)) if is_stale_session(&err) => {
                warn!("Session no longer accepted, dropping it");
                self.session = None;
                Err(AuthError::SessionExpired.into())
            }
            other => other,
        }
    }

    // ========================================================================
    // Lists and Campaigns
    // ========================================================================

    /// List the account's mailing lists.
    #[instrument(skip(self))]
    pub async fn lists(&mut self) -> Result<Vec<ResourceRef>, Error> {
        let response: api::ListsResponse = self.call(ApiRequest::get("lists", api::LISTS)).await?;
        Ok(response.lists)
    }

    /// Fetch one mailing list.
    #[instrument(skip(self))]
    pub async fn list(&mut self, list_id: u64) -> Result<ContactList, Error> {
        let response: api::ListResponse =
            self.call(ApiRequest::get("list", api::list(list_id))).await?;
        Ok(response.list)
    }

    /// List the account's campaigns.
    #[instrument(skip(self))]
    pub async fn campaigns(&mut self) -> Result<Vec<ResourceRef>, Error> {
        let response: api::CampaignsResponse = self
            .call(ApiRequest::get("campaigns", api::CAMPAIGNS))
            .await?;
        Ok(response.campaigns)
    }

    /// Fetch one campaign.
    #[instrument(skip(self))]
    pub async fn campaign(&mut self, campaign_id: u64) -> Result<Campaign, Error> {
        let response: api::CampaignResponse = self
            .call(ApiRequest::get("campaign", api::campaign(campaign_id)))
            .await?;
        Ok(response.campaign)
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    /// Search contacts. An empty query returns every contact.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the number of entries differs from the
    /// `total` the service reports.
    #[instrument(skip(self))]
    pub async fn contacts(&mut self, query: &ContactQuery) -> Result<Vec<ResourceRef>, Error> {
        let mut request = ApiRequest::get("contacts", api::CONTACTS);
        for (name, value) in query.iter() {
            if name.is_empty() || name.starts_with("api_") {
                return Err(InvalidInputError::Other {
                    message: format!("'{name}' is not a contact field"),
                }
                .into());
            }
            request = request.param(name, value);
        }

        let response: api::ContactsResponse = self.call(request).await?;

        let expected = usize::try_from(response.total).unwrap_or(usize::MAX);
        if response.contacts.len() != expected {
            return Err(ParseError::CountMismatch {
                operation: "contacts".to_string(),
                expected,
                actual: response.contacts.len(),
            }
            .into());
        }
        Ok(response.contacts)
    }

    /// Fetch one contact.
    #[instrument(skip(self))]
    pub async fn contact(&mut self, contact_id: u64) -> Result<Contact, Error> {
        let response: api::ContactResponse = self
            .call(ApiRequest::get("contact", api::contact(contact_id)))
            .await?;
        Ok(response.contact)
    }

    /// Create a contact, or update it when `details.contact_id` is set.
    ///
    /// Returns the contact's id (new when created) and link.
    #[instrument(skip(self, details), fields(contact_id = ?details.contact_id))]
    pub async fn add_update_contact(
        &mut self,
        details: &ContactDetails,
    ) -> Result<ResourceRef, Error> {
        if details.email.trim().is_empty() {
            return Err(InvalidInputError::MissingField {
                field: "email".to_string(),
            }
            .into());
        }

        let call_path = match details.contact_id {
            Some(contact_id) => api::contact(contact_id),
            None => api::CONTACT.to_string(),
        };
        let request = ApiRequest::put(
            "add_update_contact",
            call_path,
            &api::ContactRequest { contact: details },
        )?;

        let response: api::WriteResponse = self.call(request).await?;
        written(response.result.contact, "add_update_contact", "result.contact")
    }

    /// Subscribe a contact to a list, or unsubscribe it.
    #[instrument(skip(self))]
    pub async fn contact_change_subscription(
        &mut self,
        contact_id: u64,
        list_id: u64,
        subscribed: bool,
    ) -> Result<ResourceRef, Error> {
        let request = ApiRequest::put(
            "contact_change_subscription",
            api::contact_subscription(contact_id, list_id),
            &api::SubscriptionRequest {
                subscription: api::SubscriptionChange {
                    id: list_id,
                    status: SubscriptionStatus::from(subscribed),
                },
            },
        )?;

        let response: api::WriteResponse = self.call(request).await?;
        written(
            response.result.subscription,
            "contact_change_subscription",
            "result.subscription",
        )
    }

    /// Fetch a contact's custom fields.
    #[instrument(skip(self))]
    pub async fn contact_custom_fields(
        &mut self,
        contact_id: u64,
    ) -> Result<Vec<CustomField>, Error> {
        let response: api::CustomFieldsResponse = self
            .call(ApiRequest::get(
                "contact_custom_fields",
                api::contact_custom_fields(contact_id),
            ))
            .await?;
        Ok(response.contact.custom_fields)
    }

    /// Fetch a contact's subscriptions, or only the one for `list_id`.
    #[instrument(skip(self))]
    pub async fn contact_subscriptions(
        &mut self,
        contact_id: u64,
        list_id: Option<u64>,
    ) -> Result<Vec<Subscription>, Error> {
        let response: api::SubscriptionsResponse = self
            .call(ApiRequest::get(
                "contact_subscriptions",
                api::contact_subscriptions(contact_id, list_id),
            ))
            .await?;
        Ok(response.contact.subscriptions)
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Fetch a message's content and state.
    #[instrument(skip(self))]
    pub async fn message(&mut self, message_id: u64) -> Result<Message, Error> {
        let response: api::MessageResponse = self
            .call(ApiRequest::get("message", api::message(message_id)))
            .await?;
        Ok(response.message)
    }

    /// Create a message in a campaign. It is not sent until scheduled.
    #[instrument(skip(self, message), fields(campaign_id = message.campaign_id))]
    pub async fn create_message(&mut self, message: &NewMessage) -> Result<ResourceRef, Error> {
        if message.subject.trim().is_empty() {
            return Err(InvalidInputError::MissingField {
                field: "subject".to_string(),
            }
            .into());
        }

        let request = ApiRequest::put(
            "create_message",
            api::MESSAGE,
            &api::MessageRequest {
                message: api::NewMessageBody {
                    subject: &message.subject,
                    campaign: message.campaign_id,
                    text_body: &message.body_text,
                    html_body: &message.body_html,
                },
            },
        )?;

        let response: api::WriteResponse = self.call(request).await?;
        written(response.result.message, "create_message", "result.message")
    }

    /// Schedule a message for sending to one or more lists.
    ///
    /// Returns the message id with the link to its sending schedule.
    #[instrument(
        skip(self, schedule),
        fields(lists = schedule.list_ids.len(), send_at = %schedule.send_at)
    )]
    pub async fn schedule_message(
        &mut self,
        message_id: u64,
        schedule: &MessageSchedule,
    ) -> Result<ResourceRef, Error> {
        if schedule.list_ids.is_empty() {
            return Err(InvalidInputError::MissingField {
                field: "list_ids".to_string(),
            }
            .into());
        }

        let request = ApiRequest::put(
            "schedule_message",
            api::message_sending_info(message_id),
            &api::ScheduleRequest {
                message: api::ScheduleMessage {
                    id: message_id,
                    sending_info: api::ScheduleSendingInfo {
                        time: timestamp::format_send_time(schedule.send_at),
                        channels: api::ScheduleChannels {
                            archive: schedule.archive,
                            category: api::SCHEDULE_CATEGORY,
                            lists: schedule
                                .list_ids
                                .iter()
                                .map(|&id| api::ListChannel { id })
                                .collect(),
                        },
                    },
                },
            },
        )?;

        let response: api::ScheduleResponse = self.call(request).await?;
        Ok(ResourceRef {
            id: message_id,
            href: response.results.href,
        })
    }

    /// Delivery summary and per-list recipient counts of a sent message.
    #[instrument(skip(self))]
    pub async fn message_delivery_details(
        &mut self,
        message_id: u64,
    ) -> Result<DeliveryDetails, Error> {
        let response: api::DeliveryResponse = self
            .call(ApiRequest::get(
                "message_delivery_details",
                api::message_delivery_summary(message_id),
            ))
            .await?;

        let sending_info = response.message.sending_info;
        Ok(DeliveryDetails {
            stats: sending_info.stats,
            channels: sending_info
                .channels
                .into_iter()
                .flat_map(|group| group.lists)
                .collect(),
        })
    }

    /// Statistics of a sent message; with a `kind`, also the contacts who
    /// performed that action.
    #[instrument(skip(self))]
    pub async fn message_stats(
        &mut self,
        message_id: u64,
        kind: Option<StatKind>,
    ) -> Result<MessageStats, Error> {
        let response: api::StatsResponse = self
            .call(ApiRequest::get(
                "message_stats",
                api::message_stats(message_id, kind),
            ))
            .await?;
        Ok(response.message.stats)
    }
}

impl std::fmt::Debug for IContactClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IContactClient")
            .field("base_url", self.api.base_url())
            .field("credentials", &self.credentials)
            .field("authenticated", &self.session.is_some())
            .finish()
    }
}

/// A 401 with the stale-authorization message means the token expired.
/// Other 401s (e.g. another account's resource) are not recoverable by login.
fn is_stale_session(err: &ApiError) -> bool {
    err.is_auth_error()
        && err.message.as_deref().is_some_and(|message| {
            message.split_whitespace().collect::<Vec<_>>().join(" ")
                == api::STALE_AUTHORIZATION_MESSAGE
        })
}

/// Client-side failures of the login call mean the credentials were refused.
fn is_login_rejection(err: &ApiError) -> bool {
    let code = err.code.unwrap_or(err.status);
    !err.is_rate_limited() && code != 429 && !(500..600).contains(&code)
}

fn written(
    reference: Option<ResourceRef>,
    operation: &str,
    field: &str,
) -> Result<ResourceRef, Error> {
    reference.ok_or_else(|| {
        ParseError::MissingField {
            operation: operation.to_string(),
            field: field.to_string(),
        }
        .into()
    })
}
