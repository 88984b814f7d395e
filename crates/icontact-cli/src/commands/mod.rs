//! Subcommand implementations.

mod account;
mod campaigns;
mod contacts;
mod messages;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::warn;

use icontact::IContactClient;

use crate::cli::AccountArgs;
use crate::session::{StoredSession, storage};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login(account::LoginArgs),

    /// Forget the stored session
    Logout(account::LogoutArgs),

    /// Display the stored session
    Whoami(account::WhoamiArgs),

    /// List mailing lists
    Lists(campaigns::ListsArgs),

    /// Show one mailing list
    List(campaigns::ListArgs),

    /// List campaigns
    Campaigns(campaigns::CampaignsArgs),

    /// Show one campaign
    Campaign(campaigns::CampaignArgs),

    /// Search contacts
    Contacts(contacts::ContactsArgs),

    /// Show one contact
    Contact(contacts::ContactArgs),

    /// Create a contact, or update one with --id
    AddContact(contacts::AddContactArgs),

    /// Subscribe a contact to a list
    Subscribe(contacts::SubscriptionArgs),

    /// Unsubscribe a contact from a list
    Unsubscribe(contacts::SubscriptionArgs),

    /// Show a contact's custom fields
    CustomFields(contacts::CustomFieldsArgs),

    /// Show a contact's list subscriptions
    Subscriptions(contacts::SubscriptionsArgs),

    /// Show one message
    Message(messages::MessageArgs),

    /// Create a message in a campaign
    CreateMessage(messages::CreateMessageArgs),

    /// Schedule a message for sending
    ScheduleMessage(messages::ScheduleMessageArgs),

    /// Show delivery summary and per-list counts of a sent message
    DeliveryDetails(messages::DeliveryDetailsArgs),

    /// Show statistics of a sent message
    Stats(messages::StatsArgs),
}

pub async fn handle(cmd: Commands, account: AccountArgs) -> Result<()> {
    match cmd {
        Commands::Login(args) => account::login(args, &account).await,
        Commands::Logout(args) => account::logout(args),
        Commands::Whoami(args) => account::whoami(args),
        Commands::Lists(args) => campaigns::lists(args, &account).await,
        Commands::List(args) => campaigns::list(args, &account).await,
        Commands::Campaigns(args) => campaigns::campaigns(args, &account).await,
        Commands::Campaign(args) => campaigns::campaign(args, &account).await,
        Commands::Contacts(args) => contacts::contacts(args, &account).await,
        Commands::Contact(args) => contacts::contact(args, &account).await,
        Commands::AddContact(args) => contacts::add_contact(args, &account).await,
        Commands::Subscribe(args) => contacts::change_subscription(args, true, &account).await,
        Commands::Unsubscribe(args) => contacts::change_subscription(args, false, &account).await,
        Commands::CustomFields(args) => contacts::custom_fields(args, &account).await,
        Commands::Subscriptions(args) => contacts::subscriptions(args, &account).await,
        Commands::Message(args) => messages::message(args, &account).await,
        Commands::CreateMessage(args) => messages::create_message(args, &account).await,
        Commands::ScheduleMessage(args) => messages::schedule_message(args, &account).await,
        Commands::DeliveryDetails(args) => messages::delivery_details(args, &account).await,
        Commands::Stats(args) => messages::stats(args, &account).await,
    }
}

/// Build a client for the configured account, resuming its stored session.
fn open_client(account: &AccountArgs) -> Result<IContactClient> {
    let credentials = account.credentials()?;
    let config = account.config()?;
    let mut client =
        IContactClient::with_config(credentials, config).context("Failed to create client")?;

    match storage::load_for(client.base_url(), client.credentials().username()) {
        Ok(Some(session)) => client.restore_session(session),
        Ok(None) => {}
        Err(err) => warn!("Ignoring stored session: {err:#}"),
    }

    Ok(client)
}

/// Persist the session after an operation, then hand back its result.
///
/// A failed operation is reported even when the session cannot be saved.
fn finish<T>(
    client: &IContactClient,
    result: icontact::Result<T>,
    context: &'static str,
) -> Result<T> {
    match result {
        Ok(value) => {
            store_session(client)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(store_err) = store_session(client) {
                warn!("{store_err:#}");
            }
            Err(err).context(context)
        }
    }
}

/// Write the client's session back to disk if it changed, or drop the
/// stored one once the client has lost it.
fn store_session(client: &IContactClient) -> Result<()> {
    let api_url = client.base_url();
    let username = client.credentials().username();
    let stored = storage::load().context("Failed to load session")?;
    let ours = stored
        .as_ref()
        .filter(|stored| stored.belongs_to(api_url, username));

    match (client.session(), ours) {
        (Some(session), Some(stored)) if stored.session() == *session => Ok(()),
        (Some(session), _) => storage::save(&StoredSession::new(api_url, username, session))
            .context("Failed to save session"),
        (None, Some(_)) => storage::clear()
            .map(|_| ())
            .context("Failed to clear session"),
        (None, None) => Ok(()),
    }
}
