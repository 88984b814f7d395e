//! Contact commands.

use anyhow::Result;
use clap::Args;

use icontact::{ContactDetails, ContactQuery};

use crate::cli::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// Email address to match; `*` is a wildcard
    #[arg(long)]
    pub email: Option<String>,

    /// Additional field constraint as NAME=VALUE (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct ContactArgs {
    /// Contact id
    pub contact_id: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct AddContactArgs {
    /// Update this contact instead of creating one
    #[arg(long)]
    pub id: Option<u64>,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub fname: Option<String>,

    #[arg(long)]
    pub lname: Option<String>,

    #[arg(long)]
    pub prefix: Option<String>,

    #[arg(long)]
    pub suffix: Option<String>,

    #[arg(long)]
    pub business: Option<String>,

    #[arg(long)]
    pub address1: Option<String>,

    #[arg(long)]
    pub address2: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub zip: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub fax: Option<String>,
}

impl From<AddContactArgs> for ContactDetails {
    fn from(args: AddContactArgs) -> Self {
        ContactDetails {
            contact_id: args.id,
            email: args.email,
            fname: args.fname,
            lname: args.lname,
            prefix: args.prefix,
            suffix: args.suffix,
            business: args.business,
            address1: args.address1,
            address2: args.address2,
            city: args.city,
            state: args.state,
            zip: args.zip,
            phone: args.phone,
            fax: args.fax,
        }
    }
}

#[derive(Args, Debug)]
pub struct SubscriptionArgs {
    /// Contact id
    pub contact_id: u64,

    /// List id
    pub list_id: u64,
}

#[derive(Args, Debug)]
pub struct CustomFieldsArgs {
    /// Contact id
    pub contact_id: u64,
}

#[derive(Args, Debug)]
pub struct SubscriptionsArgs {
    /// Contact id
    pub contact_id: u64,

    /// Only show the subscription to this list
    #[arg(long)]
    pub list: Option<u64>,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    if name.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

pub async fn contacts(args: ContactsArgs, account: &AccountArgs) -> Result<()> {
    let mut query = ContactQuery::new();
    if let Some(email) = args.email {
        query = query.email(email);
    }
    for (name, value) in args.fields {
        query = query.field(name, value);
    }

    let mut client = super::open_client(account)?;
    let result = client.contacts(&query).await;
    let contacts = super::finish(&client, result, "Failed to search contacts")?;

    if contacts.is_empty() {
        output::note("No contacts found.");
        return Ok(());
    }
    output::json_lines(&contacts)
}

pub async fn contact(args: ContactArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client.contact(args.contact_id).await;
    let contact = super::finish(&client, result, "Failed to fetch contact")?;

    output::json(&contact, args.pretty)
}

pub async fn add_contact(args: AddContactArgs, account: &AccountArgs) -> Result<()> {
    let updating = args.id.is_some();
    let details = ContactDetails::from(args);

    let mut client = super::open_client(account)?;
    let result = client.add_update_contact(&details).await;
    let contact = super::finish(&client, result, "Failed to save contact")?;

    output::success(if updating {
        "Contact updated"
    } else {
        "Contact created"
    });
    output::field("ID", &contact.id.to_string());
    if let Some(href) = &contact.href {
        output::field("Href", href);
    }

    Ok(())
}

pub async fn change_subscription(
    args: SubscriptionArgs,
    subscribed: bool,
    account: &AccountArgs,
) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client
        .contact_change_subscription(args.contact_id, args.list_id, subscribed)
        .await;
    super::finish(&client, result, "Failed to change subscription")?;

    output::success(&format!(
        "Contact {} {} list {}",
        args.contact_id,
        if subscribed {
            "subscribed to"
        } else {
            "unsubscribed from"
        },
        args.list_id
    ));

    Ok(())
}

pub async fn custom_fields(args: CustomFieldsArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client.contact_custom_fields(args.contact_id).await;
    let fields = super::finish(&client, result, "Failed to fetch custom fields")?;

    if fields.is_empty() {
        output::note("No custom fields.");
        return Ok(());
    }
    output::json_lines(&fields)
}

pub async fn subscriptions(args: SubscriptionsArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client
        .contact_subscriptions(args.contact_id, args.list)
        .await;
    let subscriptions = super::finish(&client, result, "Failed to fetch subscriptions")?;

    if subscriptions.is_empty() {
        output::note("No subscriptions.");
        return Ok(());
    }
    output::json_lines(&subscriptions)
}
