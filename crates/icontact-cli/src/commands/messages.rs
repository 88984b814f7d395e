//! Message commands.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;

use icontact::timestamp::{self, format_send_time};
use icontact::{MessageSchedule, NewMessage, StatKind};

use crate::cli::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Message id
    pub message_id: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct CreateMessageArgs {
    /// Campaign the message belongs to
    #[arg(long)]
    pub campaign: u64,

    #[arg(long)]
    pub subject: String,

    /// HTML body
    #[arg(long, default_value = "")]
    pub html: String,

    /// Plain-text body
    #[arg(long, default_value = "")]
    pub text: String,
}

#[derive(Args, Debug)]
pub struct ScheduleMessageArgs {
    /// Message id
    pub message_id: u64,

    /// List to send to (repeatable)
    #[arg(long = "list", required = true)]
    pub lists: Vec<u64>,

    /// Send time, e.g. 2030-01-01T09:00:00Z; times without a zone are in
    /// the service's zone
    #[arg(long, value_parser = parse_send_at)]
    pub at: DateTime<Utc>,

    /// Keep the message out of the public archive
    #[arg(long)]
    pub no_archive: bool,
}

#[derive(Args, Debug)]
pub struct DeliveryDetailsArgs {
    /// Message id
    pub message_id: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Message id
    pub message_id: u64,

    /// List the contacts behind one statistic (opens, clicks, bounces,
    /// unsubscribes, forwards)
    #[arg(long)]
    pub kind: Option<StatKind>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

fn parse_send_at(s: &str) -> Result<DateTime<Utc>, String> {
    timestamp::parse_timestamp(s).map_err(|e| e.to_string())
}

pub async fn message(args: MessageArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client.message(args.message_id).await;
    let message = super::finish(&client, result, "Failed to fetch message")?;

    output::json(&message, args.pretty)
}

pub async fn create_message(args: CreateMessageArgs, account: &AccountArgs) -> Result<()> {
    let new_message = NewMessage {
        campaign_id: args.campaign,
        subject: args.subject,
        body_html: args.html,
        body_text: args.text,
    };

    let mut client = super::open_client(account)?;
    let result = client.create_message(&new_message).await;
    let created = super::finish(&client, result, "Failed to create message")?;

    output::success("Message created");
    output::field("ID", &created.id.to_string());
    if let Some(href) = &created.href {
        output::field("Href", href);
    }

    Ok(())
}

pub async fn schedule_message(args: ScheduleMessageArgs, account: &AccountArgs) -> Result<()> {
    let schedule = MessageSchedule::new(args.lists, args.at).with_archive(!args.no_archive);

    let mut client = super::open_client(account)?;
    let result = client.schedule_message(args.message_id, &schedule).await;
    let scheduled = super::finish(&client, result, "Failed to schedule message")?;

    output::success("Message scheduled");
    output::field("ID", &scheduled.id.to_string());
    output::field("Send time", &format_send_time(schedule.send_at));

    Ok(())
}

pub async fn delivery_details(args: DeliveryDetailsArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client.message_delivery_details(args.message_id).await;
    let details = super::finish(&client, result, "Failed to fetch delivery details")?;

    output::json(&details, args.pretty)
}

pub async fn stats(args: StatsArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client.message_stats(args.message_id, args.kind).await;
    let stats = super::finish(&client, result, "Failed to fetch message statistics")?;

    output::json(&stats, args.pretty)
}
