//! Mailing list and campaign commands.

use anyhow::Result;
use clap::Args;

use crate::cli::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ListsArgs {}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List id
    pub list_id: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct CampaignsArgs {}

#[derive(Args, Debug)]
pub struct CampaignArgs {
    /// Campaign id
    pub campaign_id: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn lists(_args: ListsArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client.lists().await;
    let lists = super::finish(&client, result, "Failed to fetch lists")?;

    if lists.is_empty() {
        output::note("No lists found.");
        return Ok(());
    }
    output::json_lines(&lists)
}

pub async fn list(args: ListArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client.list(args.list_id).await;
    let list = super::finish(&client, result, "Failed to fetch list")?;

    output::json(&list, args.pretty)
}

pub async fn campaigns(_args: CampaignsArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client.campaigns().await;
    let campaigns = super::finish(&client, result, "Failed to fetch campaigns")?;

    if campaigns.is_empty() {
        output::note("No campaigns found.");
        return Ok(());
    }
    output::json_lines(&campaigns)
}

pub async fn campaign(args: CampaignArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;
    let result = client.campaign(args.campaign_id).await;
    let campaign = super::finish(&client, result, "Failed to fetch campaign")?;

    output::json(&campaign, args.pretty)
}
