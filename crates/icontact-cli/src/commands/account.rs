//! Login, logout and whoami.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::AccountArgs;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LoginArgs {}

#[derive(Args, Debug)]
pub struct LogoutArgs {}

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn login(_args: LoginArgs, account: &AccountArgs) -> Result<()> {
    let mut client = super::open_client(account)?;

    output::note("Logging in...");

    let result = client.login().await;
    let session = super::finish(&client, result, "Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Username", client.credentials().username());
    output::field("API", client.base_url().as_str());
    output::field("Sequence", &session.sequence().to_string());

    Ok(())
}

pub fn logout(_args: LogoutArgs) -> Result<()> {
    if storage::clear().context("Failed to clear session")? {
        output::success("Logged out");
    } else {
        output::note("No active session.");
    }
    Ok(())
}

pub fn whoami(_args: WhoamiArgs) -> Result<()> {
    let stored = storage::load()
        .context("Failed to load session")?
        .context("No active session. Run 'icontact login' first.")?;

    output::field("Username", &stored.username);
    output::field("API", &stored.api_url);
    output::field("Sequence", &stored.sequence.to_string());
    output::field("Logged in", &stored.created_at.to_rfc3339());

    Ok(())
}
