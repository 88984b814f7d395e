//! CLI argument definitions.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use icontact::types::DEFAULT_API_URL;
use icontact::{ApiUrl, ClientConfig, Credentials};

use crate::commands::Commands;

/// iContact API command line client.
#[derive(Parser, Debug)]
#[command(name = "icontact")]
#[command(author, version = env!("ICONTACT_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub account: AccountArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Application credentials and connection settings.
///
/// Everything is optional at parse time; commands that talk to the API
/// check for what they need.
#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
    /// Application API key
    #[arg(long, env = "ICONTACT_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Application shared secret
    #[arg(long, env = "ICONTACT_SHARED_SECRET", global = true, hide_env_values = true)]
    pub shared_secret: Option<String>,

    /// iContact account username
    #[arg(long, env = "ICONTACT_USERNAME", global = true)]
    pub username: Option<String>,

    /// API application password (hashed before use)
    #[arg(
        long,
        env = "ICONTACT_PASSWORD",
        global = true,
        hide_env_values = true,
        conflicts_with = "password_md5"
    )]
    pub password: Option<String>,

    /// MD5 hex digest of the API application password
    #[arg(long, env = "ICONTACT_PASSWORD_MD5", global = true, hide_env_values = true)]
    pub password_md5: Option<String>,

    /// API base URL
    #[arg(long, env = "ICONTACT_API_URL", global = true, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "ICONTACT_TIMEOUT_SECS", global = true, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl AccountArgs {
    pub fn api_url(&self) -> Result<ApiUrl> {
        ApiUrl::new(&self.api_url).context("Invalid API URL")
    }

    pub fn username(&self) -> Result<&str> {
        self.username
            .as_deref()
            .context("Missing --username (or ICONTACT_USERNAME)")
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let api_key = self
            .api_key
            .as_deref()
            .context("Missing --api-key (or ICONTACT_API_KEY)")?;
        let shared_secret = self
            .shared_secret
            .as_deref()
            .context("Missing --shared-secret (or ICONTACT_SHARED_SECRET)")?;
        let username = self.username()?;

        match (&self.password, &self.password_md5) {
            (Some(password), _) => Ok(Credentials::with_password(
                api_key,
                shared_secret,
                username,
                password,
            )),
            (None, Some(digest)) => Ok(Credentials::new(api_key, shared_secret, username, digest)),
            (None, None) => {
                anyhow::bail!("Missing --password (or ICONTACT_PASSWORD / ICONTACT_PASSWORD_MD5)")
            }
        }
    }

    pub fn config(&self) -> Result<ClientConfig> {
        Ok(ClientConfig::default()
            .with_base_url(self.api_url()?)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_user_agent(format!("icontact-cli/{}", env!("ICONTACT_VERSION"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("icontact").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn credentials_from_plain_password() {
        let cli = parse(&[
            "--api-key",
            "k",
            "--shared-secret",
            "s",
            "--username",
            "jdoe",
            "--password",
            "password",
            "lists",
        ]);
        let creds = cli.account.credentials().unwrap();
        assert_eq!(creds.username(), "jdoe");
        assert_eq!(creds.password_md5(), "5f4dcc3b5aa765d61d8327deb882cf99");
    }

    #[test]
    fn account_flags_accepted_after_subcommand() {
        let cli = parse(&["lists", "--username", "jdoe", "--timeout-secs", "5"]);
        assert_eq!(cli.account.username().unwrap(), "jdoe");
        assert_eq!(cli.account.config().unwrap().timeout, Duration::from_secs(5));
    }

    #[test]
    fn password_and_digest_conflict() {
        let result = Cli::try_parse_from([
            "icontact",
            "--password",
            "a",
            "--password-md5",
            "b",
            "lists",
        ]);
        assert!(result.is_err());
    }
}
