use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use tg_reviewbot::config::{self, Credentials};
use tg_reviewbot::notify::TelegramNotifier;
use tg_reviewbot::poller::Poller;
use tg_reviewbot::review::ReviewClient;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;
    let creds = Credentials::from_env().context("credential check failed")?;

    let endpoint = Url::parse(&cfg.app.endpoint).context("invalid app.endpoint URL")?;
    let client = ReviewClient::with_endpoint(creds.api_token.clone(), endpoint);
    let notifier = TelegramNotifier::new(&creds.bot_token, creds.chat_id);

    let cursor = cfg
        .app
        .from_date
        .unwrap_or_else(|| chrono::Utc::now().timestamp());
    let interval = Duration::from_secs(cfg.app.poll_interval_secs);

    info!("starting review status watcher");
    Poller::new(client, notifier, interval, cursor).run().await;

    Ok(())
}
