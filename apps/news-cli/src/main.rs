//! # News Portal CLI
//!
//! Pick a user, then browse, write and comment on news from the terminal.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use news_client::{NewsClient, Session, SessionStore};

mod cli;
mod commands;
mod render;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(api_url = %args.api_url, "Using API server");
    let client = NewsClient::new(&args.api_url)?;
    let store = SessionStore::new(args.session_dir());
    let mut session = Session::restore(store).context("failed to restore session")?;

    let mut stdout = std::io::stdout().lock();
    commands::run(args.command, &client, &mut session, &mut stdout).await
}
