mod aggregation;
mod auth;
mod cli;
mod config;
mod dashboard;
mod error;
mod insights;
mod providers;
mod server;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting sheetpulse");
    cli.execute().await?;

    Ok(())
}
