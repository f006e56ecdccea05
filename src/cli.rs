use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{Settings, DEFAULT_BASE_URL, DEFAULT_ISSUE_CATEGORY};
use crate::dashboard::Dashboard;
use crate::server;

#[derive(Parser)]
#[command(name = "sheetpulse")]
#[command(author, version, about = "Spreadsheet monitoring dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    source: SourceArgs,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Args)]
struct SourceArgs {
    /// Google Sheets API key
    #[arg(long, env = "GOOGLE_SHEETS_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Spreadsheet holding the alert and misalignment tracking tabs
    #[arg(long, env = "TRACKING_SHEET_ID", global = true)]
    tracking_sheet: Option<String>,

    /// Spreadsheet holding the realtime issues tab
    #[arg(long, env = "ISSUES_SHEET_ID", global = true)]
    issues_sheet: Option<String>,

    /// Sheets API base URL
    #[arg(long, env = "SHEETS_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Sub-request type the issue summary is restricted to
    #[arg(long, env = "ISSUE_CATEGORY", global = true, default_value = DEFAULT_ISSUE_CATEGORY)]
    category: String,
}

impl SourceArgs {
    fn settings(&self) -> Settings {
        Settings::new(
            &self.base_url,
            self.api_key.as_deref(),
            self.tracking_sheet.as_deref(),
            self.issues_sheet.as_deref(),
            &self.category,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise the alert tracking sheet
    Alerts,

    /// Summarise the misalignment tracking sheet
    Misalignment,

    /// Summarise issue resolution times
    Issues,

    /// Summarise all three sources concurrently
    Snapshot,

    /// Serve the summaries as JSON over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "SHEETPULSE_BIND", default_value = "127.0.0.1:3000")]
        bind: String,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let dashboard = Dashboard::new(self.source.settings())?;

        match &self.command {
            Commands::Alerts => {
                info!("Collecting alert summary");
                self.write(&dashboard.alerts().await?)
            }
            Commands::Misalignment => {
                info!("Collecting misalignment summary");
                self.write(&dashboard.misalignment().await?)
            }
            Commands::Issues => {
                info!("Collecting issue summary");
                self.write(&dashboard.issues().await?)
            }
            Commands::Snapshot => self.write(&dashboard.snapshot().await),
            Commands::Serve { bind } => {
                server::serve(dashboard, bind).await?;
                Ok(())
            }
        }
    }

    fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        // Serialize to JSON
        let json_output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        // Write to output
        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)?;
            info!("Summary written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }
}
