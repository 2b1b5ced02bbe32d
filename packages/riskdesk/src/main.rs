//! RiskDesk - terminal dashboard for portfolio stress analysis
//!
//! Uploads a holdings file to the analysis service and renders the exposure
//! breakdown and stress scenario outcomes it returns.

mod api;
mod config;
mod events;
mod i18n;
mod state;
mod theme;
mod views;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::{AnalysisClient, PortfolioUpload};
use crate::config::Config;
use crate::i18n::I18n;
use crate::state::{AnalysisState, WorkflowController};
use crate::theme::Theme;

#[derive(Parser)]
#[command(name = "riskdesk")]
#[command(about = "Portfolio exposure and stress scenario dashboard")]
#[command(version)]
struct Cli {
    /// Analysis service base URL (overrides config and RISKDESK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Disable colors and emphasis
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a holdings file and show the risk dashboard
    Analyze {
        /// Holdings CSV file
        file: PathBuf,
        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the holdings the service parsed from a file
    Preview {
        /// Holdings CSV file
        file: PathBuf,
    },
    /// Check whether the analysis service is reachable
    Health,
    /// Interactive session
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load()
        .context("Failed to load configuration")?
        .with_api_url(cli.api_url);
    tracing::debug!(api_url = config.api_url(), "Configuration loaded");

    let client = AnalysisClient::new(config.api_url());
    let i18n = I18n::load(config.locale.as_deref());
    let theme = Theme::for_stdout(cli.plain);
    tracing::debug!(locale = i18n.locale(), plain = theme.is_plain(), "Front end ready");

    match cli.command {
        Commands::Analyze { file, json } => analyze(client, &file, json, &i18n, &theme).await,
        Commands::Preview { file } => preview(&client, &file, &i18n, &theme).await,
        Commands::Health => Ok(health(&client, &i18n, &theme).await),
        Commands::Shell => {
            events::run_shell(WorkflowController::new(client), &i18n, &theme).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn read_upload(path: &Path) -> Result<PortfolioUpload> {
    PortfolioUpload::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn analyze(
    client: AnalysisClient,
    path: &Path,
    json: bool,
    i18n: &I18n,
    theme: &Theme,
) -> Result<ExitCode> {
    let upload = read_upload(path).await?;

    let mut controller = WorkflowController::new(client);
    controller.submit(upload);
    if !json {
        print!("{}", views::render(controller.state(), i18n, theme));
    }
    while controller.state().is_loading() {
        controller.next_completion().await;
    }

    match controller.state() {
        AnalysisState::Ready(response) if json => {
            let output = serde_json::to_string_pretty(response.as_ref())
                .context("Failed to serialize analysis")?;
            println!("{}", output);
        }
        AnalysisState::Ready(_) => {
            println!();
            print!("{}", views::render(controller.state(), i18n, theme));
        }
        AnalysisState::Error(message) => bail!("{}", message),
        AnalysisState::Idle | AnalysisState::Loading { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}

async fn preview(client: &AnalysisClient, path: &Path, i18n: &I18n, theme: &Theme) -> Result<ExitCode> {
    let upload = read_upload(path).await?;
    let portfolio = client.preview(upload).await?;
    print!("{}", views::preview::render(&portfolio, i18n, theme));
    Ok(ExitCode::SUCCESS)
}

async fn health(client: &AnalysisClient, i18n: &I18n, theme: &Theme) -> ExitCode {
    let url = client.base_url();
    if client.health().await {
        println!("{}", theme.success.paint(&i18n.format("health.ok", &[("url", url)])));
        ExitCode::SUCCESS
    } else {
        println!("{}", theme.error.paint(&i18n.format("health.down", &[("url", url)])));
        ExitCode::FAILURE
    }
}
