use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use teamscore::config::Cli;
use teamscore::presentation::{render_json, render_text};
use teamscore::{load_roster, HttpScoreClient, ScoreCollector};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Initialize tracing
    let default_filter = if cli.debug { "teamscore=debug" } else { "teamscore=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(roster = %cli.roster.display(), score_url = %cli.score_url, "Starting team score collection");

    let roster = load_roster(&cli.roster)
        .await
        .with_context(|| format!("failed to load roster from {}", cli.roster.display()))?;

    let client = Arc::new(HttpScoreClient::new(cli.score_service_config()));
    let collector = ScoreCollector::builder(client)
        .with_config(cli.collector_config())
        .build();

    let report = collector.run(&roster).await;

    let output = if cli.json {
        render_json(&report).context("failed to serialize summary")?
    } else {
        render_text(&report)
    };
    println!("{output}");

    Ok(())
}
