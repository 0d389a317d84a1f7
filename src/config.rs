use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::collector::CollectorConfig;
use crate::scoring::{http::DEFAULT_SCORE_SERVICE_URL, ScoreServiceConfig};

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Collect team scores and announce the winners")]
pub struct Cli {
    /// Roster file, one `team: participant, participant` row per team
    #[arg(short, long, env = "TEAMSCORE_ROSTER", default_value = "testData/Teams.txt")]
    pub roster: PathBuf,

    /// Base URL of the score service; the participant is appended as a path segment
    #[arg(long, env = "TEAMSCORE_SCORE_URL", default_value = DEFAULT_SCORE_SERVICE_URL)]
    pub score_url: String,

    /// Seconds to wait without any new result before ranking what arrived
    #[arg(long, env = "TEAMSCORE_IDLE_TIMEOUT_SECS", default_value_t = 120)]
    pub idle_timeout_secs: u64,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
        }
    }

    pub fn score_service_config(&self) -> ScoreServiceConfig {
        ScoreServiceConfig {
            base_url: self.score_url.clone(),
        }
    }
}
