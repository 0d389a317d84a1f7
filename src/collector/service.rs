use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::roster::Roster;
use crate::scoring::ScoreClient;

use super::{aggregator, dispatcher, CollectionReport, StopReason};

/// Configuration for a collection run
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// How long collection waits without any new result before giving up
    pub idle_timeout: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(2 * 60), // 2 minutes
        }
    }
}

/// Scores every participant of a roster concurrently and gathers the results.
pub struct ScoreCollector {
    client: Arc<dyn ScoreClient>,
    config: CollectorConfig,
}

impl ScoreCollector {
    pub fn builder(client: Arc<dyn ScoreClient>) -> ScoreCollectorBuilder {
        ScoreCollectorBuilder::new(client)
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Runs one collection over `roster`.
    ///
    /// Returns once every lookup reported or the idle timeout fired. Lookups
    /// still outstanding at that point are cancelled and awaited, so none of
    /// them outlives the run.
    #[instrument(skip_all, fields(run_id = tracing::field::Empty))]
    pub async fn run(&self, roster: &Roster) -> CollectionReport {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));

        let started_at = Utc::now();
        let cancel = CancellationToken::new();

        info!(
            teams = roster.team_count(),
            participants = roster.participant_count(),
            idle_timeout_secs = self.config.idle_timeout.as_secs(),
            "Starting score collection"
        );

        let dispatcher::Dispatch {
            intake,
            dispatched,
            mut tasks,
        } = dispatcher::dispatch(roster, self.client.clone(), cancel.clone());

        let collection = aggregator::collect(intake, dispatched, self.config.idle_timeout).await;

        let outstanding = tasks.len();
        cancel.cancel();
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Lookup task ended abnormally");
            }
        }

        if collection.stop_reason != StopReason::Completed {
            warn!(
                collected = collection.records.len(),
                dispatched,
                stop_reason = %collection.stop_reason,
                "Collection stopped early, ranking partial results"
            );
        }
        debug!(outstanding, "Lookup tasks drained");

        let report = CollectionReport {
            run_id,
            dispatched,
            records: collection.records,
            stop_reason: collection.stop_reason,
            started_at,
            completed_at: Utc::now(),
        };

        info!(
            collected = report.collected(),
            failures = report.failures(),
            dispatched,
            "Score collection finished"
        );

        report
    }
}

pub struct ScoreCollectorBuilder {
    client: Arc<dyn ScoreClient>,
    config: CollectorConfig,
}

impl ScoreCollectorBuilder {
    fn new(client: Arc<dyn ScoreClient>) -> Self {
        Self {
            client,
            config: CollectorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CollectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.config.idle_timeout = idle_timeout;
        self
    }

    pub fn build(self) -> ScoreCollector {
        ScoreCollector {
            client: self.client,
            config: self.config,
        }
    }
}
