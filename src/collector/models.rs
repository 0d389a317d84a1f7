use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::scoring::LookupError;

use super::{ranker, CollectorError};

/// Outcome of one participant's lookup, tagged with the team it was dispatched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub team: String,
    pub participant: String,
    pub outcome: Result<i64, LookupError>,
}

impl ResultRecord {
    pub fn new(
        team: impl Into<String>,
        participant: impl Into<String>,
        outcome: Result<i64, LookupError>,
    ) -> Self {
        Self {
            team: team.into(),
            participant: participant.into(),
            outcome,
        }
    }

    /// Score used for ranking; a failed lookup counts as 0.
    pub fn score(&self) -> i64 {
        self.outcome.as_ref().copied().unwrap_or_default()
    }

    pub fn error(&self) -> Option<&LookupError> {
        self.outcome.as_ref().err()
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Why the aggregator stopped listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A record arrived for every dispatched lookup.
    Completed,
    /// Nothing arrived for the configured idle period.
    IdleTimeout,
    /// Every lookup task went away before all records arrived.
    IntakeClosed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StopReason::Completed => "all players are done",
            StopReason::IdleTimeout => "timed out waiting for players",
            StopReason::IntakeClosed => "lookup tasks stopped early",
        };
        f.write_str(label)
    }
}

/// Records in arrival order, together with the reason collection stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub records: Vec<ResultRecord>,
    pub expected: usize,
    pub stop_reason: StopReason,
}

impl Collection {
    pub fn is_partial(&self) -> bool {
        self.records.len() < self.expected
    }
}

/// Everything one collection run produced.
#[derive(Debug, Clone)]
pub struct CollectionReport {
    pub run_id: Uuid,
    pub dispatched: usize,
    pub records: Vec<ResultRecord>,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl CollectionReport {
    pub fn collected(&self) -> usize {
        self.records.len()
    }

    pub fn failures(&self) -> usize {
        self.records.iter().filter(|r| r.is_failure()).count()
    }

    pub fn standings(&self) -> Result<Standings, CollectorError> {
        ranker::rank(&self.records)
    }
}

/// Rankings derived from a frozen set of collected records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    /// Records by descending score; equal scores keep arrival order.
    pub individual: Vec<ResultRecord>,
    /// Sum of collected member scores for every team with at least one record.
    pub team_totals: BTreeMap<String, i64>,
    pub winning_team: String,
    pub winning_total: i64,
}

impl Standings {
    pub fn top_individual(&self) -> Option<&ResultRecord> {
        self.individual.first()
    }
}
