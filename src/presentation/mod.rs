// Final result rendering for the command line

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::collector::{CollectionReport, ResultRecord, StopReason};

pub const NO_RESULTS: &str = "No results collected";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub team: String,
    pub participant: String,
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ResultRecord> for PlayerSummary {
    fn from(record: &ResultRecord) -> Self {
        Self {
            team: record.team.clone(),
            participant: record.participant.clone(),
            score: record.score(),
            error: record.error().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    pub team: String,
    pub total: i64,
}

/// Serializable view of a finished run.
///
/// `winner` and `winning_team` are `None` when nothing was collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub run_id: Uuid,
    pub stop_reason: StopReason,
    pub dispatched: usize,
    pub collected: usize,
    pub failures: usize,
    pub winner: Option<PlayerSummary>,
    pub winning_team: Option<TeamSummary>,
    pub team_totals: BTreeMap<String, i64>,
    pub completed_at: DateTime<Utc>,
}

impl Summary {
    pub fn from_report(report: &CollectionReport) -> Self {
        let standings = report.standings().ok();

        Self {
            run_id: report.run_id,
            stop_reason: report.stop_reason,
            dispatched: report.dispatched,
            collected: report.collected(),
            failures: report.failures(),
            winner: standings
                .as_ref()
                .and_then(|s| s.top_individual())
                .map(PlayerSummary::from),
            winning_team: standings.as_ref().map(|s| TeamSummary {
                team: s.winning_team.clone(),
                total: s.winning_total,
            }),
            team_totals: standings.map(|s| s.team_totals).unwrap_or_default(),
            completed_at: report.completed_at,
        }
    }
}

/// Human readable result: the winning player and team, or [`NO_RESULTS`].
pub fn render_text(report: &CollectionReport) -> String {
    let summary = Summary::from_report(report);
    let mut lines = Vec::new();

    if summary.stop_reason != StopReason::Completed {
        lines.push(format!(
            "Collection stopped early ({}): {} of {} players reported",
            summary.stop_reason, summary.collected, summary.dispatched
        ));
    }

    match (&summary.winner, &summary.winning_team) {
        (Some(player), Some(team)) => {
            let failure = player
                .error
                .as_ref()
                .map(|e| format!(", lookup failed: {e}"))
                .unwrap_or_default();
            lines.push(format!(
                "Won player {} ({}, {}{}), won team {} ({})",
                player.participant, player.team, player.score, failure, team.team, team.total
            ));
        }
        _ => lines.push(NO_RESULTS.to_string()),
    }

    if summary.failures > 0 {
        lines.push(format!("{} lookups failed and scored 0", summary.failures));
    }

    lines.join("\n")
}

pub fn render_json(report: &CollectionReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Summary::from_report(report))
}
