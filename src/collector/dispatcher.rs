use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::roster::{Roster, RosterEntry};
use crate::scoring::ScoreClient;

use super::ResultRecord;

/// Lookups started for a roster, and the intake their records arrive on.
pub struct Dispatch {
    pub intake: mpsc::Receiver<ResultRecord>,
    pub dispatched: usize,
    pub tasks: JoinSet<()>,
}

/// Starts one lookup task per roster entry.
///
/// Every task delivers at most one record into the shared intake. The channel
/// holds one slot per task, so no delivery ever waits on the aggregator. Tasks
/// still running when `cancel` fires exit without sending anything.
pub fn dispatch(
    roster: &Roster,
    client: Arc<dyn ScoreClient>,
    cancel: CancellationToken,
) -> Dispatch {
    let dispatched = roster.participant_count();
    let (sender, intake) = mpsc::channel(dispatched.max(1));
    let mut tasks = JoinSet::new();

    for entry in roster.entries() {
        let sender = sender.clone();
        let client = client.clone();
        let cancel = cancel.clone();
        tasks.spawn(lookup(entry, client, sender, cancel));
    }

    debug!(dispatched, "Dispatched score lookups");

    Dispatch {
        intake,
        dispatched,
        tasks,
    }
}

async fn lookup(
    entry: RosterEntry,
    client: Arc<dyn ScoreClient>,
    sender: mpsc::Sender<ResultRecord>,
    cancel: CancellationToken,
) {
    let RosterEntry { team, participant } = entry;

    let outcome = tokio::select! {
        _ = cancel.cancelled() => {
            debug!(team = %team, participant = %participant, "Lookup cancelled");
            return;
        }
        outcome = client.fetch_score(&participant) => outcome,
    };

    match &outcome {
        Ok(score) => debug!(team = %team, participant = %participant, score, "Score received"),
        Err(e) => warn!(team = %team, participant = %participant, error = %e, "Score lookup failed"),
    }

    if sender
        .send(ResultRecord::new(team, participant, outcome))
        .await
        .is_err()
    {
        debug!("Aggregator stopped listening, result dropped");
    }
}
