use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use super::{Collection, ResultRecord, StopReason};

/// Stand-in deadline for idle timeouts too large to add to the current instant.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Collects records from `intake` until `expected` have arrived, or until no
/// record arrives for `idle_timeout`.
///
/// The idle timer restarts on every arrival, so a slow but steady stream of
/// results never times out. Records keep their arrival order.
pub async fn collect(
    mut intake: mpsc::Receiver<ResultRecord>,
    expected: usize,
    idle_timeout: Duration,
) -> Collection {
    let mut records = Vec::with_capacity(expected);

    if expected == 0 {
        info!("Nothing was dispatched, collection is complete");
        return Collection {
            records,
            expected,
            stop_reason: StopReason::Completed,
        };
    }

    let idle = sleep_until(idle_deadline(idle_timeout));
    tokio::pin!(idle);

    let stop_reason = loop {
        tokio::select! {
            received = intake.recv() => {
                let Some(record) = received else {
                    warn!(
                        collected = records.len(),
                        expected,
                        "Intake closed before every lookup reported"
                    );
                    break StopReason::IntakeClosed;
                };

                debug!(
                    team = %record.team,
                    participant = %record.participant,
                    collected = records.len() + 1,
                    expected,
                    "Result collected"
                );
                records.push(record);

                if records.len() == expected {
                    info!(collected = records.len(), "All players are done");
                    break StopReason::Completed;
                }

                idle.as_mut().reset(idle_deadline(idle_timeout));
            }
            () = &mut idle => {
                warn!(
                    collected = records.len(),
                    expected,
                    idle_timeout_secs = idle_timeout.as_secs(),
                    "Timed out waiting for players"
                );
                break StopReason::IdleTimeout;
            }
        }
    };

    Collection {
        records,
        expected,
        stop_reason,
    }
}

fn idle_deadline(idle_timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(idle_timeout)
        .unwrap_or_else(|| now + FAR_FUTURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::LookupError;

    const IDLE: Duration = Duration::from_secs(120);

    fn record(participant: &str, score: i64) -> ResultRecord {
        ResultRecord::new("team", participant, Ok(score))
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_every_record_arrived() {
        let (sender, intake) = mpsc::channel(4);
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            sender.send(record(name, i as i64)).await.unwrap();
        }

        let started = Instant::now();
        let collection = collect(intake, 3, IDLE).await;

        assert_eq!(collection.stop_reason, StopReason::Completed);
        assert_eq!(collection.records.len(), 3);
        assert!(started.elapsed() < IDLE);
        // sender still open: completion did not depend on the channel closing
        drop(sender);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_after_idle_period_with_partial_results() {
        let (sender, intake) = mpsc::channel(4);
        sender.send(record("a", 1)).await.unwrap();
        sender.send(record("b", 2)).await.unwrap();

        let started = Instant::now();
        let collection = collect(intake, 3, IDLE).await;

        assert_eq!(collection.stop_reason, StopReason::IdleTimeout);
        assert_eq!(collection.records.len(), 2);
        assert!(collection.is_partial());
        assert!(started.elapsed() >= IDLE);
        drop(sender);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_timer_resets_on_every_arrival() {
        let (sender, intake) = mpsc::channel(4);
        let producer = tokio::spawn(async move {
            for name in ["a", "b", "c"] {
                tokio::time::sleep(Duration::from_secs(100)).await;
                sender.send(record(name, 1)).await.unwrap();
            }
        });

        let started = Instant::now();
        let collection = collect(intake, 3, IDLE).await;

        assert_eq!(collection.stop_reason, StopReason::Completed);
        assert_eq!(collection.records.len(), 3);
        assert!(started.elapsed() >= Duration::from_secs(300));
        assert!(started.elapsed() < Duration::from_secs(300) + IDLE);
        producer.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn huge_idle_timeout_survives_timer_reset() {
        let (sender, intake) = mpsc::channel(2);
        sender.send(record("a", 1)).await.unwrap();
        let late = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            sender.send(record("b", 2)).await.unwrap();
        });

        let collection = collect(intake, 2, Duration::from_secs(u64::MAX)).await;

        assert_eq!(collection.stop_reason, StopReason::Completed);
        assert_eq!(collection.records.len(), 2);
        late.await.unwrap();
    }

    #[test]
    fn idle_deadline_saturates_instead_of_overflowing() {
        let deadline = idle_deadline(Duration::MAX);
        assert!(deadline > Instant::now());
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_with_nothing_collected() {
        let (sender, intake) = mpsc::channel::<ResultRecord>(1);

        let collection = collect(intake, 2, IDLE).await;

        assert_eq!(collection.stop_reason, StopReason::IdleTimeout);
        assert!(collection.records.is_empty());
        drop(sender);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_expected_returns_without_waiting() {
        let (_sender, intake) = mpsc::channel::<ResultRecord>(1);

        let started = Instant::now();
        let collection = collect(intake, 0, IDLE).await;

        assert_eq!(collection.stop_reason, StopReason::Completed);
        assert!(collection.records.is_empty());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_intake_stops_early() {
        let (sender, intake) = mpsc::channel(2);
        sender.send(record("a", 1)).await.unwrap();
        drop(sender);

        let started = Instant::now();
        let collection = collect(intake, 3, IDLE).await;

        assert_eq!(collection.stop_reason, StopReason::IntakeClosed);
        assert_eq!(collection.records.len(), 1);
        assert!(started.elapsed() < IDLE);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_lookups_count_toward_completion() {
        let (sender, intake) = mpsc::channel(2);
        sender.send(record("a", 5)).await.unwrap();
        sender
            .send(ResultRecord::new(
                "team",
                "b",
                Err(LookupError::Unreachable("connection refused".into())),
            ))
            .await
            .unwrap();

        let collection = collect(intake, 2, IDLE).await;

        assert_eq!(collection.stop_reason, StopReason::Completed);
        assert_eq!(collection.records.len(), 2);
        assert!(collection.records[1].is_failure());
        drop(sender);
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_arrival_order() {
        let (sender, intake) = mpsc::channel(3);
        for name in ["c", "a", "b"] {
            sender.send(record(name, 0)).await.unwrap();
        }

        let collection = collect(intake, 3, IDLE).await;
        let order: Vec<&str> = collection
            .records
            .iter()
            .map(|r| r.participant.as_str())
            .collect();

        assert_eq!(order, vec!["c", "a", "b"]);
        drop(sender);
    }
}
