//! Run status polling.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use arxivgpt_ai::{AssistantError, AssistantRegistry, Run};

/// Suspends the caller between status checks.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeping on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Status re-fetches before giving up. `None` polls until terminal.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: Some(300),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The run left the pending states.
    Finished(Run),
    /// Still pending after `attempts` re-fetches.
    TimedOut { run: Run, attempts: u32 },
}

/// Re-fetch `run` until it is no longer pending or the policy gives up.
pub async fn wait_for_run(
    registry: &dyn AssistantRegistry,
    sleeper: &dyn Sleeper,
    policy: PollPolicy,
    thread_id: &str,
    mut run: Run,
) -> Result<PollOutcome, AssistantError> {
    let mut attempts = 0u32;
    while run.status.is_pending() {
        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            return Ok(PollOutcome::TimedOut { run, attempts });
        }
        sleeper.sleep(policy.interval).await;
        run = registry.retrieve_run(thread_id, &run.id).await?;
        attempts += 1;
        debug!(run_id = %run.id, status = ?run.status, attempts, "Run status");
    }
    Ok(PollOutcome::Finished(run))
}

#[cfg(test)]
mod tests {
    use arxivgpt_ai::RunStatus;

    use super::*;
    use crate::testing::{MockRegistry, RecordingSleeper};

    fn run(status: RunStatus) -> Run {
        Run {
            id: "run_1".into(),
            status,
        }
    }

    #[tokio::test]
    async fn polls_until_completed() {
        let registry = MockRegistry::default()
            .with_statuses(&[RunStatus::InProgress, RunStatus::Completed]);
        let sleeper = RecordingSleeper::default();

        let outcome = wait_for_run(
            &registry,
            &sleeper,
            PollPolicy::default(),
            "thread_1",
            run(RunStatus::Queued),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Finished(run(RunStatus::Completed)));
        assert_eq!(sleeper.calls(), vec![Duration::from_secs(1); 2]);
    }

    #[tokio::test]
    async fn terminal_run_is_not_polled() {
        let registry = MockRegistry::default();
        let sleeper = RecordingSleeper::default();

        let outcome = wait_for_run(
            &registry,
            &sleeper,
            PollPolicy::default(),
            "thread_1",
            run(RunStatus::Failed),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Finished(run(RunStatus::Failed)));
        assert!(sleeper.calls().is_empty());
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let registry = MockRegistry::default().with_statuses(&[RunStatus::InProgress; 5]);
        let sleeper = RecordingSleeper::default();
        let policy = PollPolicy {
            interval: Duration::from_millis(10),
            max_attempts: Some(3),
        };

        let outcome = wait_for_run(&registry, &sleeper, policy, "thread_1", run(RunStatus::Queued))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::TimedOut {
                run: run(RunStatus::InProgress),
                attempts: 3
            }
        );
        assert_eq!(sleeper.calls().len(), 3);
    }

    #[tokio::test]
    async fn unbounded_policy_waits_for_terminal() {
        let mut statuses = vec![RunStatus::InProgress; 500];
        statuses.push(RunStatus::Completed);
        let registry = MockRegistry::default().with_statuses(&statuses);
        let sleeper = RecordingSleeper::default();
        let policy = PollPolicy {
            interval: Duration::from_millis(10),
            max_attempts: None,
        };

        let outcome = wait_for_run(&registry, &sleeper, policy, "thread_1", run(RunStatus::Queued))
            .await
            .unwrap();

        assert!(matches!(outcome, PollOutcome::Finished(r) if r.status == RunStatus::Completed));
        assert_eq!(sleeper.calls().len(), 501);
    }

    #[tokio::test]
    async fn status_fetch_error_propagates() {
        let registry = MockRegistry::default().failing_retrieve();
        let sleeper = RecordingSleeper::default();

        let err = wait_for_run(
            &registry,
            &sleeper,
            PollPolicy::default(),
            "thread_1",
            run(RunStatus::Queued),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssistantError::NetworkError(_)));
    }
}
