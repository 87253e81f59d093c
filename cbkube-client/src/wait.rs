//! Poll loops used to confirm asynchronous state transitions against the API
//! server. Deletion is the canonical case: a 2xx on the delete request is not
//! proof of completion (finalizers may hold the object), so the only valid
//! success signal is observing the object absent at least once.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

/// Clamp for "effectively unbounded" waits so the loop always terminates.
pub const ONE_WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Wall-clock budget for a wait, decoded from a signed seconds value at the
/// configuration boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitBudget {
    /// Zero seconds: check once, never sleep (fire and forget).
    None,
    Bounded(Duration),
    /// Negative seconds: clamped to [`ONE_WEEK`].
    Unbounded,
}

impl WaitBudget {
    pub fn from_secs(secs: i64) -> Self {
        match secs {
            0 => WaitBudget::None,
            s if s < 0 => WaitBudget::Unbounded,
            s => WaitBudget::Bounded(Duration::from_secs(s as u64)),
        }
    }

    /// Finite loop budget, or `None` for the single-check fast path.
    pub fn effective(&self) -> Option<Duration> {
        match self {
            WaitBudget::None => None,
            WaitBudget::Bounded(d) => Some(*d),
            WaitBudget::Unbounded => Some(ONE_WEEK),
        }
    }
}

/// One existence check. Transient fetch errors are an `Unreachable`
/// observation, not a failure; the loop keeps waiting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    Present,
    Absent,
    Unreachable,
}

#[derive(thiserror::Error, Debug)]
pub enum WaitError {
    #[error("wait timed out after {waited:?}")]
    TimedOut { waited: Duration },
}

/// Block until the probed object is observed absent, or the budget runs out.
///
/// With [`WaitBudget::None`] a single probe is issued and the call returns
/// `Ok` regardless of the outcome. Otherwise the loop probes, sleeps
/// `poll_interval` (truncated to the remaining budget), and re-checks the
/// elapsed time between iterations. Each probe is an independent, idempotent
/// read; no lock is held across iterations.
pub async fn wait_for_delete<F, Fut>(
    mut probe: F,
    budget: WaitBudget,
    poll_interval: Duration,
) -> Result<(), WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Probe>,
{
    poll_until(
        || {
            let fut = probe();
            async move {
                match fut.await {
                    Probe::Absent => true,
                    Probe::Present => false,
                    Probe::Unreachable => {
                        trace!("existence check unreachable; retrying");
                        false
                    }
                }
            }
        },
        budget,
        poll_interval,
    )
    .await
}

/// Same loop as [`wait_for_delete`], waiting for a predicate over fetched
/// state to become true (e.g. a Ready condition).
pub async fn wait_for_condition<F, Fut>(
    check: F,
    budget: WaitBudget,
    poll_interval: Duration,
) -> Result<(), WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    poll_until(check, budget, poll_interval).await
}

async fn poll_until<F, Fut>(
    mut done: F,
    budget: WaitBudget,
    poll_interval: Duration,
) -> Result<(), WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let Some(limit) = budget.effective() else {
        let _ = done().await;
        return Ok(());
    };

    let start = Instant::now();
    loop {
        if done().await {
            return Ok(());
        }
        let remaining = limit.saturating_sub(start.elapsed());
        sleep(poll_interval.min(remaining)).await;
        let waited = start.elapsed();
        if waited >= limit {
            debug!(?waited, ?limit, "wait budget exhausted");
            return Err(WaitError::TimedOut { waited });
        }
    }
}
