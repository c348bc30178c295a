//! Generic convergence waiting for asynchronously provisioned resources.
//!
//! Buy, modify, and delete calls return before the remote side has finished
//! acting on them. [`wait_until`] polls a caller-supplied fetch closure on a
//! fixed interval until a predicate over the fetched snapshot holds, the
//! time budget runs out, or the caller cancels. One engine serves every
//! product family; resource modules supply thin fetch/predicate wrappers.

use std::fmt;
use std::future::Future;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(20 * 60);
const DEFAULT_PROGRESS_EVERY: u32 = 5;

/// How the engine treats errors returned by the fetch closure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchErrorPolicy {
    /// Treat a failed fetch as "not yet converged" and keep polling until
    /// the timeout. Compatible with callers that expect transient API
    /// errors during provisioning, at the cost of spinning on permanent
    /// failures such as a wrong identifier.
    Tolerate,
    /// Abort with [`WaitOutcome::FetchFailed`] once this many consecutive
    /// fetches have failed. A successful fetch resets the count.
    FailAfter(NonZeroU32),
}

/// Tuning for a single wait call.
///
/// A fresh value is built per call; nothing is shared between concurrent
/// waits.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WaitOptions {
    poll_interval: Duration,
    timeout: Duration,
    fetch_error_policy: FetchErrorPolicy,
    progress_every: u32,
}

impl WaitOptions {
    /// Overrides the minimum spacing between fetch attempts.
    ///
    /// # Panics
    ///
    /// Panics when `interval` is zero; a zero interval would busy-spin
    /// against the API and is always a programming error.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "poll interval must be non-zero");
        self.poll_interval = interval;
        self
    }

    /// Overrides the maximum wall-clock budget, measured from the start of
    /// the wait call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides how fetch errors are handled.
    #[must_use]
    pub const fn with_fetch_error_policy(mut self, policy: FetchErrorPolicy) -> Self {
        self.fetch_error_policy = policy;
        self
    }

    /// Overrides how often a progress observation is logged, in ticks.
    /// Zero disables progress logging.
    #[must_use]
    pub const fn with_progress_every(mut self, ticks: u32) -> Self {
        self.progress_every = ticks;
        self
    }

    /// Returns the configured poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the configured wall-clock budget.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_WAIT_TIMEOUT,
            fetch_error_policy: FetchErrorPolicy::Tolerate,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

/// Terminal result of a wait call.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum WaitOutcome<S> {
    /// The predicate held for this snapshot.
    Satisfied(S),
    /// The time budget elapsed before the predicate held.
    TimedOut,
    /// The caller's cancellation token fired.
    Canceled,
    /// A fetch failed and the configured policy forbids further retries.
    FetchFailed(ApiError),
}

impl<S> WaitOutcome<S> {
    /// True when the wait ended with a satisfied predicate.
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied(_))
    }

    /// Converts the outcome into a `Result`, labelling timeout and
    /// cancellation errors with the resource kind and identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::WaitTimeout`] or [`ApiError::WaitCanceled`] for
    /// the corresponding outcomes, and the underlying fetch error for
    /// [`WaitOutcome::FetchFailed`].
    pub fn into_result(self, resource: &str, uid: &str) -> Result<S, ApiError> {
        match self {
            Self::Satisfied(snapshot) => Ok(snapshot),
            Self::TimedOut => Err(ApiError::WaitTimeout {
                resource: resource.to_owned(),
                uid: uid.to_owned(),
            }),
            Self::Canceled => Err(ApiError::WaitCanceled {
                resource: resource.to_owned(),
                uid: uid.to_owned(),
            }),
            Self::FetchFailed(error) => Err(error),
        }
    }
}

/// Polls `fetch` until `is_satisfied` holds for a fetched snapshot.
///
/// The first fetch happens immediately; a resource that has already
/// converged is reported without sleeping. A satisfied predicate returns
/// straight away rather than waiting for the next tick. The engine never
/// mutates the watched resource and never issues overlapping fetches
/// within one call.
///
/// The predicate must be pure and must tolerate partially-initialized
/// snapshots (returning `false`, not panicking); only `fetch` performs IO.
///
/// Timeouts honour the "late but true" rule: the tick that lands at or
/// after the deadline still fetches and evaluates the predicate before
/// [`WaitOutcome::TimedOut`] is declared, so a resource that converges
/// exactly at the deadline is still reported as satisfied. Cancellation is
/// the opposite trade: it is observed during the tick sleep and returns
/// [`WaitOutcome::Canceled`] without a final fetch, keeping cancellation
/// latency bounded by one poll interval.
pub async fn wait_until<S, F, Fut, P>(
    options: &WaitOptions,
    cancel: &CancellationToken,
    mut fetch: F,
    is_satisfied: P,
) -> WaitOutcome<S>
where
    S: fmt::Debug,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<S, ApiError>>,
    P: Fn(&S) -> bool,
{
    let started = Instant::now();
    let deadline = started + options.timeout;
    let mut consecutive_failures: u32 = 0;
    let mut ticks_since_progress: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return WaitOutcome::Canceled;
        }

        match fetch().await {
            Ok(snapshot) => {
                consecutive_failures = 0;
                if is_satisfied(&snapshot) {
                    return WaitOutcome::Satisfied(snapshot);
                }
                ticks_since_progress = ticks_since_progress.saturating_add(1);
                if options.progress_every > 0 && ticks_since_progress >= options.progress_every {
                    ticks_since_progress = 0;
                    tracing::debug!(
                        elapsed_secs = started.elapsed().as_secs(),
                        snapshot = ?snapshot,
                        "resource has not converged yet"
                    );
                }
            }
            Err(error) => {
                if let FetchErrorPolicy::FailAfter(limit) = options.fetch_error_policy {
                    consecutive_failures = consecutive_failures.saturating_add(1);
                    if consecutive_failures >= limit.get() {
                        return WaitOutcome::FetchFailed(error);
                    }
                }
                tracing::debug!(%error, "fetch failed; treating as not yet converged");
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return WaitOutcome::TimedOut;
        }

        // Cap the tick at the remaining budget so the final evaluation
        // lands on the deadline rather than one interval past it.
        let tick = options.poll_interval.min(deadline.duration_since(now));
        tokio::select! {
            () = cancel.cancelled() => return WaitOutcome::Canceled,
            () = sleep(tick) => {}
        }
    }
}

#[cfg(test)]
mod tests;
