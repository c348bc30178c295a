//! Tests for the convergence wait engine.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::product::ProvisioningStatus;

use super::{FetchErrorPolicy, WaitOptions, WaitOutcome, wait_until};

#[derive(Clone, Debug, Eq, PartialEq)]
struct Snapshot {
    status: ProvisioningStatus,
}

fn snap(status: ProvisioningStatus) -> Snapshot {
    Snapshot { status }
}

fn provisioned(snapshot: &Snapshot) -> bool {
    snapshot.status.is_provisioned()
}

fn api_error() -> ApiError {
    ApiError::Api {
        status: 500,
        message: String::from("boom"),
    }
}

/// Scripted fetch source: pops responses in order, then repeats `fallback`.
struct Script {
    responses: RefCell<VecDeque<Result<Snapshot, ApiError>>>,
    fallback: Result<Snapshot, ApiError>,
    fetches: Cell<u32>,
}

impl Script {
    fn new(
        responses: Vec<Result<Snapshot, ApiError>>,
        fallback: Result<Snapshot, ApiError>,
    ) -> Self {
        Self {
            responses: RefCell::new(VecDeque::from(responses)),
            fallback,
            fetches: Cell::new(0),
        }
    }

    fn next(&self) -> Result<Snapshot, ApiError> {
        self.fetches.set(self.fetches.get() + 1);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

fn fast_options() -> WaitOptions {
    WaitOptions::default()
        .with_poll_interval(Duration::from_millis(10))
        .with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn satisfied_on_first_fetch_returns_without_sleeping() {
    let script = Script::new(vec![], Ok(snap(ProvisioningStatus::Live)));
    let options = WaitOptions::default()
        .with_poll_interval(Duration::from_secs(2))
        .with_timeout(Duration::from_secs(10));
    let cancel = CancellationToken::new();

    let started = Instant::now();
    let outcome = wait_until(&options, &cancel, || async { script.next() }, provisioned).await;

    assert_eq!(outcome, WaitOutcome::Satisfied(snap(ProvisioningStatus::Live)));
    assert_eq!(script.fetches.get(), 1);
    assert!(
        started.elapsed() < Duration::from_millis(500),
        "satisfied first fetch should not sleep, took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn converges_mid_sequence_without_exhausting_budget() {
    let script = Script::new(
        vec![
            Ok(snap(ProvisioningStatus::Deployable)),
            Ok(snap(ProvisioningStatus::Deployable)),
            Ok(snap(ProvisioningStatus::Configured)),
        ],
        Ok(snap(ProvisioningStatus::Deployable)),
    );
    let cancel = CancellationToken::new();

    let started = Instant::now();
    let outcome = wait_until(
        &fast_options(),
        &cancel,
        || async { script.next() },
        provisioned,
    )
    .await;

    assert!(outcome.is_satisfied(), "unexpected outcome: {outcome:?}");
    assert_eq!(script.fetches.get(), 3);
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "should return well before the 5 s budget, took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn times_out_within_one_interval_of_budget() {
    let script = Script::new(vec![], Ok(snap(ProvisioningStatus::Deployable)));
    let options = WaitOptions::default()
        .with_poll_interval(Duration::from_millis(20))
        .with_timeout(Duration::from_millis(90));
    let cancel = CancellationToken::new();

    let started = Instant::now();
    let outcome = wait_until(&options, &cancel, || async { script.next() }, provisioned).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, WaitOutcome::TimedOut);
    assert!(
        elapsed >= Duration::from_millis(90),
        "timed out early at {elapsed:?}"
    );
    assert!(
        elapsed < Duration::from_millis(400),
        "timeout overshot by more than a slack interval: {elapsed:?}"
    );
}

#[tokio::test]
async fn final_tick_at_deadline_still_reports_satisfaction() {
    // Interval longer than the budget: the engine must cap the tick at the
    // deadline and run one last fetch+evaluate there rather than declaring
    // timeout after the first miss.
    let script = Script::new(
        vec![Ok(snap(ProvisioningStatus::Deployable))],
        Ok(snap(ProvisioningStatus::Configured)),
    );
    let options = WaitOptions::default()
        .with_poll_interval(Duration::from_millis(50))
        .with_timeout(Duration::from_millis(30));
    let cancel = CancellationToken::new();

    let started = Instant::now();
    let outcome = wait_until(&options, &cancel, || async { script.next() }, provisioned).await;

    assert!(
        outcome.is_satisfied(),
        "late-but-true check missing: {outcome:?}"
    );
    assert_eq!(script.fetches.get(), 2);
    assert!(
        started.elapsed() >= Duration::from_millis(30),
        "second fetch should land on the deadline"
    );
}

#[tokio::test]
async fn cancellation_takes_effect_within_one_interval() {
    let script = Script::new(vec![], Ok(snap(ProvisioningStatus::Deployable)));
    let options = WaitOptions::default()
        .with_poll_interval(Duration::from_secs(5))
        .with_timeout(Duration::from_secs(60));
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let outcome = wait_until(&options, &cancel, || async { script.next() }, provisioned).await;

    assert_eq!(outcome, WaitOutcome::Canceled);
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "cancellation should interrupt the tick sleep, took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn pre_cancelled_token_returns_before_fetching() {
    let script = Script::new(vec![], Ok(snap(ProvisioningStatus::Live)));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = wait_until(
        &fast_options(),
        &cancel,
        || async { script.next() },
        provisioned,
    )
    .await;

    assert_eq!(outcome, WaitOutcome::Canceled);
    assert_eq!(script.fetches.get(), 0);
}

#[tokio::test]
async fn tolerated_fetch_errors_spin_until_timeout() {
    let script = Script::new(vec![], Err(api_error()));
    let options = WaitOptions::default()
        .with_poll_interval(Duration::from_millis(10))
        .with_timeout(Duration::from_millis(50));
    let cancel = CancellationToken::new();

    let outcome = wait_until(&options, &cancel, || async { script.next() }, provisioned).await;

    assert_eq!(outcome, WaitOutcome::TimedOut);
    assert!(
        script.fetches.get() >= 2,
        "tolerate policy should keep polling, fetched {}",
        script.fetches.get()
    );
}

#[tokio::test]
async fn fail_after_policy_aborts_on_consecutive_failures() {
    let script = Script::new(vec![], Err(api_error()));
    let limit = NonZeroU32::new(3).unwrap_or_else(|| panic!("3 is non-zero"));
    let options = fast_options()
        .with_timeout(Duration::from_secs(30))
        .with_fetch_error_policy(FetchErrorPolicy::FailAfter(limit));
    let cancel = CancellationToken::new();

    let started = Instant::now();
    let outcome = wait_until(&options, &cancel, || async { script.next() }, provisioned).await;

    assert_eq!(outcome, WaitOutcome::FetchFailed(api_error()));
    assert_eq!(script.fetches.get(), 3);
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "fail-after must not wait for the timeout, took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn successful_fetch_resets_consecutive_failure_count() {
    let script = Script::new(
        vec![
            Err(api_error()),
            Err(api_error()),
            Ok(snap(ProvisioningStatus::Deployable)),
            Err(api_error()),
            Err(api_error()),
            Ok(snap(ProvisioningStatus::Live)),
        ],
        Ok(snap(ProvisioningStatus::Live)),
    );
    let limit = NonZeroU32::new(3).unwrap_or_else(|| panic!("3 is non-zero"));
    let options = fast_options().with_fetch_error_policy(FetchErrorPolicy::FailAfter(limit));
    let cancel = CancellationToken::new();

    let outcome = wait_until(&options, &cancel, || async { script.next() }, provisioned).await;

    assert!(outcome.is_satisfied(), "unexpected outcome: {outcome:?}");
    assert_eq!(script.fetches.get(), 6);
}

#[tokio::test]
async fn waiting_on_a_converged_resource_is_idempotent() {
    let script = Script::new(vec![], Ok(snap(ProvisioningStatus::Live)));
    let cancel = CancellationToken::new();

    let first = wait_until(
        &fast_options(),
        &cancel,
        || async { script.next() },
        provisioned,
    )
    .await;
    let second = wait_until(
        &fast_options(),
        &cancel,
        || async { script.next() },
        provisioned,
    )
    .await;

    assert!(first.is_satisfied());
    assert!(second.is_satisfied());
    assert_eq!(script.fetches.get(), 2);
}

#[tokio::test]
async fn concurrent_waits_are_independent() {
    let left = Script::new(
        vec![
            Ok(snap(ProvisioningStatus::Deployable)),
            Ok(snap(ProvisioningStatus::Live)),
        ],
        Ok(snap(ProvisioningStatus::Live)),
    );
    let right = Script::new(
        vec![
            Ok(snap(ProvisioningStatus::New)),
            Ok(snap(ProvisioningStatus::Deployable)),
            Ok(snap(ProvisioningStatus::Configured)),
        ],
        Ok(snap(ProvisioningStatus::Configured)),
    );
    let cancel = CancellationToken::new();
    let options = fast_options();

    let (first, second) = tokio::join!(
        wait_until(&options, &cancel, || async { left.next() }, provisioned),
        wait_until(&options, &cancel, || async { right.next() }, provisioned),
    );

    assert!(first.is_satisfied(), "left wait failed: {first:?}");
    assert!(second.is_satisfied(), "right wait failed: {second:?}");
    assert_eq!(left.fetches.get(), 2);
    assert_eq!(right.fetches.get(), 3);
}

#[test]
fn into_result_labels_timeout_and_cancellation() {
    let timed_out: WaitOutcome<Snapshot> = WaitOutcome::TimedOut;
    let err = timed_out
        .into_result("vxc", "uid-1")
        .expect_err("timeout should map to an error");
    assert_eq!(
        err,
        ApiError::WaitTimeout {
            resource: String::from("vxc"),
            uid: String::from("uid-1"),
        }
    );

    let canceled: WaitOutcome<Snapshot> = WaitOutcome::Canceled;
    let err = canceled
        .into_result("port", "uid-2")
        .expect_err("cancellation should map to an error");
    assert_eq!(
        err,
        ApiError::WaitCanceled {
            resource: String::from("port"),
            uid: String::from("uid-2"),
        }
    );
}

#[test]
fn into_result_passes_snapshot_and_fetch_error_through() {
    let satisfied = WaitOutcome::Satisfied(snap(ProvisioningStatus::Live));
    let snapshot = satisfied
        .into_result("port", "uid")
        .unwrap_or_else(|err| panic!("satisfied should be Ok: {err}"));
    assert_eq!(snapshot, snap(ProvisioningStatus::Live));

    let failed: WaitOutcome<Snapshot> = WaitOutcome::FetchFailed(api_error());
    let err = failed
        .into_result("port", "uid")
        .expect_err("fetch failure should surface the underlying error");
    assert_eq!(err, api_error());
}

#[test]
#[should_panic(expected = "poll interval must be non-zero")]
fn zero_poll_interval_is_rejected_at_construction() {
    let _options = WaitOptions::default().with_poll_interval(Duration::ZERO);
}
