//! Polling worker that follows a batch to a terminal state

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::InstallError;
use crate::http::batch::BatchApi;
use crate::models::batch::{BatchStatus, RemoteResult};
use crate::report::{Reporter, ROLLBACK_OUTPUT};

/// Poller worker options
#[derive(Debug, Clone)]
pub struct Options {
    /// Fixed wait between progress polls
    pub interval: Duration,

    /// Fail with a sentinel error once a terminal state is reached.
    /// Only meant for exercising failure paths in CI.
    pub fail_trigger: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
            fail_trigger: false,
        }
    }
}

/// What the loop carries from one poll to the next
#[derive(Debug, Clone)]
pub struct PollState {
    /// Snapshot being evaluated
    pub last_result: RemoteResult,

    /// Results link taken from the previous snapshot
    pub results_url: Option<String>,
}

impl PollState {
    pub fn new(initial: RemoteResult) -> Self {
        Self {
            last_result: initial,
            results_url: None,
        }
    }
}

/// Poll until the batch reaches a terminal state.
///
/// Returns `Ok(())` only when the batch succeeded.
pub async fn run<A, R, S, F>(
    options: &Options,
    api: &A,
    reporter: &R,
    initial: RemoteResult,
    sleep_fn: S,
) -> Result<(), InstallError>
where
    A: BatchApi + ?Sized,
    R: Reporter + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let mut state = PollState::new(initial);
    let mut polls: u64 = 0;

    loop {
        let result = &state.last_result;
        report_snapshot(reporter, result).await?;

        if !result.is_in_progress() {
            info!("Batch reached terminal status '{}' after {} poll(s)", result.status, polls);
            return finish(options, api, reporter, state).await;
        }

        let progress_url = result
            .links
            .progress_url()
            .ok_or(InstallError::MissingLink("progress"))?;
        let next = api.fetch_progress(progress_url).await?;
        polls += 1;

        // The results link comes from the snapshot just evaluated, not from `next`
        let results_url = result.links.results_url().map(str::to_string);

        debug!("Waiting {:?} before the next status check", options.interval);
        sleep_fn(options.interval).await;

        state = PollState {
            last_result: next,
            results_url,
        };
    }
}

async fn report_snapshot<R>(reporter: &R, result: &RemoteResult) -> Result<(), InstallError>
where
    R: Reporter + ?Sized,
{
    match result.batch_status() {
        Some(BatchStatus::Pending) => {
            reporter.info(&result.status_label);
            // Re-emitted every time the batch is seen pending
            match result.links.rollback_url() {
                Some(url) => reporter.set_output(ROLLBACK_OUTPUT, url).await?,
                None => warn!("Pending result carries no rollback link"),
            }
        }
        Some(BatchStatus::Running) | Some(BatchStatus::Successful) => {
            reporter.info(&format!("{}: {}%", result.status_label, result.percent()));
        }
        _ => {}
    }
    Ok(())
}

async fn finish<A, R>(
    options: &Options,
    api: &A,
    reporter: &R,
    state: PollState,
) -> Result<(), InstallError>
where
    A: BatchApi + ?Sized,
    R: Reporter + ?Sized,
{
    if options.fail_trigger {
        return Err(InstallError::TriggeredFailure);
    }

    let result = state.last_result;
    match result.batch_status() {
        Some(BatchStatus::Successful) => {
            reporter.info(&result.status_message);
            reporter.info(&result.status_detail);
            Ok(())
        }
        Some(BatchStatus::Failed) => {
            let mut message = result.failure_reason().to_string();
            if let Some(url) = state.results_url.as_deref() {
                let results = api.fetch_results(url).await?;
                for item in &results.batch_items {
                    message.push('\n');
                    message.push_str(&item.summary_line());
                }
            }
            Err(InstallError::RemoteFailure(message))
        }
        Some(BatchStatus::Canceled) => Err(InstallError::Cancelled),
        _ => {
            warn!("Batch finished with unrecognized status '{}'", result.status);
            Ok(())
        }
    }
}
