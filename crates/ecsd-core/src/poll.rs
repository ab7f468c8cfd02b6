use ecsd_model::PollPolicy;
use tracing::trace;

/// Sleep between two observations; never after the last one.
pub(crate) async fn pause(policy: &PollPolicy, attempt: u32) {
    if policy.is_last(attempt) || policy.interval.is_zero() {
        return;
    }
    trace!(attempt, interval = ?policy.interval, "sleeping before next observation");
    tokio::time::sleep(policy.interval).await;
}
