//! Fixed-size concurrent groups with cooperative cancellation.

use std::future::Future;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Outputs of a grouped run, in input order.
#[derive(Debug)]
pub struct GroupedRun<R> {
    pub outputs: Vec<R>,
    /// Set when the token fired before every group had started.
    pub cancelled: bool,
}

/// Run `op` over `items`, `group_size` at a time.
///
/// Futures inside a group run concurrently; groups run one after another.
/// Cancellation is checked before each group starts, so a group that has
/// begun always completes and its outputs are kept.
pub async fn run_in_groups<T, R, F, Fut>(
    items: Vec<T>,
    group_size: usize,
    cancel: &CancellationToken,
    op: F,
) -> GroupedRun<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let group_size = group_size.max(1);
    let total = items.len();
    let mut outputs = Vec::with_capacity(total);
    let mut pending = items.into_iter().peekable();

    while pending.peek().is_some() {
        if cancel.is_cancelled() {
            debug!(completed = outputs.len(), total, "grouped run cancelled");
            return GroupedRun { outputs, cancelled: true };
        }

        let group: Vec<T> = pending.by_ref().take(group_size).collect();
        outputs.extend(join_all(group.into_iter().map(&op)).await);
    }

    GroupedRun { outputs, cancelled: false }
}
