use futures::future::join_all;
use std::future::Future;

/// Runs `op` concurrently for every item that passes `dispatchable` and
/// returns the outcomes in input order.
///
/// Items that fail the check are skipped without a call and do not appear in
/// the output. Each outcome is produced by its own call, so one item's error
/// never affects another's. Everything runs on the caller's task; there is no
/// concurrency cap.
pub async fn fan_out<'a, T, R, Fut>(
    items: &'a [T],
    dispatchable: impl Fn(&T) -> bool,
    op: impl Fn(&'a T) -> Fut,
) -> Vec<R>
where
    Fut: Future<Output = R>,
{
    let calls: Vec<Fut> = items
        .iter()
        .filter(|item| dispatchable(*item))
        .map(op)
        .collect();

    join_all(calls).await
}
