use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::domain::CancellationSignal;
use crate::error::RunError;
use crate::monitor::Monitor;

pub(super) async fn run(
    requests: usize,
    limit: usize,
    cancellation: &CancellationSignal,
    monitor: &Arc<dyn Monitor>,
) -> Result<(), RunError> {
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut tasks = JoinSet::new();

    for id in 1..=requests {
        let permit = tokio::select! {
            () = cancellation.cancelled() => {
                tasks.abort_all();
                return Err(RunError::Cancelled);
            }
            permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(closed) => {
                    tracing::debug!("Connection limiter closed: {}", closed);
                    return Err(RunError::Cancelled);
                }
            },
        };
        let monitor = Arc::clone(monitor);
        tasks.spawn(async move {
            let result = monitor.send(id).await;
            drop(permit);
            result
        });
    }

    super::join_all(tasks).await
}
