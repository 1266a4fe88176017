use std::time::Duration;

use crate::domain::CancellationSignal;
use crate::error::RunError;
use crate::monitor::Monitor;

pub(super) async fn run(
    requests: usize,
    delay: Duration,
    cancellation: &CancellationSignal,
    monitor: &dyn Monitor,
) -> Result<(), RunError> {
    for id in 1..=requests {
        if id > 1 && !delay.is_zero() {
            tokio::select! {
                () = cancellation.cancelled() => return Err(RunError::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        }
        monitor.send(id).await?;
    }
    Ok(())
}
