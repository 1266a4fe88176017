use std::sync::Arc;

use tokio::task::JoinSet;

use crate::error::RunError;
use crate::monitor::Monitor;

pub(super) async fn run(requests: usize, monitor: &Arc<dyn Monitor>) -> Result<(), RunError> {
    let mut tasks = JoinSet::new();
    for id in 1..=requests {
        let monitor = Arc::clone(monitor);
        tasks.spawn(async move { monitor.send(id).await });
    }
    super::join_all(tasks).await
}
