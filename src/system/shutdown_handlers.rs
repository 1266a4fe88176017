use crate::domain::CancellationSignal;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Cancels `cancellation` on Ctrl+C (or SIGTERM on unix). The task ends on
/// its own once the signal has been cancelled by anyone.
#[must_use]
pub fn setup_signal_handler(cancellation: &CancellationSignal) -> tokio::task::JoinHandle<()> {
    let cancellation = cancellation.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                eprintln!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                () = cancellation.cancelled() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::debug!("Ctrl+C received, cancelling run");
                    cancellation.cancel();
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    tracing::debug!("SIGTERM received, cancelling run");
                    cancellation.cancel();
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                () = cancellation.cancelled() => {}
                _ = tokio::signal::ctrl_c() => {
                    cancellation.cancel();
                }
            }
        }
    })
}
