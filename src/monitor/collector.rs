use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::Response;

/// Multi-producer result queue drained once at consolidation.
#[derive(Debug)]
pub(super) struct ResultCollector {
    sender: mpsc::UnboundedSender<Response>,
    receiver: Mutex<mpsc::UnboundedReceiver<Response>>,
}

impl ResultCollector {
    pub(super) fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Mutex::new(receiver),
        }
    }

    pub(super) fn push(&self, response: Response) {
        if let Err(err) = self.sender.send(response) {
            warn!("Dropping result for request {}: collector closed", err.0.id);
        }
    }

    pub(super) fn drain(&self) -> Vec<Response> {
        let mut receiver = self.receiver.lock().unwrap_or_else(PoisonError::into_inner);
        let mut results = Vec::new();
        while let Ok(response) = receiver.try_recv() {
            results.push(response);
        }
        results
    }
}
