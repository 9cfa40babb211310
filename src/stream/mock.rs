//! Mock sink for unit testing the polling loop.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{PollutionUpdate, UpdateSink};
use crate::error::StreamError;

/// In-memory sink that records updates.
///
/// Once [`MockSink::mark_peer_closed`] is called every send is rejected with
/// [`StreamError::Closed`] and counted, so tests can assert that none were
/// attempted.
#[derive(Debug, Clone, Default)]
pub struct MockSink {
    sent: Arc<Mutex<Vec<PollutionUpdate>>>,
    peer_closed: Arc<AtomicBool>,
    fail_sends: bool,
    rejected: Arc<AtomicUsize>,
    close_calls: Arc<AtomicUsize>,
}

impl MockSink {
    /// Create a sink that accepts updates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink whose every send fails at the transport level.
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Simulate the peer closing the connection.
    pub fn mark_peer_closed(&self) {
        self.peer_closed.store(true, Ordering::SeqCst);
    }

    /// Updates accepted so far.
    pub fn sent(&self) -> Vec<PollutionUpdate> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Sends attempted after the peer closed.
    pub fn rejected_sends(&self) -> usize {
        self.rejected.load(Ordering::SeqCst)
    }

    /// Number of times the sink was closed.
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpdateSink for MockSink {
    async fn send(&mut self, update: &PollutionUpdate) -> Result<(), StreamError> {
        if self.peer_closed.load(Ordering::SeqCst) {
            self.rejected.fetch_add(1, Ordering::SeqCst);
            return Err(StreamError::Closed);
        }

        if self.fail_sends {
            return Err(StreamError::SendFailed("Mock transport failure".to_string()));
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(update.clone());
        }
        Ok(())
    }

    async fn close(&mut self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
    }
}
