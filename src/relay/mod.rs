//! # Rendezvous Core
//!
//! A process-wide FIFO rendezvous channel: producers buffer on one side,
//! consumers suspend on the other, and the two queues are matched
//! positionally as events arrive.
//!
//! The relay owns two collections. `pending` holds messages no consumer has
//! claimed yet; `waiters` holds the completion handles of suspended
//! consumers. Both live behind a single mutex, and every operation performs
//! its check and its mutation inside one critical section, so after any call
//! settles the two collections are never both non-empty: an arriving message
//! that finds a waiter is handed over directly, and a consumer that finds a
//! buffered message takes it without registering.
//!
//! There is no timeout and no cancellation path. A [`Relay::receive`] with
//! no matching [`Relay::submit`] stays suspended until the process exits.

use std::collections::VecDeque;

use tokio::sync::{oneshot, Mutex};
use tracing::debug;

use crate::utils::error::{RelayError, RelayResult};

/// Queue state guarded by the relay mutex.
#[derive(Debug, Default)]
struct RelayState {
    /// Messages submitted before any consumer asked for them. FIFO, unbounded.
    pending: VecDeque<String>,
    /// Completion handles of suspended consumers. FIFO, unbounded; each
    /// sender is fulfilled at most once.
    waiters: VecDeque<oneshot::Sender<String>>,
}

/// FIFO rendezvous channel pairing submitted messages with waiting consumers.
///
/// Construct one `Relay` at process start and share it (via `Arc`) between
/// the ingress and the tool endpoint; neither touches the queues directly.
#[derive(Debug, Default)]
pub struct Relay {
    state: Mutex<RelayState>,
}

impl Relay {
    /// Creates an empty relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands `message` to the oldest waiter, or buffers it when none is
    /// registered.
    ///
    /// Always succeeds; the content is not inspected. Empty strings and the
    /// producer-side `[END]` marker travel through like any other message.
    pub async fn submit(&self, mut message: String) {
        let mut state = self.state.lock().await;
        while let Some(waiter) = state.waiters.pop_front() {
            match waiter.send(message) {
                Ok(()) => {
                    debug!("message delivered to suspended consumer");
                    return;
                }
                // The consumer's task was dropped before fulfillment; its
                // handle is dead weight. Try the next waiter in line.
                Err(returned) => message = returned,
            }
        }
        state.pending.push_back(message);
        debug!(buffered = state.pending.len(), "message buffered");
    }

    /// Takes the oldest buffered message, or suspends until one is submitted.
    ///
    /// The fast path returns without yielding. Otherwise the caller is
    /// registered as a waiter and parks until some future [`Relay::submit`]
    /// fulfills it, indefinitely if none ever does. The only error is
    /// [`RelayError::Closed`], seen when the relay itself is torn down under
    /// a suspended call.
    pub async fn receive(&self) -> RelayResult<String> {
        let rx = {
            let mut state = self.state.lock().await;
            if let Some(message) = state.pending.pop_front() {
                return Ok(message);
            }
            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(tx);
            debug!(waiting = state.waiters.len(), "consumer suspended");
            rx
        };
        rx.await.map_err(|_| RelayError::Closed)
    }

    /// Number of buffered, unclaimed messages.
    pub async fn pending_messages(&self) -> usize {
        self.state.lock().await.pending.len()
    }

    /// Number of currently suspended consumers.
    pub async fn registered_waiters(&self) -> usize {
        self.state.lock().await.waiters.len()
    }
}
