//! In-process implementation of the [`ExtBus`] trait for dev and tests

use crate::{subject_matches, BusMessage, BusResult, ExtBus};
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

struct Subscription {
    pattern: String,
    sender: mpsc::UnboundedSender<BusMessage>,
}

/// ExtBus implementation backed by in-process channels
///
/// Suitable for unit and integration tests and for running the module
/// locally without a bus server. Each subscriber gets its own unbounded
/// channel; `publish` fans a message out to every subscription whose
/// pattern matches the subject. Messages published while nothing is
/// subscribed are dropped, which mirrors plain (non-durable) bus delivery.
#[derive(Clone, Default)]
pub struct InMemoryBus {
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions, for test assertions
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions
            .lock()
            .expect("subscription registry poisoned")
            .len()
    }
}

#[async_trait]
impl ExtBus for InMemoryBus {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> BusResult<()> {
        let msg = BusMessage::new(subject, payload);

        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("subscription registry poisoned");

        // Deliver to matching subscribers, dropping any whose receiver is gone
        subscriptions.retain(|sub| {
            if !subject_matches(&msg.subject, &sub.pattern) {
                return true;
            }
            sub.sender.send(msg.clone()).is_ok()
        });

        Ok(())
    }

    async fn subscribe(&self, pattern: &str) -> BusResult<BoxStream<'static, BusMessage>> {
        let (sender, mut receiver) = mpsc::unbounded_channel();

        self.subscriptions
            .lock()
            .expect("subscription registry poisoned")
            .push(Subscription {
                pattern: pattern.to_string(),
                sender,
            });

        let stream = async_stream::stream! {
            while let Some(msg) = receiver.recv().await {
                yield msg;
            }
        };

        Ok(stream.boxed())
    }
}
