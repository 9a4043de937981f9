//! NATS-backed implementation of the [`ExtBus`] trait

use crate::{BusError, BusMessage, BusResult, ExtBus};
use async_nats::Client;
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};

/// ExtBus implementation over a NATS connection
///
/// Production deployments point this at the host platform's bus endpoint;
/// subject filtering happens server-side, so [`subscribe`](ExtBus::subscribe)
/// simply forwards the pattern.
#[derive(Clone)]
pub struct NatsBus {
    client: Client,
}

impl NatsBus {
    /// Wrap an already-connected NATS client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Access the underlying client for features the trait does not expose
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ExtBus for NatsBus {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> BusResult<()> {
        self.client
            .publish(subject.to_string(), payload.into())
            .await
            .map_err(|e| BusError::Publish(e.to_string()))?;

        Ok(())
    }

    async fn subscribe(&self, pattern: &str) -> BusResult<BoxStream<'static, BusMessage>> {
        let subscriber = self
            .client
            .subscribe(pattern.to_string())
            .await
            .map_err(|e| BusError::Subscribe(e.to_string()))?;

        let stream = subscriber
            .map(|msg| BusMessage::new(msg.subject.to_string(), msg.payload.to_vec()));

        Ok(stream.boxed())
    }
}
