use std::sync::Arc;

use billing_api::AccountEvent;
use ext_bus::ExtBus;
use futures::StreamExt;

use crate::listener::AccountEventListener;

/// Subject pattern the host publishes lifecycle notifications on
pub const LIFECYCLE_SUBJECT: &str = "billing.lifecycle.>";

/// Subscribe to lifecycle notifications and drive the listener
///
/// The subscription is established before this function returns; the
/// consume loop itself runs on a spawned task. Payloads that fail to decode
/// are logged and skipped — one malformed delivery must not stop the
/// consumer.
pub async fn start_account_event_consumer(
    bus: Arc<dyn ExtBus>,
    listener: Arc<dyn AccountEventListener>,
) {
    tracing::info!("Starting account lifecycle consumer");

    let mut stream = match bus.subscribe(LIFECYCLE_SUBJECT).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to subscribe to {}: {}", LIFECYCLE_SUBJECT, e);
            return;
        }
    };

    tracing::info!("Subscribed to {}", LIFECYCLE_SUBJECT);

    tokio::spawn(async move {
        while let Some(msg) = stream.next().await {
            let event: AccountEvent = match serde_json::from_slice(&msg.payload) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(
                        subject = %msg.subject,
                        error = %e,
                        "Discarding undecodable lifecycle event"
                    );
                    continue;
                }
            };

            listener.on_event(&event).await;
        }

        tracing::warn!("Account lifecycle consumer stopped");
    });
}
