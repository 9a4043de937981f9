//! # External Bus Abstraction
//!
//! Modules never talk to the host platform's bus transport directly; they
//! consume it through the narrow [`ExtBus`] trait defined here. This keeps
//! the delivery mechanism swappable by configuration:
//!
//! - **NatsBus**: production implementation over a NATS connection
//! - **InMemoryBus**: in-process implementation for dev and tests
//!
//! The host owns delivery semantics (ordering, redelivery); this crate only
//! exposes publish and pattern subscription. Subjects follow NATS token
//! conventions, with `*` matching one token and `>` matching one or more.

mod inmemory_bus;
mod nats_bus;

pub use inmemory_bus::InMemoryBus;
pub use nats_bus::NatsBus;

use async_trait::async_trait;
use futures::stream::BoxStream;

/// A single message delivered from the bus
#[derive(Debug, Clone)]
pub struct BusMessage {
    /// Subject the message was published on
    pub subject: String,
    /// Raw payload bytes; decoding is the consumer's concern
    pub payload: Vec<u8>,
}

impl BusMessage {
    pub fn new(subject: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            subject: subject.into(),
            payload,
        }
    }
}

/// Errors surfaced by bus implementations
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("failed to publish message: {0}")]
    Publish(String),

    #[error("failed to subscribe to subject: {0}")]
    Subscribe(String),

    #[error("bus connection error: {0}")]
    Connection(String),
}

/// Result type for bus operations
pub type BusResult<T> = Result<T, BusError>;

/// Publish/subscribe access to the host platform's external event bus
///
/// Implementations must be shareable across tasks (`Arc<dyn ExtBus>` is the
/// normal handle). `subscribe` returns a stream that ends when the
/// underlying connection closes.
#[async_trait]
pub trait ExtBus: Send + Sync {
    /// Publish raw bytes on a subject
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> BusResult<()>;

    /// Subscribe to all subjects matching a pattern
    ///
    /// Patterns use NATS wildcards: `*` matches exactly one token,
    /// `>` matches one or more trailing tokens.
    async fn subscribe(&self, pattern: &str) -> BusResult<BoxStream<'static, BusMessage>>;
}

impl std::fmt::Debug for dyn ExtBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExtBus")
    }
}

/// Check whether a concrete subject matches a subscription pattern
///
/// Shared by the in-memory implementation and by tests that need to reason
/// about routing. NATS itself performs this matching server-side.
pub(crate) fn subject_matches(subject: &str, pattern: &str) -> bool {
    let mut subject_tokens = subject.split('.');
    let mut pattern_tokens = pattern.split('.');

    loop {
        match (subject_tokens.next(), pattern_tokens.next()) {
            // `>` consumes the rest of the subject, but must match at least one token
            (Some(_), Some(">")) => return true,
            (Some(_), Some("*")) => continue,
            (Some(s), Some(p)) if s == p => continue,
            (None, None) => return true,
            _ => return false,
        }
    }
}
