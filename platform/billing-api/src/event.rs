//! Lifecycle event wire model
//!
//! The host publishes one JSON document per lifecycle notification. The
//! module reads it, dispatches on the type tag, and never writes it back;
//! the host owns the format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type tag carried by every lifecycle notification
///
/// The set grows with the platform; unknown tags deserialize to
/// [`EventType::Unknown`] so that new event kinds never break delivery to
/// modules built against an older surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    AccountCreation,
    AccountChange,
    SubscriptionCreation,
    SubscriptionChange,
    SubscriptionCancel,
    InvoiceCreation,
    InvoiceAdjustment,
    PaymentSuccess,
    PaymentFailed,
    TagCreation,
    TagDeletion,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep log output identical to the wire tags
        let s = match self {
            Self::AccountCreation => "ACCOUNT_CREATION",
            Self::AccountChange => "ACCOUNT_CHANGE",
            Self::SubscriptionCreation => "SUBSCRIPTION_CREATION",
            Self::SubscriptionChange => "SUBSCRIPTION_CHANGE",
            Self::SubscriptionCancel => "SUBSCRIPTION_CANCEL",
            Self::InvoiceCreation => "INVOICE_CREATION",
            Self::InvoiceAdjustment => "INVOICE_ADJUSTMENT",
            Self::PaymentSuccess => "PAYMENT_SUCCESS",
            Self::PaymentFailed => "PAYMENT_FAILED",
            Self::TagCreation => "TAG_CREATION",
            Self::TagDeletion => "TAG_DELETION",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// Kind of platform object a notification refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    Account,
    Bundle,
    Subscription,
    Invoice,
    Payment,
    Tag,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Account => "ACCOUNT",
            Self::Bundle => "BUNDLE",
            Self::Subscription => "SUBSCRIPTION",
            Self::Invoice => "INVOICE",
            Self::Payment => "PAYMENT",
            Self::Tag => "TAG",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// One lifecycle notification as delivered by the external bus
///
/// Immutable and read-only to modules; a delivery carries no lifecycle of
/// its own beyond the single handler invocation it triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEvent {
    pub event_type: EventType,
    /// Identifier of the object the event refers to
    pub object_id: Uuid,
    pub object_type: ObjectType,
    /// Account the event belongs to
    pub account_id: Uuid,
    /// Tenant the account lives under
    pub tenant_id: Uuid,
}
