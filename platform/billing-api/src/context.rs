//! Per-call identity bundles passed to platform APIs
//!
//! Both contexts are built fresh from the triggering event for every handler
//! invocation and dropped when the call returns; nothing here is persisted
//! or shared between deliveries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::event::AccountEvent;

/// Identity scope for read operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub account_id: Uuid,
    pub tenant_id: Uuid,
}

impl TenantContext {
    pub fn from_event(event: &AccountEvent) -> Self {
        Self {
            account_id: event.account_id,
            tenant_id: event.tenant_id,
        }
    }
}

/// Identity scope for write operations, with actor and timestamp for audit
#[derive(Debug, Clone)]
pub struct CallContext {
    pub account_id: Uuid,
    pub tenant_id: Uuid,
    /// Actor recorded by the platform against the mutation
    pub created_by: String,
    pub created_date: DateTime<Utc>,
}

impl CallContext {
    pub fn from_event(event: &AccountEvent, created_by: impl Into<String>) -> Self {
        Self {
            account_id: event.account_id,
            tenant_id: event.tenant_id,
            created_by: created_by.into(),
            created_date: Utc::now(),
        }
    }
}
