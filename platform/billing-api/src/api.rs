//! Capability traits modules are constructed against
//!
//! Each trait covers one platform subsystem. Modules receive them as
//! `Arc<dyn …>` so the wiring (and tests) decide the implementation;
//! [`BillingClient`](crate::client::BillingClient) implements all three.

use async_trait::async_trait;
use uuid::Uuid;

use crate::account::Account;
use crate::context::{CallContext, TenantContext};
use crate::error::{AccountApiError, CatalogApiError, SecurityApiError};

/// Read access to account records
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Fetch one account by id within the given tenant scope
    async fn account_by_id(
        &self,
        account_id: Uuid,
        context: &TenantContext,
    ) -> Result<Account, AccountApiError>;
}

/// Write access to the tenant catalog
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Upload a catalog document for the context's tenant
    ///
    /// The document is an opaque XML string; the catalog service owns the
    /// schema and versioning. Requires an authenticated session
    /// (see [`SecurityApi::login`]).
    async fn upload_catalog(&self, xml: &str, context: &CallContext)
        -> Result<(), CatalogApiError>;
}

/// Session management for operations that require authentication
///
/// The session is held by the implementation, mirroring the platform's
/// ambient login/logout pair. Callers are responsible for releasing the
/// session on every path once `login` has succeeded.
#[async_trait]
pub trait SecurityApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<(), SecurityApiError>;

    /// Release the current session; a no-op when none is open
    async fn logout(&self) -> Result<(), SecurityApiError>;
}
