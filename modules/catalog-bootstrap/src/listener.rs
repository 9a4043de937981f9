//! Account lifecycle listener
//!
//! The single dispatch point of the module: one inbound event, at most one
//! catalog write and one account read, everything logged and nothing
//! propagated. The listener is stateless between invocations; both contexts
//! are rebuilt from each event.

use std::sync::Arc;

use async_trait::async_trait;
use billing_api::{
    AccountApi, AccountEvent, CallContext, CatalogApi, EventType, SecurityApi, TenantContext,
};
use tracing::{debug, info, warn};

/// Actor name recorded by the platform against catalog uploads
pub const MODULE_NAME: &str = "catalog-bootstrap";

/// Narrow callback capability the bus consumer dispatches into
///
/// Keeps the module independent of the host's concrete dispatcher: anything
/// that can hand over an [`AccountEvent`] can drive a listener.
#[async_trait]
pub trait AccountEventListener: Send + Sync {
    async fn on_event(&self, event: &AccountEvent);
}

/// Credential pair used to open the catalog-upload session
#[derive(Debug, Clone)]
pub struct UploadCredentials {
    pub username: String,
    pub password: String,
}

/// Listener that provisions a default catalog for newly created accounts
/// and logs account records on change notifications
pub struct CatalogBootstrapListener {
    accounts: Arc<dyn AccountApi>,
    catalog: Arc<dyn CatalogApi>,
    security: Arc<dyn SecurityApi>,
    credentials: UploadCredentials,
    catalog_xml: String,
}

impl CatalogBootstrapListener {
    pub fn new(
        accounts: Arc<dyn AccountApi>,
        catalog: Arc<dyn CatalogApi>,
        security: Arc<dyn SecurityApi>,
        credentials: UploadCredentials,
        catalog_xml: String,
    ) -> Self {
        Self {
            accounts,
            catalog,
            security,
            credentials,
            catalog_xml,
        }
    }

    /// Upload the catalog document under a session scoped to this call
    ///
    /// Once login has succeeded the session must be released on every path,
    /// so the logout sits after the fallible upload rather than inside it.
    async fn provision_catalog(&self, event: &AccountEvent) {
        let context = CallContext::from_event(event, MODULE_NAME);

        info!(
            account_id = %event.account_id,
            tenant_id = %event.tenant_id,
            "Uploading default catalog for new account"
        );

        if let Err(e) = self
            .security
            .login(&self.credentials.username, &self.credentials.password)
            .await
        {
            warn!(
                account_id = %event.account_id,
                error = %e,
                "Login failed, skipping catalog upload"
            );
            return;
        }

        if let Err(e) = self.catalog.upload_catalog(&self.catalog_xml, &context).await {
            warn!(
                account_id = %event.account_id,
                error = %e,
                "Error uploading catalog"
            );
        }

        if let Err(e) = self.security.logout().await {
            warn!(
                account_id = %event.account_id,
                error = %e,
                "Error releasing catalog upload session"
            );
        }
    }

    /// Fetch and log the account a change notification refers to
    async fn log_account(&self, event: &AccountEvent) {
        let context = TenantContext::from_event(event);

        match self.accounts.account_by_id(event.account_id, &context).await {
            Ok(account) => {
                info!(
                    account_id = %event.account_id,
                    account = ?account,
                    "Account information"
                );
            }
            Err(e) => {
                warn!(
                    account_id = %event.account_id,
                    error = %e,
                    "Unable to find account"
                );
            }
        }
    }
}

#[async_trait]
impl AccountEventListener for CatalogBootstrapListener {
    async fn on_event(&self, event: &AccountEvent) {
        info!(
            event_type = %event.event_type,
            object_id = %event.object_id,
            object_type = %event.object_type,
            "Received event"
        );

        match event.event_type {
            EventType::AccountCreation => self.provision_catalog(event).await,
            EventType::AccountChange => self.log_account(event).await,
            _ => {
                debug!(event_type = %event.event_type, "Ignoring event type");
            }
        }
    }
}
