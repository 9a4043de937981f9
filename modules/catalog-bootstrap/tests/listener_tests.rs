//! Dispatch-contract tests for the lifecycle listener
//!
//! Recording fakes stand in for the three platform capabilities so each
//! test can assert exactly which remote calls a given event produces.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use billing_api::{
    Account, AccountApi, AccountApiError, AccountEvent, CallContext, CatalogApi, CatalogApiError,
    EventType, ObjectType, SecurityApi, SecurityApiError, TenantContext,
};
use catalog_bootstrap_rs::catalog::{validate_catalog, DEFAULT_CATALOG};
use catalog_bootstrap_rs::listener::{
    AccountEventListener, CatalogBootstrapListener, UploadCredentials, MODULE_NAME,
};
use uuid::Uuid;

#[derive(Default)]
struct RecordingSecurity {
    logins: AtomicUsize,
    logouts: AtomicUsize,
    reject_login: bool,
}

#[async_trait]
impl SecurityApi for RecordingSecurity {
    async fn login(&self, _username: &str, _password: &str) -> Result<(), SecurityApiError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        if self.reject_login {
            return Err(SecurityApiError::InvalidCredentials);
        }
        Ok(())
    }

    async fn logout(&self) -> Result<(), SecurityApiError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingCatalog {
    uploads: Mutex<Vec<(String, CallContext)>>,
    reject: bool,
}

#[async_trait]
impl CatalogApi for RecordingCatalog {
    async fn upload_catalog(
        &self,
        xml: &str,
        context: &CallContext,
    ) -> Result<(), CatalogApiError> {
        self.uploads
            .lock()
            .unwrap()
            .push((xml.to_string(), context.clone()));
        if self.reject {
            return Err(CatalogApiError::Rejected {
                status: 409,
                message: "catalog version already exists".into(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
struct RecordingAccounts {
    lookups: Mutex<Vec<(Uuid, TenantContext)>>,
    missing: bool,
}

#[async_trait]
impl AccountApi for RecordingAccounts {
    async fn account_by_id(
        &self,
        account_id: Uuid,
        context: &TenantContext,
    ) -> Result<Account, AccountApiError> {
        self.lookups
            .lock()
            .unwrap()
            .push((account_id, context.clone()));
        if self.missing {
            return Err(AccountApiError::NotFound(account_id));
        }
        Ok(Account {
            account_id,
            external_key: "acme-01".into(),
            name: Some("Acme".into()),
            email: Some("billing@acme.test".into()),
            currency: Some("USD".into()),
            time_zone: Some("UTC".into()),
        })
    }
}

struct Harness {
    accounts: Arc<RecordingAccounts>,
    catalog: Arc<RecordingCatalog>,
    security: Arc<RecordingSecurity>,
    listener: CatalogBootstrapListener,
}

fn harness(
    accounts: RecordingAccounts,
    catalog: RecordingCatalog,
    security: RecordingSecurity,
) -> Harness {
    let accounts = Arc::new(accounts);
    let catalog = Arc::new(catalog);
    let security = Arc::new(security);

    let listener = CatalogBootstrapListener::new(
        accounts.clone(),
        catalog.clone(),
        security.clone(),
        UploadCredentials {
            username: "admin".into(),
            password: "password".into(),
        },
        DEFAULT_CATALOG.to_string(),
    );

    Harness {
        accounts,
        catalog,
        security,
        listener,
    }
}

fn lifecycle_event(event_type: EventType) -> AccountEvent {
    AccountEvent {
        event_type,
        object_id: Uuid::new_v4(),
        object_type: ObjectType::Account,
        account_id: Uuid::new_v4(),
        tenant_id: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn creation_uploads_catalog_under_scoped_session() {
    let h = harness(
        RecordingAccounts::default(),
        RecordingCatalog::default(),
        RecordingSecurity::default(),
    );
    let event = lifecycle_event(EventType::AccountCreation);

    h.listener.on_event(&event).await;

    assert_eq!(h.security.logins.load(Ordering::SeqCst), 1);
    assert_eq!(h.security.logouts.load(Ordering::SeqCst), 1);

    let uploads = h.catalog.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);

    let (xml, context) = &uploads[0];
    assert!(!xml.is_empty());
    validate_catalog(xml).expect("uploaded document must be well-formed");
    assert_eq!(context.account_id, event.account_id);
    assert_eq!(context.tenant_id, event.tenant_id);
    assert_eq!(context.created_by, MODULE_NAME);
}

#[tokio::test]
async fn creation_does_not_trigger_an_account_lookup() {
    let h = harness(
        RecordingAccounts::default(),
        RecordingCatalog::default(),
        RecordingSecurity::default(),
    );

    h.listener
        .on_event(&lifecycle_event(EventType::AccountCreation))
        .await;

    assert!(h.accounts.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn creation_releases_session_when_upload_fails() {
    let h = harness(
        RecordingAccounts::default(),
        RecordingCatalog {
            reject: true,
            ..Default::default()
        },
        RecordingSecurity::default(),
    );

    h.listener
        .on_event(&lifecycle_event(EventType::AccountCreation))
        .await;

    assert_eq!(h.security.logins.load(Ordering::SeqCst), 1);
    assert_eq!(h.security.logouts.load(Ordering::SeqCst), 1);
    assert_eq!(h.catalog.uploads.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn creation_skips_upload_when_login_fails() {
    let h = harness(
        RecordingAccounts::default(),
        RecordingCatalog::default(),
        RecordingSecurity {
            reject_login: true,
            ..Default::default()
        },
    );

    h.listener
        .on_event(&lifecycle_event(EventType::AccountCreation))
        .await;

    assert_eq!(h.security.logins.load(Ordering::SeqCst), 1);
    // No session was opened, so there is nothing to release
    assert_eq!(h.security.logouts.load(Ordering::SeqCst), 0);
    assert!(h.catalog.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn change_looks_up_account_with_event_context() {
    let h = harness(
        RecordingAccounts::default(),
        RecordingCatalog::default(),
        RecordingSecurity::default(),
    );
    let event = lifecycle_event(EventType::AccountChange);

    h.listener.on_event(&event).await;

    let lookups = h.accounts.lookups.lock().unwrap();
    assert_eq!(lookups.len(), 1);

    let (account_id, context) = &lookups[0];
    assert_eq!(*account_id, event.account_id);
    assert_eq!(context.account_id, event.account_id);
    assert_eq!(context.tenant_id, event.tenant_id);

    assert_eq!(h.security.logins.load(Ordering::SeqCst), 0);
    assert!(h.catalog.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn change_swallows_a_missing_account() {
    let h = harness(
        RecordingAccounts {
            missing: true,
            ..Default::default()
        },
        RecordingCatalog::default(),
        RecordingSecurity::default(),
    );

    h.listener
        .on_event(&lifecycle_event(EventType::AccountChange))
        .await;

    assert_eq!(h.accounts.lookups.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unrelated_events_touch_no_services() {
    let h = harness(
        RecordingAccounts::default(),
        RecordingCatalog::default(),
        RecordingSecurity::default(),
    );

    for event_type in [
        EventType::SubscriptionCreation,
        EventType::InvoiceCreation,
        EventType::PaymentSuccess,
        EventType::TagDeletion,
        EventType::Unknown,
    ] {
        h.listener.on_event(&lifecycle_event(event_type)).await;
    }

    assert_eq!(h.security.logins.load(Ordering::SeqCst), 0);
    assert_eq!(h.security.logouts.load(Ordering::SeqCst), 0);
    assert!(h.catalog.uploads.lock().unwrap().is_empty());
    assert!(h.accounts.lookups.lock().unwrap().is_empty());
}
