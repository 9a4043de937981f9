//! HTTP implementation of the platform capability traits

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::account::Account;
use crate::api::{AccountApi, CatalogApi, SecurityApi};
use crate::context::{CallContext, TenantContext};
use crate::error::{AccountApiError, CatalogApiError, ConfigError, SecurityApiError};

/// Configuration for [`BillingClient`]
#[derive(Debug, Clone)]
pub struct BillingClientConfig {
    /// Base URL of the platform API, e.g. `https://billing.internal:8443`
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl BillingClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("BILLING_API_URL")
            .map_err(|_| ConfigError::MissingVar("BILLING_API_URL"))?;
        let api_key = std::env::var("BILLING_API_KEY")
            .map_err(|_| ConfigError::MissingVar("BILLING_API_KEY"))?;
        let api_secret = std::env::var("BILLING_API_SECRET")
            .map_err(|_| ConfigError::MissingVar("BILLING_API_SECRET"))?;

        Ok(Self {
            base_url,
            api_key,
            api_secret,
        })
    }
}

#[derive(Deserialize)]
struct SessionResponse {
    token: String,
}

/// Client for the host platform's REST API
///
/// Implements [`AccountApi`], [`CatalogApi`], and [`SecurityApi`]. Cheap to
/// clone; clones share the HTTP connection pool and the session slot, so a
/// login performed through one handle is visible to the others.
#[derive(Clone)]
pub struct BillingClient {
    config: Arc<BillingClientConfig>,
    http: reqwest::Client,
    // Bearer token of the current session. Locked only for synchronous
    // reads/writes, never across an await.
    session: Arc<Mutex<Option<String>>>,
}

impl BillingClient {
    /// Create a client with the given configuration
    pub fn new(config: BillingClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ConfigError::Http(e.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            http,
            session: Arc::new(Mutex::new(None)),
        })
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(BillingClientConfig::from_env()?)
    }

    pub fn config(&self) -> &BillingClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Attach the per-module credential headers every request carries
    fn keyed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Api-Key", &self.config.api_key)
            .header("X-Api-Secret", &self.config.api_secret)
    }

    fn current_session(&self) -> Option<String> {
        self.session.lock().expect("session slot poisoned").clone()
    }

    fn store_session(&self, token: Option<String>) -> Option<String> {
        let mut slot = self.session.lock().expect("session slot poisoned");
        std::mem::replace(&mut *slot, token)
    }
}

#[async_trait]
impl SecurityApi for BillingClient {
    async fn login(&self, username: &str, password: &str) -> Result<(), SecurityApiError> {
        let response = self
            .keyed(self.http.post(self.url("/api/v1/sessions")))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| SecurityApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SecurityApiError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SecurityApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| SecurityApiError::Transport(e.to_string()))?;

        self.store_session(Some(session.token));
        Ok(())
    }

    async fn logout(&self) -> Result<(), SecurityApiError> {
        // Clear the slot first: the local session must die even if the
        // remote revocation fails.
        let Some(token) = self.store_session(None) else {
            return Ok(());
        };

        let response = self
            .keyed(self.http.delete(self.url("/api/v1/sessions")))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| SecurityApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SecurityApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl CatalogApi for BillingClient {
    async fn upload_catalog(
        &self,
        xml: &str,
        context: &CallContext,
    ) -> Result<(), CatalogApiError> {
        let token = self
            .current_session()
            .ok_or(CatalogApiError::Unauthenticated)?;

        let response = self
            .keyed(self.http.post(self.url("/api/v1/catalog")))
            .bearer_auth(&token)
            .header("Content-Type", "text/xml")
            .header("X-Tenant-Id", context.tenant_id.to_string())
            .header("X-Account-Id", context.account_id.to_string())
            .header("X-Created-By", &context.created_by)
            .body(xml.to_string())
            .send()
            .await
            .map_err(|e| CatalogApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl AccountApi for BillingClient {
    async fn account_by_id(
        &self,
        account_id: Uuid,
        context: &TenantContext,
    ) -> Result<Account, AccountApiError> {
        let response = self
            .keyed(
                self.http
                    .get(self.url(&format!("/api/v1/accounts/{account_id}"))),
            )
            .header("X-Tenant-Id", context.tenant_id.to_string())
            .send()
            .await
            .map_err(|e| AccountApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AccountApiError::NotFound(account_id));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AccountApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Account>()
            .await
            .map_err(|e| AccountApiError::Parse(e.to_string()))
    }
}
