//! # Billing Platform API Surface
//!
//! The host billing platform delivers lifecycle notifications over its
//! external bus and exposes REST APIs for account, catalog, and security
//! operations. This crate defines that surface as a module sees it:
//!
//! - the [`AccountEvent`] wire model and its enumerations
//! - the per-call [`TenantContext`] / [`CallContext`] identity bundles
//! - the [`AccountApi`], [`CatalogApi`], and [`SecurityApi`] capability
//!   traits that modules are constructed against
//! - [`BillingClient`], the HTTP implementation of all three
//!
//! Modules hold the traits (`Arc<dyn AccountApi>` etc.), never the concrete
//! client, so tests can substitute recording fakes.

pub mod account;
pub mod api;
pub mod client;
pub mod context;
pub mod error;
pub mod event;

pub use account::Account;
pub use api::{AccountApi, CatalogApi, SecurityApi};
pub use client::{BillingClient, BillingClientConfig};
pub use context::{CallContext, TenantContext};
pub use error::{AccountApiError, CatalogApiError, ConfigError, SecurityApiError};
pub use event::{AccountEvent, EventType, ObjectType};
