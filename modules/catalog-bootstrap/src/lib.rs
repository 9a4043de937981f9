pub mod catalog;
pub mod config;
pub mod consumer_tasks;
pub mod listener;

pub use consumer_tasks::{start_account_event_consumer, LIFECYCLE_SUBJECT};
pub use listener::{AccountEventListener, CatalogBootstrapListener, UploadCredentials};
