//! Product configuration for the StoreKit helper
//!
//! This crate reads the product definition document and produces the ordered list of
//! purchasable product identifiers together with the configured subscription groups.
//! Results are memoized per [`ConfigLoader`].

pub mod constants;
pub mod document;
pub mod error;
pub mod loader;
pub mod notification;
pub mod settings;
pub mod subscription;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

/// Opaque identifier of a purchasable product
pub type ProductId = String;

// Re-export main types
pub use document::{Document, DocumentSource, ProductLayout, PropertyFile, SubscriptionRecord};
pub use error::{ConfigError, ConfigResult};
pub use loader::{CacheSlot, ConfigLoader};
pub use notification::{LogEventSink, StoreEventSink, StoreNotification};
pub use settings::{SettingsLoader, StoreSettings};
pub use subscription::SubscriptionGroupInfo;

pub use storekit_collections::OrderedRegistry;
