//! Names and keys used by the product configuration document

/// Default name of the document holding the list of product identifiers
pub const STORE_CONFIGURATION: &str = "Products";

/// Top-level key (and per-group key) holding product identifiers
pub const PRODUCTS_KEY: &str = "Products";

/// Optional top-level key holding subscription group records
pub const SUBSCRIPTIONS_KEY: &str = "Subscriptions";

/// Key holding a subscription group's label
pub const GROUP_KEY: &str = "Group";

/// File extensions tried, in order, when resolving a document name
pub const DOCUMENT_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Default environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "STOREKIT";
