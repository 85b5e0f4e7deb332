//! Product configuration documents
//!
//! A document is a nested key/value mapping. Two layouts of the same data are accepted:
//!
//! * **Flat**: every identifier (consumable, non-consumable and subscription) is listed
//!   under the top-level `"Products"` key.
//! * **Grouped**: `"Products"` lists non-subscription identifiers and an optional
//!   `"Subscriptions"` array holds records of the form
//!   `{"Group": "vip", "Products": ["gold", "silver"]}`.
//!
//! [`ProductLayout::detect`] classifies a document by which of those keys hold usable
//! values. Documents are read by a [`DocumentSource`]; [`PropertyFile`] is the file-backed
//! implementation.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::constants::{DOCUMENT_EXTENSIONS, GROUP_KEY, PRODUCTS_KEY, SUBSCRIPTIONS_KEY};
use crate::error::{ConfigError, ConfigResult};

/// A parsed configuration document
pub type Document = Map<String, Value>;

/// Collaborator that turns a configuration name into a parsed document
pub trait DocumentSource {
    /// Read the named document. `None` means it could not be found or read.
    fn read(&self, name: &str) -> Option<Document>;
}

impl DocumentSource for HashMap<String, Document> {
    fn read(&self, name: &str) -> Option<Document> {
        self.get(name).cloned()
    }
}

/// Reads documents from JSON or YAML files in a directory
#[derive(Debug, Clone)]
pub struct PropertyFile {
    search_dir: PathBuf,
}

impl PropertyFile {
    /// Create a reader resolving names inside `search_dir`
    pub fn new(search_dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dir: search_dir.into(),
        }
    }

    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }

    /// Resolve a document name to an existing file.
    ///
    /// A name that already carries a supported extension is used as is; otherwise each
    /// extension in [`DOCUMENT_EXTENSIONS`] is tried in order.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if has_supported_extension(Path::new(name)) {
            let path = self.search_dir.join(name);
            return path.is_file().then_some(path);
        }

        DOCUMENT_EXTENSIONS
            .iter()
            .map(|ext| self.search_dir.join(format!("{}.{}", name, ext)))
            .find(|path| path.is_file())
    }

    /// Read and parse the named document, reporting why it failed
    pub fn read_strict(&self, name: &str) -> ConfigResult<Document> {
        let path = self.resolve(name).ok_or_else(|| {
            ConfigError::FileReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!(
                    "no {} document found in {}",
                    name,
                    self.search_dir.display()
                ),
            ))
        })?;

        log::debug!("Reading product configuration from {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        parse_document(&path, &content)
    }
}

impl DocumentSource for PropertyFile {
    fn read(&self, name: &str) -> Option<Document> {
        match self.read_strict(name) {
            Ok(document) => Some(document),
            Err(e) => {
                log::warn!("Unable to read product configuration '{}': {}", name, e);
                None
            }
        }
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// Parse document text, choosing JSON or YAML from the file extension
pub fn parse_document(path: &Path, content: &str) -> ConfigResult<Document> {
    let value: Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(content)?,
        _ => serde_yaml::from_str(content)?,
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::InvalidDocument(format!(
            "expected a mapping at the root of {}, found {}",
            path.display(),
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

/// One entry of the `"Subscriptions"` array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord<'a> {
    /// The `"Group"` label, if it is a string (possibly empty)
    pub group: Option<&'a str>,
    /// The `"Products"` list, if it is an array of strings
    pub products: Option<Vec<&'a str>>,
}

impl<'a> SubscriptionRecord<'a> {
    fn from_mapping(record: &'a Map<String, Value>) -> Self {
        Self {
            group: record.get(GROUP_KEY).and_then(Value::as_str),
            products: record.get(PRODUCTS_KEY).and_then(string_array),
        }
    }

    /// Label and products, when both are present and well formed
    pub fn entries(&self) -> Option<(&'a str, &[&'a str])> {
        Some((self.group?, self.products.as_deref()?))
    }
}

/// Which of the accepted layouts a document uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductLayout<'a> {
    /// `"Products"` only
    Flat { products: Vec<&'a str> },
    /// `"Products"` plus `"Subscriptions"`
    Grouped {
        products: Vec<&'a str>,
        subscriptions: Vec<SubscriptionRecord<'a>>,
    },
    /// `"Subscriptions"` without a usable `"Products"` list
    SubscriptionsOnly {
        subscriptions: Vec<SubscriptionRecord<'a>>,
    },
}

impl<'a> ProductLayout<'a> {
    /// Classify a document. Returns `None` when neither key holds a usable value.
    ///
    /// `"Products"` is usable only as an array of strings. `"Subscriptions"` is usable only
    /// as an array of mappings; a single non-mapping entry disqualifies the whole array.
    pub fn detect(document: &'a Document) -> Option<Self> {
        let products = document.get(PRODUCTS_KEY).and_then(string_array);
        let subscriptions = document
            .get(SUBSCRIPTIONS_KEY)
            .and_then(subscription_records);

        match (products, subscriptions) {
            (Some(products), None) => Some(Self::Flat { products }),
            (Some(products), Some(subscriptions)) => Some(Self::Grouped {
                products,
                subscriptions,
            }),
            (None, Some(subscriptions)) => Some(Self::SubscriptionsOnly { subscriptions }),
            (None, None) => None,
        }
    }

    /// Top-level product identifiers, if the document has a usable list
    pub fn products(&self) -> Option<&[&'a str]> {
        match self {
            Self::Flat { products } | Self::Grouped { products, .. } => Some(products.as_slice()),
            Self::SubscriptionsOnly { .. } => None,
        }
    }

    /// Subscription records, if the document has a usable `"Subscriptions"` array
    pub fn subscriptions(&self) -> Option<&[SubscriptionRecord<'a>]> {
        match self {
            Self::Flat { .. } => None,
            Self::Grouped { subscriptions, .. } | Self::SubscriptionsOnly { subscriptions } => {
                Some(subscriptions.as_slice())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat { .. } => "flat",
            Self::Grouped { .. } => "grouped",
            Self::SubscriptionsOnly { .. } => "subscriptions-only",
        }
    }
}

// Blank entries are not product identifiers and are skipped.
fn string_array(value: &Value) -> Option<Vec<&str>> {
    let items = value
        .as_array()?
        .iter()
        .map(Value::as_str)
        .collect::<Option<Vec<_>>>()?;
    Some(items.into_iter().filter(|id| !id.is_empty()).collect())
}

fn subscription_records(value: &Value) -> Option<Vec<SubscriptionRecord<'_>>> {
    value
        .as_array()?
        .iter()
        .map(|record| record.as_object().map(SubscriptionRecord::from_mapping))
        .collect()
}
