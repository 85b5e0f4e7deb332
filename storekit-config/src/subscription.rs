//! Subscription group records

use serde::{Deserialize, Serialize};
use storekit_collections::OrderedRegistry;

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use crate::ProductId;

/// A named subscription group and the products that belong to it
///
/// Serializes in the same record shape the configuration document uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionGroupInfo {
    /// Group label
    #[serde(rename = "Group")]
    pub group: String,

    /// Products in the group, in document order
    #[serde(rename = "Products", default)]
    pub product_ids: OrderedRegistry<ProductId>,
}

impl SubscriptionGroupInfo {
    /// Create an empty group
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            product_ids: OrderedRegistry::new(),
        }
    }

    /// Create a group from a list of identifiers; duplicates collapse
    pub fn with_product_ids<I, S>(group: impl Into<String>, product_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ProductId>,
    {
        Self {
            group: group.into(),
            product_ids: product_ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validatable for SubscriptionGroupInfo {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.group, "group", self.domain_name())?;

        if self.product_ids.is_empty() {
            return Err(self.validation_error(format!(
                "group '{}' does not list any products",
                self.group
            )));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "subscriptions"
    }
}
