//! Product configuration loading and memoization

use storekit_collections::OrderedRegistry;

use crate::constants::STORE_CONFIGURATION;
use crate::document::{Document, DocumentSource, ProductLayout};
use crate::notification::{LogEventSink, StoreEventSink, StoreNotification};
use crate::subscription::SubscriptionGroupInfo;
use crate::validation::Validatable;
use crate::ProductId;

/// Memoized outcome of a load
///
/// `Empty` records a finished attempt with a negative result so it is not parsed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheSlot<T> {
    NotLoaded,
    Loaded(T),
    Empty,
}

impl<T: Clone> CacheSlot<T> {
    /// The recorded outcome, or `None` if no attempt has finished yet
    pub fn outcome(&self) -> Option<Option<T>> {
        match self {
            Self::NotLoaded => None,
            Self::Loaded(value) => Some(Some(value.clone())),
            Self::Empty => Some(None),
        }
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self, Self::NotLoaded)
    }
}

/// Reads product identifiers and subscription groups from a configuration document
///
/// Each loader memoizes both results independently after the first attempt; build a new
/// loader to force a re-parse. Loading takes `&mut self`, so concurrent first loads on one
/// instance need an external lock.
pub struct ConfigLoader {
    product_ids: CacheSlot<OrderedRegistry<ProductId>>,
    subscription_groups: CacheSlot<Vec<SubscriptionGroupInfo>>,
    sink: Box<dyn StoreEventSink>,
}

impl ConfigLoader {
    /// Create a loader reporting events through the `log` facade
    pub fn new() -> Self {
        Self::with_sink(LogEventSink)
    }

    /// Create a loader reporting events to a custom sink
    pub fn with_sink(sink: impl StoreEventSink + 'static) -> Self {
        Self {
            product_ids: CacheSlot::NotLoaded,
            subscription_groups: CacheSlot::NotLoaded,
            sink: Box::new(sink),
        }
    }

    /// Every product identifier in the document: the top-level `"Products"` list followed by
    /// the products of each subscription record, duplicates removed.
    ///
    /// Returns `None` when the document is absent, empty or has no usable `"Products"` list.
    /// With `use_cache` set, a previous outcome is returned without looking at `document`
    /// and the new outcome is memoized; otherwise the document is parsed and the cache is
    /// left untouched.
    pub fn load_all_product_ids(
        &mut self,
        document: Option<&Document>,
        use_cache: bool,
    ) -> Option<OrderedRegistry<ProductId>> {
        if use_cache {
            if let Some(outcome) = self.product_ids.outcome() {
                return outcome;
            }
        }

        let product_ids = self.parse_product_ids(document);
        if use_cache {
            self.product_ids = match &product_ids {
                Some(ids) => CacheSlot::Loaded(ids.clone()),
                None => CacheSlot::Empty,
            };
        }
        product_ids
    }

    /// Subscription groups with a non-empty label and at least one product, in document
    /// order. Returns `None` when there are none. Caching follows
    /// [`load_all_product_ids`](Self::load_all_product_ids) with its own slot.
    pub fn load_subscription_groups(
        &mut self,
        document: Option<&Document>,
        use_cache: bool,
    ) -> Option<Vec<SubscriptionGroupInfo>> {
        if use_cache {
            if let Some(outcome) = self.subscription_groups.outcome() {
                return outcome;
            }
        }

        let groups = parse_subscription_groups(document);
        if use_cache {
            self.subscription_groups = match &groups {
                Some(groups) => CacheSlot::Loaded(groups.clone()),
                None => CacheSlot::Empty,
            };
        }
        groups
    }

    /// [`load_all_product_ids`](Self::load_all_product_ids) for a document read from
    /// `source`. `filename` defaults to [`STORE_CONFIGURATION`]; the source is not consulted
    /// once an outcome is cached.
    pub fn read_product_ids(
        &mut self,
        source: &dyn DocumentSource,
        filename: Option<&str>,
    ) -> Option<OrderedRegistry<ProductId>> {
        if let Some(outcome) = self.product_ids.outcome() {
            return outcome;
        }

        let document = source.read(filename.unwrap_or(STORE_CONFIGURATION));
        self.load_all_product_ids(document.as_ref(), true)
    }

    /// [`load_subscription_groups`](Self::load_subscription_groups) for a document read
    /// from `source`.
    pub fn read_subscription_groups(
        &mut self,
        source: &dyn DocumentSource,
        filename: Option<&str>,
    ) -> Option<Vec<SubscriptionGroupInfo>> {
        if let Some(outcome) = self.subscription_groups.outcome() {
            return outcome;
        }

        let document = source.read(filename.unwrap_or(STORE_CONFIGURATION));
        self.load_subscription_groups(document.as_ref(), true)
    }

    /// Cached product identifier outcome
    pub fn product_ids_cache(&self) -> &CacheSlot<OrderedRegistry<ProductId>> {
        &self.product_ids
    }

    /// Cached subscription group outcome
    pub fn subscription_groups_cache(&self) -> &CacheSlot<Vec<SubscriptionGroupInfo>> {
        &self.subscription_groups
    }

    fn parse_product_ids(&self, document: Option<&Document>) -> Option<OrderedRegistry<ProductId>> {
        let Some(document) = document else {
            self.fail(StoreNotification::ConfigurationNotFound);
            return None;
        };

        if document.is_empty() {
            self.fail(StoreNotification::ConfigurationEmpty);
            return None;
        }

        let layout = ProductLayout::detect(document);
        let Some(products) = layout.as_ref().and_then(ProductLayout::products) else {
            self.fail(StoreNotification::ConfigurationEmpty);
            return None;
        };

        let mut product_ids: OrderedRegistry<ProductId> =
            products.iter().map(|id| id.to_string()).collect();

        // Records with a string label contribute even when the label is empty and the
        // group itself is dropped from the group list.
        let subscriptions = layout.as_ref().and_then(ProductLayout::subscriptions);
        for record in subscriptions.unwrap_or_default() {
            if let Some((_, group_products)) = record.entries() {
                product_ids.extend(group_products.iter().map(|id| id.to_string()));
            }
        }

        log::debug!("Read {} product identifiers", product_ids.len());
        self.sink.event(StoreNotification::ConfigurationSuccess);

        // An empty list is a finished attempt with nothing to offer.
        (!product_ids.is_empty()).then_some(product_ids)
    }

    fn fail(&self, reason: StoreNotification) {
        self.sink.event(reason);
        self.sink.event(StoreNotification::ConfigurationFailure);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("product_ids", &self.product_ids)
            .field("subscription_groups", &self.subscription_groups)
            .finish_non_exhaustive()
    }
}

fn parse_subscription_groups(document: Option<&Document>) -> Option<Vec<SubscriptionGroupInfo>> {
    let document = document.filter(|document| !document.is_empty())?;
    let layout = ProductLayout::detect(document)?;
    let records = layout.subscriptions()?;

    let groups: Vec<SubscriptionGroupInfo> = records
        .iter()
        .filter_map(|record| record.entries())
        .map(|(group, products)| SubscriptionGroupInfo::with_product_ids(group, products.iter().copied()))
        .filter(|info| match info.validate() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Skipping subscription group: {}", e);
                false
            }
        })
        .collect();

    (!groups.is_empty()).then_some(groups)
}
