//! Diagnostic events emitted while reading product configuration
//!
//! Events are fire-and-forget. A sink must not panic or block, and nothing it does feeds
//! back into loading.

use std::fmt;
use std::sync::Arc;

/// Notifications raised by the configuration loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreNotification {
    /// The product document could not be found or read
    ConfigurationNotFound,
    /// The product document was empty or held no usable product list
    ConfigurationEmpty,
    /// Reading the product configuration failed
    ConfigurationFailure,
    /// Product identifiers were read successfully
    ConfigurationSuccess,
}

impl StoreNotification {
    /// Human readable summary of the event
    pub fn short_description(&self) -> &'static str {
        match self {
            Self::ConfigurationNotFound => "Configuration file not found",
            Self::ConfigurationEmpty => "Configuration file does not contain any product definitions",
            Self::ConfigurationFailure => "Configuration failure",
            Self::ConfigurationSuccess => "Configuration success",
        }
    }

    /// Log level the event is reported at by [`LogEventSink`]
    pub fn level(&self) -> log::Level {
        match self {
            Self::ConfigurationNotFound | Self::ConfigurationEmpty => log::Level::Warn,
            Self::ConfigurationFailure => log::Level::Error,
            Self::ConfigurationSuccess => log::Level::Info,
        }
    }
}

impl fmt::Display for StoreNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_description())
    }
}

/// Receiver for [`StoreNotification`] events
pub trait StoreEventSink: Send + Sync {
    /// Record an event
    fn event(&self, event: StoreNotification);
}

impl<T: StoreEventSink + ?Sized> StoreEventSink for Arc<T> {
    fn event(&self, event: StoreNotification) {
        (**self).event(event)
    }
}

/// Default sink forwarding events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl StoreEventSink for LogEventSink {
    fn event(&self, event: StoreNotification) {
        log::log!(target: "storekit::config", event.level(), "{}", event.short_description());
    }
}
