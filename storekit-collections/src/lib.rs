//! Collection types for the StoreKit helper
//!
//! This crate provides the insertion-ordered, duplicate-free registry used as the
//! canonical list of product identifiers.

pub mod ordered_registry;

// Re-export main types
pub use ordered_registry::{IntoIter, Iter, OrderedRegistry};
