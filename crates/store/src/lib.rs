//! Durable price records per (variant, price book) cell.
//!
//! The resolver treats this boundary as an external collaborator: failures
//! cross it unchanged as `PricingError::Store` and retry policy belongs to
//! the caller.

pub mod price_store;

pub use price_store::{InMemoryPriceStore, Price, PriceStore};
