//! Domain error model.

use thiserror::Error;

/// Result type used across the pricing domain.
pub type PricingResult<T> = Result<T, PricingError>;

/// Pricing-domain error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// configuration, read-only violations). The `Store` variant carries
/// persistence failures through unchanged; retry policy belongs to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A value failed validation (e.g. currency mismatch, malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested book or variant was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// An edit targeted a factored (derived, read-only) price book.
    #[error("price book is read-only")]
    ReadOnlyBook,

    /// Catalog state violates a setup invariant (e.g. no unique default book).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The persistence store failed; non-retriable at this layer.
    #[error("store failure: {0}")]
    Store(String),
}

impl PricingError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn read_only_book() -> Self {
        Self::ReadOnlyBook
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
