//! Money value object: minor-unit amount plus ISO currency code.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::value_object::ValueObject;

/// An amount of money in a single currency.
///
/// Amounts are stored in the smallest currency unit (e.g. cents) to keep
/// arithmetic exact. Display formatting is a presentation concern and lives
/// with the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount_minor: u64,
    currency: String,
}

/// Validate an ISO 4217 currency code shape (three ASCII uppercase letters).
pub fn validate_currency_code(code: &str) -> PricingResult<()> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(PricingError::validation(format!(
            "invalid currency code: {code:?}"
        )));
    }
    Ok(())
}

impl Money {
    /// Create a `Money` value, validating the currency code (three ASCII
    /// uppercase letters, e.g. "USD").
    pub fn new(amount_minor: u64, currency: impl Into<String>) -> PricingResult<Self> {
        let currency = currency.into();
        validate_currency_code(&currency)?;
        Ok(Self {
            amount_minor,
            currency,
        })
    }

    pub fn amount_minor(&self) -> u64 {
        self.amount_minor
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    /// Return a new amount in the same currency.
    pub fn with_amount(&self, amount_minor: u64) -> Self {
        Self {
            amount_minor,
            currency: self.currency.clone(),
        }
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}.{:02} {}",
            self.amount_minor / 100,
            self.amount_minor % 100,
            self.currency
        )
    }
}
