use serde::{Deserialize, Serialize};

use pricedesk_core::{
    validate_currency_code, Entity, Money, PriceBookId, PricingError, PricingResult,
};

/// How a price book obtains its amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookKind {
    /// Amounts are entered directly by admins; rows are editable.
    Direct,
    /// Amounts are derived from the product base price; rows are read-only.
    Factored(PriceFactor),
}

/// Multiplier applied by a factored book to a product's base price.
///
/// Expressed in basis points so the factor stays exact under serde round-trips
/// (9_000 = 90% of base).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceFactor {
    multiplier_bps: u32,
}

impl PriceFactor {
    pub fn from_bps(multiplier_bps: u32) -> Self {
        Self { multiplier_bps }
    }

    pub fn multiplier_bps(&self) -> u32 {
        self.multiplier_bps
    }

    /// Apply the factor to a base price, rounding half-up to the nearest
    /// minor unit.
    pub fn apply(&self, base: &Money) -> Money {
        let scaled = base.amount_minor() as u128 * self.multiplier_bps as u128;
        let amount = ((scaled + 5_000) / 10_000) as u64;
        base.with_amount(amount)
    }
}

/// A named, currency-scoped table of prices.
///
/// Several books may apply to the same catalog; display order and default
/// selection are the responsibility of [`crate::BookSelector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBook {
    id: PriceBookId,
    name: String,
    currency: String,
    priority: i32,
    default: bool,
    kind: BookKind,
}

impl PriceBook {
    /// Create a direct-entry price book.
    pub fn direct(
        id: PriceBookId,
        name: impl Into<String>,
        currency: impl Into<String>,
        priority: i32,
        default: bool,
    ) -> PricingResult<Self> {
        Self::new(id, name, currency, priority, default, BookKind::Direct)
    }

    /// Create a factored (derived, read-only) price book. Factored books are
    /// never the default.
    pub fn factored(
        id: PriceBookId,
        name: impl Into<String>,
        currency: impl Into<String>,
        priority: i32,
        factor: PriceFactor,
    ) -> PricingResult<Self> {
        Self::new(id, name, currency, priority, false, BookKind::Factored(factor))
    }

    fn new(
        id: PriceBookId,
        name: impl Into<String>,
        currency: impl Into<String>,
        priority: i32,
        default: bool,
        kind: BookKind,
    ) -> PricingResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PricingError::validation("price book name cannot be empty"));
        }
        let currency = currency.into();
        validate_currency_code(&currency)?;
        Ok(Self {
            id,
            name,
            currency,
            priority,
            default,
            kind,
        })
    }

    pub fn id_typed(&self) -> PriceBookId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Lower priority sorts earlier among non-default books.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_default(&self) -> bool {
        self.default
    }

    pub fn kind(&self) -> &BookKind {
        &self.kind
    }

    pub fn is_factored(&self) -> bool {
        matches!(self.kind, BookKind::Factored(_))
    }

    /// Whether admins may edit amounts in this book.
    pub fn editable(&self) -> bool {
        !self.is_factored()
    }

    /// Drop-down label, e.g. `Default (USD)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.currency)
    }
}

impl Entity for PriceBook {
    type Id = PriceBookId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_book_is_editable() {
        let book = PriceBook::direct(PriceBookId::new(), "Default", "USD", 0, true).unwrap();
        assert!(book.editable());
        assert!(!book.is_factored());
        assert!(book.is_default());
        assert_eq!(book.label(), "Default (USD)");
    }

    #[test]
    fn factored_book_is_read_only() {
        let book = PriceBook::factored(
            PriceBookId::new(),
            "Factored",
            "USD",
            10,
            PriceFactor::from_bps(9_000),
        )
        .unwrap();
        assert!(!book.editable());
        assert!(book.is_factored());
        assert!(!book.is_default());
    }

    #[test]
    fn book_rejects_empty_name() {
        let err = PriceBook::direct(PriceBookId::new(), "   ", "USD", 0, false).unwrap_err();
        match err {
            PricingError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn book_rejects_malformed_currency() {
        let err = PriceBook::direct(PriceBookId::new(), "Default", "usd", 0, true).unwrap_err();
        match err {
            PricingError::Validation(_) => {}
            _ => panic!("Expected Validation error for currency"),
        }
    }

    #[test]
    fn factor_applies_with_half_up_rounding() {
        let base = Money::new(1_000, "USD").unwrap();

        // 90% of 10.00 is 9.00 exactly.
        assert_eq!(PriceFactor::from_bps(9_000).apply(&base).amount_minor(), 900);

        // 33.33% of 10.00 is 3.333, rounds to 3.33.
        assert_eq!(PriceFactor::from_bps(3_333).apply(&base).amount_minor(), 333);

        // 0.05% of 10.00 is 0.5 minor units, rounds up to 1.
        assert_eq!(PriceFactor::from_bps(5).apply(&base).amount_minor(), 1);
    }

    #[test]
    fn factor_keeps_base_currency() {
        let base = Money::new(999, "EUR").unwrap();
        let derived = PriceFactor::from_bps(10_000).apply(&base);
        assert_eq!(derived, base);
    }
}
