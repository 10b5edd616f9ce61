use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pricedesk_core::{Money, PriceBookId, PricingError, PricingResult, VariantId};

/// A stored price: at most one per (book, variant) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub variant_id: VariantId,
    pub book_id: PriceBookId,
    pub amount: Money,
    pub updated_at: DateTime<Utc>,
}

/// Persistence boundary for price cells.
///
/// Writes are last-write-wins per (variant, book) cell; different cells never
/// interfere. Durability and isolation are the implementation's concern.
pub trait PriceStore: Send + Sync {
    fn find_price(
        &self,
        variant_id: VariantId,
        book_id: PriceBookId,
    ) -> PricingResult<Option<Price>>;

    /// Create or replace the unique price for the cell.
    fn upsert_price(
        &self,
        variant_id: VariantId,
        book_id: PriceBookId,
        amount: Money,
    ) -> PricingResult<Price>;

    /// Remove the stored price for the cell. Removing an absent cell is a
    /// no-op, so clearing an already-blank field stays idempotent.
    fn delete_price(&self, variant_id: VariantId, book_id: PriceBookId) -> PricingResult<()>;
}

impl<S> PriceStore for Arc<S>
where
    S: PriceStore + ?Sized,
{
    fn find_price(
        &self,
        variant_id: VariantId,
        book_id: PriceBookId,
    ) -> PricingResult<Option<Price>> {
        (**self).find_price(variant_id, book_id)
    }

    fn upsert_price(
        &self,
        variant_id: VariantId,
        book_id: PriceBookId,
        amount: Money,
    ) -> PricingResult<Price> {
        (**self).upsert_price(variant_id, book_id, amount)
    }

    fn delete_price(&self, variant_id: VariantId, book_id: PriceBookId) -> PricingResult<()> {
        (**self).delete_price(variant_id, book_id)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct CellKey {
    variant_id: VariantId,
    book_id: PriceBookId,
}

/// In-memory price store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryPriceStore {
    cells: RwLock<HashMap<CellKey, Price>>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PriceStore for InMemoryPriceStore {
    fn find_price(
        &self,
        variant_id: VariantId,
        book_id: PriceBookId,
    ) -> PricingResult<Option<Price>> {
        let cells = self
            .cells
            .read()
            .map_err(|_| PricingError::store("price store lock poisoned"))?;
        Ok(cells.get(&CellKey { variant_id, book_id }).cloned())
    }

    fn upsert_price(
        &self,
        variant_id: VariantId,
        book_id: PriceBookId,
        amount: Money,
    ) -> PricingResult<Price> {
        let price = Price {
            variant_id,
            book_id,
            amount,
            updated_at: Utc::now(),
        };
        let mut cells = self
            .cells
            .write()
            .map_err(|_| PricingError::store("price store lock poisoned"))?;
        tracing::debug!(%variant_id, %book_id, amount = %price.amount, "upsert price");
        cells.insert(CellKey { variant_id, book_id }, price.clone());
        Ok(price)
    }

    fn delete_price(&self, variant_id: VariantId, book_id: PriceBookId) -> PricingResult<()> {
        let mut cells = self
            .cells
            .write()
            .map_err(|_| PricingError::store("price store lock poisoned"))?;
        tracing::debug!(%variant_id, %book_id, "delete price");
        cells.remove(&CellKey { variant_id, book_id });
        Ok(())
    }
}
