use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use pricedesk_catalog::{BookKind, PriceBook, Product};
use pricedesk_core::{Money, PriceBookId, PricingError, PricingResult, ProductId, VariantId};
use pricedesk_store::{Price, PriceStore};

/// One row of the admin prices table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRow {
    pub variant_id: VariantId,
    /// "Master" for the master variant, the SKU otherwise.
    pub variant_label: String,
    /// `None` renders blank; resolution never synthesizes a zero.
    pub amount: Option<Money>,
    pub editable: bool,
}

/// Resolves per-variant display rows and applies edits.
///
/// Holds the session-scoped propagation state: after a master edit, empty
/// non-master rows display the master's amount. That fill is never written
/// to the store (display-only; see the session docs for the rule).
#[derive(Debug)]
pub struct PriceResolver<S> {
    store: S,
    fills: HashMap<(ProductId, PriceBookId), Money>,
}

impl<S: PriceStore> PriceResolver<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            fills: HashMap::new(),
        }
    }

    /// Compute the display row for every variant: master first, then
    /// creation order.
    ///
    /// Amount precedence per row: stored price (verbatim), then the factored
    /// computation for factored books, then an active propagation fill for
    /// empty non-master rows, then blank. Pure read; two calls with no
    /// intervening edit yield identical output.
    pub fn resolve_rows(
        &self,
        product: &Product,
        book: &PriceBook,
    ) -> PricingResult<Vec<PriceRow>> {
        let fill = self.fills.get(&(product.id_typed(), book.id_typed()));
        let editable = book.editable();

        let mut rows = Vec::with_capacity(product.variants().len() + 1);
        for variant in product.variants_including_master() {
            let stored = self
                .store
                .find_price(variant.id_typed(), book.id_typed())?
                .map(|p| p.amount);

            let amount = match (stored, book.kind()) {
                (Some(amount), _) => Some(amount),
                (None, BookKind::Factored(factor)) => Some(factor.apply(product.base_price())),
                (None, BookKind::Direct) if !variant.is_master() => fill.cloned(),
                (None, BookKind::Direct) => None,
            };

            rows.push(PriceRow {
                variant_id: variant.id_typed(),
                variant_label: variant.display_label().to_string(),
                amount,
                editable,
            });
        }
        Ok(rows)
    }

    /// Create, replace, or clear the price for one (variant, book) cell.
    ///
    /// All-or-nothing: every check precedes the single store write, and the
    /// propagation fill only changes after that write succeeds. A master
    /// edit records the new amount as the fill for (product, book); clearing
    /// the master clears it.
    pub fn set_amount(
        &mut self,
        product: &Product,
        variant_id: VariantId,
        book: &PriceBook,
        amount: Option<Money>,
    ) -> PricingResult<Option<Price>> {
        if book.is_factored() {
            return Err(PricingError::ReadOnlyBook);
        }
        let variant = product.variant(variant_id).ok_or(PricingError::NotFound)?;
        if let Some(amount) = &amount {
            if amount.currency() != book.currency() {
                return Err(PricingError::validation(format!(
                    "amount currency {} does not match book currency {}",
                    amount.currency(),
                    book.currency()
                )));
            }
        }

        let written = match &amount {
            Some(amount) => Some(self.store.upsert_price(
                variant_id,
                book.id_typed(),
                amount.clone(),
            )?),
            None => {
                self.store.delete_price(variant_id, book.id_typed())?;
                None
            }
        };

        if variant.is_master() {
            let key = (product.id_typed(), book.id_typed());
            match amount {
                Some(amount) => {
                    tracing::debug!(
                        product_id = %product.id_typed(),
                        book_id = %book.id_typed(),
                        %amount,
                        "master edit, refreshing propagation fill"
                    );
                    self.fills.insert(key, amount);
                }
                None => {
                    self.fills.remove(&key);
                }
            }
        }

        Ok(written)
    }
}
