use pricedesk_catalog::{BookSelector, PriceBook, PriceBookCatalog, Product};
use pricedesk_core::{Money, PriceBookId, PricingError, PricingResult, VariantId};
use pricedesk_store::{Price, PriceStore};

use crate::resolver::{PriceResolver, PriceRow};

/// One admin's pricing session over a catalog and a price store.
///
/// State machine: `Unselected -> BookSelected` on `select`/`select_default`,
/// self-loop on every edit. Propagation fills live in the session and vanish
/// with it; there is no terminal state, the session ends when the caller
/// drops it.
#[derive(Debug)]
pub struct PricingSession<C, S> {
    selector: BookSelector<C>,
    resolver: PriceResolver<S>,
    active: Option<PriceBook>,
}

impl<C: PriceBookCatalog, S: PriceStore> PricingSession<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Self {
            selector: BookSelector::new(catalog),
            resolver: PriceResolver::new(store),
            active: None,
        }
    }

    /// All books in display order, for the book drop-down.
    pub fn list_books(&self) -> PricingResult<Vec<PriceBook>> {
        self.selector.list_books()
    }

    /// Enter `BookSelected` on the unique default book.
    pub fn select_default(&mut self) -> PricingResult<&PriceBook> {
        let book = self.selector.default_selection()?;
        tracing::debug!(book = %book.label(), "price book selected");
        Ok(self.active.insert(book))
    }

    /// Switch the active book.
    pub fn select(&mut self, book_id: PriceBookId) -> PricingResult<&PriceBook> {
        let book = self.selector.select(book_id)?;
        tracing::debug!(book = %book.label(), "price book selected");
        Ok(self.active.insert(book))
    }

    pub fn active_book(&self) -> Option<&PriceBook> {
        self.active.as_ref()
    }

    /// Display rows for the product under the active book.
    pub fn rows(&self, product: &Product) -> PricingResult<Vec<PriceRow>> {
        let book = self.require_selection()?;
        self.resolver.resolve_rows(product, book)
    }

    /// Edit one cell under the active book; `None` clears it.
    pub fn set_amount(
        &mut self,
        product: &Product,
        variant_id: VariantId,
        amount: Option<Money>,
    ) -> PricingResult<Option<Price>> {
        let book = self
            .active
            .clone()
            .ok_or_else(|| PricingError::configuration("no price book selected"))?;
        self.resolver.set_amount(product, variant_id, &book, amount)
    }

    fn require_selection(&self) -> PricingResult<&PriceBook> {
        self.active
            .as_ref()
            .ok_or_else(|| PricingError::configuration("no price book selected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricedesk_catalog::InMemoryCatalog;
    use pricedesk_core::ProductId;
    use pricedesk_store::InMemoryPriceStore;

    fn usd(amount: u64) -> Money {
        Money::new(amount, "USD").unwrap()
    }

    fn session_fixture() -> (
        PricingSession<InMemoryCatalog, InMemoryPriceStore>,
        PriceBookId,
    ) {
        let catalog = InMemoryCatalog::new();
        catalog.bootstrap_default("Default", "USD").unwrap();
        let explicit =
            PriceBook::direct(PriceBookId::new(), "Explicit", "USD", 5, false).unwrap();
        let explicit_id = explicit.id_typed();
        catalog.add_book(explicit).unwrap();

        (
            PricingSession::new(catalog, InMemoryPriceStore::new()),
            explicit_id,
        )
    }

    fn cap_product() -> Product {
        Product::new(ProductId::new(), "apache baseball cap", "CAP-1", usd(1_000)).unwrap()
    }

    #[test]
    fn session_starts_unselected() {
        let (session, _) = session_fixture();
        assert!(session.active_book().is_none());

        let err = session.rows(&cap_product()).unwrap_err();
        match err {
            PricingError::Configuration(msg) => assert!(msg.contains("no price book selected")),
            _ => panic!("Expected Configuration error before selection"),
        }
    }

    #[test]
    fn set_amount_requires_a_selection() {
        let (mut session, _) = session_fixture();
        let product = cap_product();

        let err = session
            .set_amount(&product, product.master().id_typed(), Some(usd(123)))
            .unwrap_err();
        match err {
            PricingError::Configuration(_) => {}
            _ => panic!("Expected Configuration error before selection"),
        }
    }

    #[test]
    fn select_default_enters_book_selected() {
        let (mut session, _) = session_fixture();
        let book = session.select_default().unwrap();
        assert!(book.is_default());
        assert!(session.active_book().unwrap().is_default());
    }

    #[test]
    fn select_switches_the_active_book() {
        let (mut session, explicit_id) = session_fixture();
        session.select_default().unwrap();
        session.select(explicit_id).unwrap();
        assert_eq!(session.active_book().unwrap().id_typed(), explicit_id);
    }

    #[test]
    fn select_rejects_unknown_ids_and_keeps_state() {
        let (mut session, _) = session_fixture();
        session.select_default().unwrap();

        let err = session.select(PriceBookId::new()).unwrap_err();
        match err {
            PricingError::NotFound => {}
            _ => panic!("Expected NotFound error for unknown book"),
        }
        // Failed selection leaves the previous book active.
        assert!(session.active_book().unwrap().is_default());
    }

    #[test]
    fn edits_self_loop_within_book_selected() {
        let (mut session, explicit_id) = session_fixture();
        let mut product = cap_product();
        product.add_variant("CAP-1-S").unwrap();
        session.select(explicit_id).unwrap();

        session
            .set_amount(&product, product.master().id_typed(), Some(usd(876)))
            .unwrap();
        let rows = session.rows(&product).unwrap();
        assert_eq!(rows[0].amount, Some(usd(876)));
        assert_eq!(rows[1].amount, Some(usd(876)));

        session
            .set_amount(&product, product.master().id_typed(), Some(usd(321)))
            .unwrap();
        let rows = session.rows(&product).unwrap();
        assert_eq!(rows[1].amount, Some(usd(321)));
        assert_eq!(session.active_book().unwrap().id_typed(), explicit_id);
    }

    #[test]
    fn default_selection_surfaces_catalog_inconsistency() {
        let catalog = InMemoryCatalog::new();
        catalog
            .add_book(PriceBook::direct(PriceBookId::new(), "Explicit", "USD", 5, false).unwrap())
            .unwrap();
        let mut session = PricingSession::new(catalog, InMemoryPriceStore::new());

        let err = session.select_default().unwrap_err();
        match err {
            PricingError::Configuration(_) => {}
            _ => panic!("Expected Configuration error with no default book"),
        }
    }
}
