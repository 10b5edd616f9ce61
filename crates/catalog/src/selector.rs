use std::cmp::Ordering;

use pricedesk_core::{PriceBookId, PricingError, PricingResult};

use crate::book::PriceBook;
use crate::catalog::PriceBookCatalog;

/// Presents the available price books in a stable order and resolves
/// selections for a pricing session.
#[derive(Debug)]
pub struct BookSelector<C> {
    catalog: C,
}

/// Display order: default book first, then ascending priority, ties broken
/// by name.
fn display_order(a: &PriceBook, b: &PriceBook) -> Ordering {
    b.is_default()
        .cmp(&a.is_default())
        .then_with(|| a.priority().cmp(&b.priority()))
        .then_with(|| a.name().cmp(b.name()))
}

impl<C: PriceBookCatalog> BookSelector<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// All books in display order. Finite and eager; catalogs are small.
    pub fn list_books(&self) -> PricingResult<Vec<PriceBook>> {
        let mut books = self.catalog.all_books()?;
        books.sort_by(display_order);
        Ok(books)
    }

    /// The unique default book.
    ///
    /// The catalog invariant says exactly one default exists; an
    /// inconsistent catalog surfaces as a `Configuration` error rather than
    /// an arbitrary pick, so the caller can fall back to explicit selection.
    pub fn default_selection(&self) -> PricingResult<PriceBook> {
        let mut defaults: Vec<PriceBook> = self
            .catalog
            .all_books()?
            .into_iter()
            .filter(PriceBook::is_default)
            .collect();
        match defaults.len() {
            1 => Ok(defaults.remove(0)),
            0 => Err(PricingError::configuration("no default price book")),
            n => Err(PricingError::configuration(format!(
                "{n} default price books, expected exactly one"
            ))),
        }
    }

    /// Resolve a book by id.
    pub fn select(&self, book_id: PriceBookId) -> PricingResult<PriceBook> {
        self.catalog
            .all_books()?
            .into_iter()
            .find(|b| b.id_typed() == book_id)
            .ok_or(PricingError::NotFound)
    }
}
