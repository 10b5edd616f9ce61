use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use pricedesk_core::{PriceBookId, PricingError, PricingResult};

use crate::book::PriceBook;

/// Source of the available price books.
///
/// Returns books in no particular order; display ordering is the
/// [`crate::BookSelector`]'s responsibility.
pub trait PriceBookCatalog: Send + Sync {
    fn all_books(&self) -> PricingResult<Vec<PriceBook>>;
}

impl<C> PriceBookCatalog for Arc<C>
where
    C: PriceBookCatalog + ?Sized,
{
    fn all_books(&self) -> PricingResult<Vec<PriceBook>> {
        (**self).all_books()
    }
}

/// In-memory price book catalog for tests/dev and the hosting application's
/// bootstrap step.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    books: RwLock<HashMap<PriceBookId, PriceBook>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-time setup: create the system-wide default book.
    ///
    /// The default book always takes direct entry at priority 0. Fails when a
    /// default already exists; the uniqueness invariant is enforced on the
    /// write side here and re-checked defensively on the read side by
    /// `BookSelector::default_selection`.
    pub fn bootstrap_default(
        &self,
        name: impl Into<String>,
        currency: impl Into<String>,
    ) -> PricingResult<PriceBook> {
        let book = PriceBook::direct(PriceBookId::new(), name, currency, 0, true)?;
        let mut books = self.write_locked()?;
        if books.values().any(|b| b.is_default()) {
            return Err(PricingError::configuration(
                "default price book already exists",
            ));
        }
        books.insert(book.id_typed(), book.clone());
        Ok(book)
    }

    /// Register a non-default book (fixtures, seeding).
    pub fn add_book(&self, book: PriceBook) -> PricingResult<()> {
        let mut books = self.write_locked()?;
        if book.is_default() && books.values().any(|b| b.is_default()) {
            return Err(PricingError::configuration(
                "default price book already exists",
            ));
        }
        if books.contains_key(&book.id_typed()) {
            return Err(PricingError::validation(format!(
                "duplicate price book id: {}",
                book.id_typed()
            )));
        }
        books.insert(book.id_typed(), book);
        Ok(())
    }

    fn write_locked(
        &self,
    ) -> PricingResult<std::sync::RwLockWriteGuard<'_, HashMap<PriceBookId, PriceBook>>> {
        self.books
            .write()
            .map_err(|_| PricingError::store("catalog lock poisoned"))
    }
}

impl PriceBookCatalog for InMemoryCatalog {
    fn all_books(&self) -> PricingResult<Vec<PriceBook>> {
        let books = self
            .books
            .read()
            .map_err(|_| PricingError::store("catalog lock poisoned"))?;
        Ok(books.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_creates_the_default_book_once() {
        let catalog = InMemoryCatalog::new();
        let book = catalog.bootstrap_default("Default", "USD").unwrap();
        assert!(book.is_default());
        assert_eq!(book.priority(), 0);

        let err = catalog.bootstrap_default("Default", "USD").unwrap_err();
        match err {
            PricingError::Configuration(_) => {}
            _ => panic!("Expected Configuration error for second default"),
        }
    }

    #[test]
    fn add_book_rejects_second_default() {
        let catalog = InMemoryCatalog::new();
        catalog.bootstrap_default("Default", "USD").unwrap();

        let second = PriceBook::direct(PriceBookId::new(), "Other", "USD", 1, true).unwrap();
        let err = catalog.add_book(second).unwrap_err();
        match err {
            PricingError::Configuration(_) => {}
            _ => panic!("Expected Configuration error for second default"),
        }
    }

    #[test]
    fn add_book_rejects_duplicate_id() {
        let catalog = InMemoryCatalog::new();
        let book = PriceBook::direct(PriceBookId::new(), "Explicit", "USD", 5, false).unwrap();
        catalog.add_book(book.clone()).unwrap();

        let err = catalog.add_book(book).unwrap_err();
        match err {
            PricingError::Validation(_) => {}
            _ => panic!("Expected Validation error for duplicate id"),
        }
    }

    #[test]
    fn all_books_returns_every_registered_book() {
        let catalog = InMemoryCatalog::new();
        catalog.bootstrap_default("Default", "USD").unwrap();
        catalog
            .add_book(PriceBook::direct(PriceBookId::new(), "Explicit", "USD", 5, false).unwrap())
            .unwrap();

        assert_eq!(catalog.all_books().unwrap().len(), 2);
    }
}
