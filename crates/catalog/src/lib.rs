//! Catalog domain module: price books and products.
//!
//! This crate contains the price-book and product/variant model plus the
//! book selector, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage).

pub mod book;
pub mod catalog;
pub mod product;
pub mod selector;

pub use book::{BookKind, PriceBook, PriceFactor};
pub use catalog::{InMemoryCatalog, PriceBookCatalog};
pub use product::{Product, Variant};
pub use selector::BookSelector;
