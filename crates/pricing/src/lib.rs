//! Variant price resolution and master-price propagation.
//!
//! For a (product, price book) pair this crate computes the per-variant
//! display rows an admin sees, applies edits through the store boundary, and
//! fills empty non-master rows with the master's price after a master edit.

pub mod resolver;
pub mod session;

pub use resolver::{PriceResolver, PriceRow};
pub use session::PricingSession;
