//! `pricedesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{PricingError, PricingResult};
pub use id::{PriceBookId, ProductId, VariantId};
pub use money::{validate_currency_code, Money};
pub use value_object::ValueObject;
