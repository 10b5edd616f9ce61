use serde::{Deserialize, Serialize};

use pricedesk_core::{Entity, Money, PricingError, PricingResult, ProductId, VariantId};

/// A sellable variation of a product.
///
/// Exactly one variant per product is the master; it always exists, even for
/// single-variant products, and represents the product itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    id: VariantId,
    sku: String,
    master: bool,
    position: u32,
}

impl Variant {
    fn new(id: VariantId, sku: String, master: bool, position: u32) -> PricingResult<Self> {
        if sku.trim().is_empty() {
            return Err(PricingError::validation("SKU cannot be empty"));
        }
        Ok(Self {
            id,
            sku,
            master,
            position,
        })
    }

    pub fn id_typed(&self) -> VariantId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn is_master(&self) -> bool {
        self.master
    }

    /// Creation order among non-master variants; the master is position 0.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Row label in the admin prices table.
    pub fn display_label(&self) -> &str {
        if self.master {
            "Master"
        } else {
            &self.sku
        }
    }
}

impl Entity for Variant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A product and its variants.
///
/// The master variant is created together with the product; non-master
/// variants are appended explicitly and keep creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    base_price: Money,
    master: Variant,
    variants: Vec<Variant>,
}

impl Product {
    /// Create a product with its master variant.
    ///
    /// `base_price` is the master's implicit price in the default-book
    /// context and the computation base for factored books.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        sku: impl Into<String>,
        base_price: Money,
    ) -> PricingResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PricingError::validation("product name cannot be empty"));
        }
        let master = Variant::new(VariantId::new(), sku.into(), true, 0)?;
        Ok(Self {
            id,
            name,
            base_price,
            master,
            variants: Vec::new(),
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_price(&self) -> &Money {
        &self.base_price
    }

    pub fn master(&self) -> &Variant {
        &self.master
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Append a non-master variant in creation order, returning its id.
    pub fn add_variant(&mut self, sku: impl Into<String>) -> PricingResult<VariantId> {
        let position = self.variants.len() as u32 + 1;
        let variant = Variant::new(VariantId::new(), sku.into(), false, position)?;
        let id = variant.id_typed();
        self.variants.push(variant);
        Ok(id)
    }

    /// All variants, master first, then creation order.
    pub fn variants_including_master(&self) -> impl Iterator<Item = &Variant> {
        core::iter::once(&self.master).chain(self.variants.iter())
    }

    pub fn variant(&self, id: VariantId) -> Option<&Variant> {
        self.variants_including_master().find(|v| v.id_typed() == id)
    }

    pub fn contains_variant(&self, id: VariantId) -> bool {
        self.variant(id).is_some()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
