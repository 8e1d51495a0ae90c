use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl CartLine<'_> {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Quantities requested per product. Lines borrow products from the catalog
/// and are keyed by product id, so each product has at most one line.
#[derive(Clone, Debug, Default)]
pub struct Cart<'a> {
    lines: BTreeMap<ProductId, CartLine<'a>>,
}

impl<'a> Cart<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `product` and returns the new line quantity.
    pub fn add(&mut self, product: &'a Product, quantity: u32) -> Result<u32, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }

        let current = self.quantity_of(product.id);
        let updated = current
            .checked_add(quantity)
            .ok_or(DomainError::QuantityOverflow { product_id: product.id, max: u32::MAX })?;

        self.lines.insert(product.id, CartLine { product, quantity: updated });
        Ok(updated)
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine<'a>> + '_ {
        self.lines.values()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines.get(&product_id).map(|line| line.quantity).unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> Decimal {
        self.lines.values().map(|line| line.line_total()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.values().map(|line| u64::from(line.quantity)).sum()
    }
}
