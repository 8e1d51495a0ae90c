use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

/// Read-only set of purchasable products, kept in construction order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            validate_product(product)?;
            if !seen.insert(product.id) {
                return Err(DomainError::DuplicateProductId(product.id));
            }
        }

        Ok(Self { products })
    }

    /// Products shipped with the simulator when configuration supplies none.
    pub fn default_products() -> Vec<Product> {
        vec![
            Product::new(1, "Product1", Decimal::new(1999, 2)),
            Product::new(2, "Product2", Decimal::new(2999, 2)),
            Product::new(3, "Product3", Decimal::new(3999, 2)),
        ]
    }

    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    pub fn find_by_id(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn require(&self, product_id: ProductId) -> Result<&Product, DomainError> {
        self.find_by_id(product_id)
            .ok_or_else(|| DomainError::ProductNotFound(product_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn validate_product(product: &Product) -> Result<(), DomainError> {
    let invalid =
        |reason: &str| DomainError::InvalidProduct { id: product.id, reason: reason.to_string() };

    if product.id.0 == 0 {
        return Err(invalid("id must be a positive integer"));
    }
    if product.name.trim().is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if product.price < Decimal::ZERO {
        return Err(invalid("price must not be negative"));
    }

    Ok(())
}
