use thiserror::Error;

use crate::domain::product::ProductId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("product `{0}` was not found in the catalog")]
    ProductNotFound(String),
    #[error("`{0}` is not a whole number")]
    NotAWholeNumber(String),
    #[error("quantity must be a whole number greater than zero")]
    InvalidQuantity,
    #[error("quantity for product `{product_id}` would exceed {max}")]
    QuantityOverflow { product_id: ProductId, max: u32 },
    #[error("catalog contains duplicate product id `{0}`")]
    DuplicateProductId(ProductId),
    #[error("invalid catalog product `{id}`: {reason}")]
    InvalidProduct { id: ProductId, reason: String },
}

impl DomainError {
    /// Text shown to the shopper; the `Display` form is for logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ProductNotFound(_) => "Product not found.",
            Self::NotAWholeNumber(_) => "Please enter a whole number.",
            Self::InvalidQuantity => "Please enter a positive whole number.",
            Self::QuantityOverflow { .. } => "That quantity is too large for the cart.",
            Self::DuplicateProductId(_) | Self::InvalidProduct { .. } => {
                "The product catalog is misconfigured."
            }
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound(_)
                | Self::NotAWholeNumber(_)
                | Self::InvalidQuantity
                | Self::QuantityOverflow { .. }
        )
    }

    /// Malformed shopper input that is worth asking for again.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::NotAWholeNumber(_) | Self::InvalidQuantity)
    }
}
