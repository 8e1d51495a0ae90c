pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod money;
pub mod session;

pub use catalog::Catalog;
pub use domain::cart::{Cart, CartLine};
pub use domain::product::{Product, ProductId};
pub use errors::DomainError;
pub use money::Money;
pub use session::{
    parse_product_id, parse_quantity, MenuChoice, SessionState, SessionTransitionError,
};
