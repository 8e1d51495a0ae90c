pub mod input;
pub mod states;

pub use input::{parse_product_id, parse_quantity};
pub use states::{MenuChoice, SessionState, SessionTransitionError};
