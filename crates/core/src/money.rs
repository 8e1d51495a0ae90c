use std::fmt;

use rust_decimal::Decimal;

pub const CURRENCY_SYMBOL: &str = "$";
pub const DISPLAY_SCALE: u32 = 2;

/// Dollar amount rendered the way the shop prints prices and totals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(pub Decimal);

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.round_dp(DISPLAY_SCALE);
        write!(f, "{CURRENCY_SYMBOL}{rounded:.2}")
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}
