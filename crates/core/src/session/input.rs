use crate::domain::product::ProductId;
use crate::errors::DomainError;

/// Reads a typed product id. Any whole number is accepted here; values that
/// cannot name a catalog product (zero, negative, past `u32::MAX`) come back
/// as `ProductNotFound` so they are reported like any other absent id.
pub fn parse_product_id(input: &str) -> Result<ProductId, DomainError> {
    let trimmed = input.trim();
    if !is_whole_number(trimmed) {
        return Err(DomainError::NotAWholeNumber(trimmed.to_string()));
    }

    match trimmed.parse::<u32>() {
        Ok(value) if value > 0 => Ok(ProductId(value)),
        _ => Err(DomainError::ProductNotFound(trimmed.to_string())),
    }
}

pub fn parse_quantity(input: &str) -> Result<u32, DomainError> {
    match input.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(DomainError::InvalidQuantity),
    }
}

fn is_whole_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').or_else(|| text.strip_prefix('+')).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::{parse_product_id, parse_quantity};
    use crate::domain::product::ProductId;
    use crate::errors::DomainError;

    #[test]
    fn positive_ids_parse() {
        assert_eq!(parse_product_id(" 3 "), Ok(ProductId(3)));
        assert_eq!(parse_product_id("+12"), Ok(ProductId(12)));
    }

    #[test]
    fn unrepresentable_ids_are_absent_products() {
        for input in ["0", "-1", "-0", "4294967296", "99999999999999999999999"] {
            assert_eq!(
                parse_product_id(input),
                Err(DomainError::ProductNotFound(input.to_string())),
                "`{input}` should be an absent product"
            );
        }
    }

    #[test]
    fn non_numeric_ids_are_not_whole_numbers() {
        for input in ["abc", "", "1.5", "-", "2x"] {
            assert!(
                matches!(parse_product_id(input), Err(DomainError::NotAWholeNumber(_))),
                "`{input}` should be rejected as malformed"
            );
        }
    }

    #[test]
    fn quantity_must_be_positive() {
        assert_eq!(parse_quantity("7\n"), Ok(7));
        for input in ["0", "-2", "abc", "4294967296"] {
            assert_eq!(parse_quantity(input), Err(DomainError::InvalidQuantity));
        }
    }
}
