use rust_decimal::Decimal;
use tracing::instrument;

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    customers::{CustomerType, Receipt},
};

/**
 * Represents the service for retail discounts.
 */
pub struct DiscountService {}

impl DiscountService {
    pub fn new() -> Self {
        DiscountService {}
    }

    /**
     * Applies the discount policy of the customer type to a purchase.
     *
     * # Arguments
     * `customer_code`: Customer type code, 1 = Regular, 2 = Premium, 3 = Wholesale.
     * `total_amount`: The purchase amount before discount.
     *
     * # Returns
     * A Result containing the `Receipt` or an `ApplicationError` for unknown customer codes.
     */
    #[instrument(skip(self))]
    pub fn process_discount(&self, customer_code: i32, total_amount: Decimal) -> Result<Receipt, ApplicationError> {
        let Some(customer_type) = CustomerType::from_code(customer_code) else {
            return Err(ApplicationError::new(ErrorType::Validation, "Invalid Customer Type"));
        };
        let final_amount = customer_type.policy().apply_discount(total_amount);
        Ok(Receipt { customer_type, original_amount: total_amount, discount_applied: total_amount - final_amount, final_amount })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_premium_at_threshold_uses_ten_percent() {
        let receipt = DiscountService::new().process_discount(2, Decimal::new(5000, 0)).unwrap();
        assert_eq!(receipt.customer_type, CustomerType::Premium);
        assert_eq!(receipt.discount_applied, Decimal::new(500, 0));
        assert_eq!(receipt.final_amount, Decimal::new(4500, 0));
    }

    #[test]
    fn test_regular_discount() {
        let receipt = DiscountService::new().process_discount(1, Decimal::new(12345, 1)).unwrap();
        assert_eq!(receipt.final_amount, Decimal::new(1172775, 3));
        assert_eq!(receipt.original_amount, receipt.final_amount + receipt.discount_applied);
    }

    #[test]
    fn test_wholesale_below_threshold() {
        let receipt = DiscountService::new().process_discount(3, Decimal::new(8000, 0)).unwrap();
        assert_eq!(receipt.final_amount, Decimal::new(7200, 0));
    }

    #[test]
    fn test_invalid_customer_type() {
        let error = DiscountService::new().process_discount(9, Decimal::new(100, 0)).unwrap_err();
        assert_eq!(error.message, "Invalid Customer Type");
    }
}
