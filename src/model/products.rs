use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    money::round_money,
};

/**
 * Highest number of fractional digits a price can carry. Matches `NUMERIC(10, 2)`.
 */
pub const PRICE_SCALE: u32 = 2;

/**
 * Prices must stay below this many whole units to fit `NUMERIC(10, 2)`.
 */
pub const PRICE_LIMIT: i64 = 100_000_000;

/**
 * A catalog product as stored in the `products` table.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: i32,
}

impl Product {
    pub fn new(id: i32, name: String, category: String, price: Decimal, stock_quantity: i32) -> Self {
        Product { id, name, category, price, stock_quantity }
    }

    /**
     * Checks the fields required before a product is added or updated.
     *
     * # Arguments
     * `message`: The error message to report when the product is invalid.
     *
     * # Returns
     * The product itself or a validation error carrying `message`.
     */
    pub fn validate(self, message: &str) -> Result<Self, ApplicationError> {
        let valid = self.id > 0
            && !self.name.trim().is_empty()
            && !self.category.trim().is_empty()
            && self.price > Decimal::ZERO
            && self.price < Decimal::new(PRICE_LIMIT, 0)
            && self.price.normalize().scale() <= PRICE_SCALE
            && self.stock_quantity >= 1;
        if !valid {
            tracing::debug!("Product failed validation: {:?}", self);
            return Err(ApplicationError::new(ErrorType::Validation, message));
        }
        Ok(self)
    }
}

/**
 * Database row for a product: product_id, name, category, price, stock_quantity.
 */
pub type QueryProductDbResp = (i32, String, String, Decimal, i32);

impl From<QueryProductDbResp> for Product {
    fn from(row: QueryProductDbResp) -> Self {
        Product::new(row.0, row.1, row.2, row.3, row.4)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ID: {} | Name: {} | Category: {} | Price: {:.2} | StockQuantity: {}", self.id, self.name, self.category, round_money(self.price), self.stock_quantity)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn product() -> Product {
        Product::new(1, "Kettle".to_string(), "Kitchen".to_string(), Decimal::new(149999, 2), 10)
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(product().validate("invalid").unwrap(), product());
    }

    #[test]
    fn test_validate_rejects_each_field() {
        let cases = [
            Product { id: 0, ..product() },
            Product { name: " ".to_string(), ..product() },
            Product { category: String::new(), ..product() },
            Product { price: Decimal::ZERO, ..product() },
            Product { price: Decimal::new(-5, 0), ..product() },
            Product { price: Decimal::new(19999, 3), ..product() },
            Product { price: Decimal::new(PRICE_LIMIT, 0), ..product() },
            Product { stock_quantity: 0, ..product() },
        ];
        for case in cases {
            let error = case.validate("Invalid Input Parameters").unwrap_err();
            assert_eq!(error.error_type, ErrorType::Validation);
            assert_eq!(error.message, "Invalid Input Parameters");
        }
    }

    #[test]
    fn test_validate_accepts_largest_price() {
        let priced = Product { price: Decimal::new(PRICE_LIMIT * 100 - 1, 2), ..product() };
        assert_eq!(priced.validate("invalid").unwrap().price, Decimal::new(9_999_999_999, 2));
    }

    #[test]
    fn test_validate_accepts_trailing_zero_scale() {
        let priced = Product { price: Decimal::new(19900, 3), ..product() };
        assert!(priced.validate("invalid").is_ok());
    }

    #[test]
    fn test_from_row_and_display() {
        let product = Product::from((4, "Lamp".to_string(), "Home".to_string(), Decimal::new(25, 0), 3));
        assert_eq!(product.to_string(), "ID: 4 | Name: Lamp | Category: Home | Price: 25.00 | StockQuantity: 3");
    }
}
