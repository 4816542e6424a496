use rust_decimal::Decimal;
use tracing::instrument;

use crate::{api::response::Response, model::customers::Receipt, service::discounts::DiscountService};

/**
 * Controller for the retail discount application.
 */
pub struct DiscountController {
    discount_service: DiscountService,
}

impl DiscountController {
    pub fn new(discount_service: DiscountService) -> Self {
        DiscountController { discount_service }
    }

    /**
     * Calculates the discount for a purchase.
     *
     * # Arguments
     * `customer_code`: Customer type code, 1 = Regular, 2 = Premium, 3 = Wholesale.
     * `total_amount`: The purchase amount. Must be greater than zero.
     *
     * # Returns
     * A `Response` carrying the `Receipt`.
     */
    #[instrument(skip(self), fields(service = "processDiscount"))]
    pub fn process_discount(&self, customer_code: i32, total_amount: Decimal) -> Response<Receipt> {
        if total_amount <= Decimal::ZERO {
            return Response::error("Invalid Purchase Amount: Purchase amount should be greater than 0");
        }
        Response::from(self.discount_service.process_discount(customer_code, total_amount))
    }
}
