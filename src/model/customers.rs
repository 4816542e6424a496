use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::money::round_money;

/**
 * A discount policy for one class of customer.
 */
pub trait Discountable {
    /**
     * Discount rate for the given purchase amount, e.g. 0.05 for five percent.
     */
    fn discount_rate(&self, total_amount: Decimal) -> Decimal;

    /**
     * Final amount after the discount: `amount × (1 − rate)`.
     */
    fn apply_discount(&self, total_amount: Decimal) -> Decimal {
        total_amount - total_amount * self.discount_rate(total_amount)
    }
}

/**
 * Five percent on every purchase.
 */
pub struct RegularCustomer;

impl Discountable for RegularCustomer {
    fn discount_rate(&self, _total_amount: Decimal) -> Decimal {
        Decimal::new(5, 2)
    }
}

/**
 * Seven percent, ten percent from 5000.
 */
pub struct PremiumCustomer;

impl Discountable for PremiumCustomer {
    fn discount_rate(&self, total_amount: Decimal) -> Decimal {
        if total_amount >= Decimal::new(5000, 0) { Decimal::new(10, 2) } else { Decimal::new(7, 2) }
    }
}

/**
 * Ten percent, fifteen percent from 10000.
 */
pub struct WholesaleCustomer;

impl Discountable for WholesaleCustomer {
    fn discount_rate(&self, total_amount: Decimal) -> Decimal {
        if total_amount >= Decimal::new(10000, 0) { Decimal::new(15, 2) } else { Decimal::new(10, 2) }
    }
}

/**
 * Customer classes as selected in the console by their numeric code.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomerType {
    Regular = 1,
    Premium = 2,
    Wholesale = 3,
}

impl CustomerType {
    /**
     * Looks up the customer type for a console code.
     *
     * # Returns
     * `None` for codes other than 1, 2 or 3.
     */
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(CustomerType::Regular),
            2 => Some(CustomerType::Premium),
            3 => Some(CustomerType::Wholesale),
            _ => None,
        }
    }

    /**
     * The discount policy for this customer type.
     */
    pub fn policy(self) -> Box<dyn Discountable> {
        match self {
            CustomerType::Regular => Box::new(RegularCustomer),
            CustomerType::Premium => Box::new(PremiumCustomer),
            CustomerType::Wholesale => Box::new(WholesaleCustomer),
        }
    }
}

/**
 * Outcome of a discounted purchase.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub customer_type: CustomerType,
    pub original_amount: Decimal,
    pub discount_applied: Decimal,
    pub final_amount: Decimal,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "--- Receipt ---")?;
        writeln!(f, "Original Amount  : {:.2}", round_money(self.original_amount))?;
        writeln!(f, "Discount Applied : {:.2}", round_money(self.discount_applied))?;
        write!(f, "Final Amount     : {:.2}", round_money(self.final_amount))
    }
}
