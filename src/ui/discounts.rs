use std::io::{BufRead, Write};

use rust_decimal::Decimal;

use crate::{api::discounts::DiscountController, model::apperror::ApplicationError, ui::console::Console};

/**
 * Asks for a customer type and purchase amount and prints the receipt.
 */
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, controller: &DiscountController) -> Result<(), ApplicationError> {
    console.write_line("Customer types: 1 = Regular, 2 = Premium, 3 = Wholesale")?;
    let customer_code: i32 = console.read_value("Select customer type: ")?;
    let total_amount: Decimal = console.read_value("Enter total purchase amount: ")?;
    console.show(&controller.process_discount(customer_code, total_amount), |receipt| receipt.to_string())?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        service::discounts::DiscountService,
        ui::console::test::{console, output},
    };

    #[test]
    fn test_run_prints_receipt() {
        let mut console = console("2\n5000\n", false);
        run(&mut console, &DiscountController::new(DiscountService::new())).unwrap();
        let output = output(console);
        assert!(output.contains("--- Receipt ---"));
        assert!(output.contains("Original Amount  : 5000.00"));
        assert!(output.contains("Discount Applied : 500.00"));
        assert!(output.contains("Final Amount     : 4500.00"));
    }

    #[test]
    fn test_run_json_error() {
        let mut console = console("1\n-5\n", true);
        run(&mut console, &DiscountController::new(DiscountService::new())).unwrap();
        assert!(output(console).contains("{\"statusCode\":400,\"errorMessage\":\"Invalid Purchase Amount: Purchase amount should be greater than 0\"}"));
    }
}
