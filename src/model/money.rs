use rust_decimal::{Decimal, RoundingStrategy};

/**
 * Number of fractional digits shown for money.
 */
pub const MONEY_SCALE: u32 = 2;

/**
 * Rounds an amount to cents, halves away from zero.
 */
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_round_money_half_cent() {
        assert_eq!(round_money(Decimal::new(61725, 3)), Decimal::new(6173, 2));
        assert_eq!(round_money(Decimal::new(1172775, 3)), Decimal::new(117278, 2));
        assert_eq!(round_money(Decimal::new(-5, 3)), Decimal::new(-1, 2));
        assert_eq!(round_money(Decimal::new(1234, 3)), Decimal::new(123, 2));
    }
}
