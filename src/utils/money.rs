use rust_decimal::{Decimal, RoundingStrategy};

/* Amounts are only rounded when displayed or exported, never in the ledger */
pub fn round_cents(amount: Decimal) -> Decimal {
    return amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
}
