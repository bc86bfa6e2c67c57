use std::fmt;

use rust_decimal::Decimal;

use crate::{structs::Transaction, utils::round_cents};

/* Totals of a run, as they would be reported at the bottom of the form */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxSummary {
    pub transactions: usize,
    pub proceeds: Decimal,
    pub cost: Decimal,
    pub gain: Decimal,
}

impl TaxSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(TaxSummary::default(), |mut summary, tx| {
                summary.transactions += 1;
                summary.proceeds += tx.proceeds;
                summary.cost += tx.cost;
                summary.gain += tx.gain;
                summary
            })
    }
}

impl fmt::Display for TaxSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} disposals, proceeds {}, cost {}, gain {}",
            self.transactions,
            round_cents(self.proceeds),
            round_cents(self.cost),
            round_cents(self.gain)
        )
    }
}
