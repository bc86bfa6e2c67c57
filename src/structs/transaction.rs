use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Lot;
use crate::utils::format_tax_date;

pub const VARIOUS: &str = "VARIOUS";

/* Acquisition date reported for a disposal: one date if every disposed lot shares it */
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum AcquiredDate {
    Date(NaiveDate),
    Various,
}

impl AcquiredDate {
    /* As soon as two lots disagree the whole disposal is VARIOUS. No lot at all is VARIOUS too. */
    pub fn from_lots(lots: &[Lot]) -> Self {
        let mut dates = lots.iter().map(|lot| lot.acquired);
        match dates.next() {
            Some(first) => {
                if dates.all(|date| date == first) {
                    AcquiredDate::Date(first)
                } else {
                    AcquiredDate::Various
                }
            }
            None => AcquiredDate::Various,
        }
    }
}

impl fmt::Display for AcquiredDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AcquiredDate::Date(date) => write!(f, "{}", format_tax_date(date)),
            AcquiredDate::Various => write!(f, "{VARIOUS}"),
        }
    }
}

/* A realized disposal, one line of the form 8949.

The disposed lots and the originating trade id are kept for auditing, they are not exported. */
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,
    pub date_acquired: AcquiredDate,
    pub date_sold: NaiveDate,
    pub proceeds: Decimal,
    pub cost: Decimal,
    pub gain: Decimal,
    pub consumed_lots: Vec<Lot>,
    pub trade_id: Option<String>,
}

impl Transaction {
    pub fn new(
        description: String,
        consumed_lots: Vec<Lot>,
        date_sold: NaiveDate,
        proceeds: Decimal,
        trade_id: Option<String>,
    ) -> Self {
        let cost: Decimal = consumed_lots.iter().map(|lot| lot.usd_basis).sum();
        Transaction {
            description,
            date_acquired: AcquiredDate::from_lots(&consumed_lots),
            date_sold,
            proceeds,
            cost,
            gain: proceeds - cost,
            consumed_lots,
            trade_id,
        }
    }
}

pub fn describe_disposal(amount: Decimal, asset: &str) -> String {
    return format!("{} {asset} (virtual currency)", amount.abs());
}
