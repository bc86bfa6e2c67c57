use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Asset;

/* A slice of an asset acquired at once, with what it cost in USD.
A lot only shrinks: a partial disposal splits it and both halves keep the acquisition date. */
#[derive(Hash, Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    pub asset: Asset,
    pub size: Decimal,
    pub usd_basis: Decimal,
    pub acquired: NaiveDate,
}

impl Lot {
    pub fn new(asset: &str, size: Decimal, usd_basis: Decimal, acquired: NaiveDate) -> Self {
        Lot {
            asset: asset.to_string(),
            size,
            usd_basis,
            acquired,
        }
    }

    /* Take `amount` (strictly smaller than the lot) out of this lot.
    The remaining basis is computed by subtraction so that both parts always add up to the original basis. */
    pub fn split_off(&mut self, amount: Decimal) -> Lot {
        let basis = self.usd_basis * amount / self.size;
        self.size -= amount;
        self.usd_basis -= basis;
        return Lot {
            asset: self.asset.clone(),
            size: amount,
            usd_basis: basis,
            acquired: self.acquired,
        };
    }
}

#[cfg(test)]
mod tests {

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_split_conserves_value() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 14).unwrap();
        let mut lot = Lot::new("BTC", dec!(3), dec!(1000), date);

        let taken = lot.split_off(dec!(1));

        assert_eq!(taken.size + lot.size, dec!(3));
        assert_eq!(taken.usd_basis + lot.usd_basis, dec!(1000));
        assert_eq!(taken.acquired, date);
        assert_eq!(lot.acquired, date);
        assert_eq!(taken.asset, "BTC");
    }
}
