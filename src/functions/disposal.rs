/* Turn one fill into lot movements and, when something was disposed of, into a taxable transaction.

The side is the exchange's: on a BASE-QUOTE product, BUY gives QUOTE to receive BASE, SELL gives BASE to receive QUOTE.
Any crypto given away is a disposal, including when the other side is crypto: its USD value then comes from the PriceManager. */

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    errors::TaxError,
    structs::{describe_disposal, Fill, Lot, LotManager, PriceManager, Side, Transaction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    // USD -> crypto: only a new lot
    UsdPurchase,
    // quote crypto -> base crypto: disposal of the quote
    CryptoPurchase,
    // base crypto -> quote crypto: disposal of the base
    CryptoSale,
    // crypto -> USD
    UsdSale,
}

impl FillKind {
    pub fn classify(fill: &Fill) -> Self {
        match (fill.pair.is_usd_quoted(), fill.side) {
            (true, Side::Buy) => FillKind::UsdPurchase,
            (false, Side::Buy) => FillKind::CryptoPurchase,
            (false, Side::Sell) => FillKind::CryptoSale,
            (true, Side::Sell) => FillKind::UsdSale,
        }
    }

    pub fn is_disposal(&self) -> bool {
        return *self != FillKind::UsdPurchase;
    }
}

pub async fn recognize_fill(
    fill: &Fill,
    lots: &mut LotManager,
    prices: &PriceManager,
) -> Result<Option<Transaction>, TaxError> {
    let base = &fill.pair.base;
    let quote = &fill.pair.quote;
    let kind = FillKind::classify(fill);
    debug!(
        pair = %fill.pair,
        side = %fill.side,
        ?kind,
        disposal = kind.is_disposal(),
        trade_id = ?fill.trade_id,
        "recognizing fill"
    );

    match kind {
        FillKind::UsdPurchase => {
            // The USD spent, fees included, is the basis
            lots.add_lot(base, fill.size, fill.total_amount(), fill.date)?;
            Ok(None)
        }
        FillKind::CryptoPurchase => {
            let spent = fill.total_amount();
            let consumed = lots.consume_lots(quote, spent)?;
            let usd_value = prices.lookup(base, fill.timestamp).await? * fill.size;
            let tx = disposal(fill, describe_disposal(spent, quote), consumed, usd_value);
            lots.add_lot(base, fill.size, usd_value, fill.date)?;
            Ok(Some(tx))
        }
        FillKind::CryptoSale => {
            let received = fill.total_amount();
            let consumed = lots.consume_lots(base, fill.size)?;
            let usd_value = prices.lookup(quote, fill.timestamp).await? * received;
            let tx = disposal(fill, describe_disposal(fill.size, base), consumed, usd_value);
            lots.add_lot(quote, received, usd_value, fill.date)?;
            Ok(Some(tx))
        }
        FillKind::UsdSale => {
            let consumed = lots.consume_lots(base, fill.size)?;
            let tx = disposal(
                fill,
                describe_disposal(fill.size, base),
                consumed,
                fill.total_amount(),
            );
            Ok(Some(tx))
        }
    }
}

fn disposal(
    fill: &Fill,
    description: String,
    consumed: Vec<Lot>,
    proceeds: Decimal,
) -> Transaction {
    let tx = Transaction::new(
        description,
        consumed,
        fill.date,
        proceeds,
        fill.trade_id.clone(),
    );
    debug!(
        description = %tx.description,
        proceeds = %tx.proceeds,
        cost = %tx.cost,
        gain = %tx.gain,
        "disposal recognized"
    );
    return tx;
}
