/* Export of the disposals in the column order of IRS form 8949 */

use std::{fs::File, io::Write, path::Path};

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    errors::{IoError, ParsingError},
    structs::Transaction,
    utils::{create_directories_if_needed, format_tax_date, round_cents},
};

#[derive(Debug, Serialize)]
struct FormRow {
    description: String,
    date_acquired: String,
    date_sold: String,
    proceeds: String,
    cost: String,
    gain: String,
}

impl From<&Transaction> for FormRow {
    fn from(tx: &Transaction) -> Self {
        FormRow {
            description: tx.description.clone(),
            date_acquired: tx.date_acquired.to_string(),
            date_sold: format_tax_date(&tx.date_sold),
            proceeds: cents(tx.proceeds),
            cost: cents(tx.cost),
            gain: cents(tx.gain),
        }
    }
}

// Always two decimals, whatever the scale the computation ended with
fn cents(amount: Decimal) -> String {
    return format!("{:.2}", round_cents(amount));
}

pub fn write_form_8949_to<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), ParsingError> {
    let mut wtr = Writer::from_writer(writer);
    if transactions.is_empty() {
        // serialize writes the header with the first row only
        wtr.write_record(["description", "date_acquired", "date_sold", "proceeds", "cost", "gain"])
            .map_err(|e| csv_error(&e))?;
    }
    for tx in transactions {
        wtr.serialize(FormRow::from(tx)).map_err(|e| csv_error(&e))?;
    }
    wtr.flush()
        .map_err(|e| ParsingError::Csv { line: None, error: e.to_string() })?;
    Ok(())
}

pub fn write_form_8949(path: &str, transactions: &[Transaction]) -> Result<(), ParsingError> {
    create_directories_if_needed(path).map_err(|e| IoError::new(path, e.to_string()))?;
    let file = File::create(path).map_err(|e| IoError::new(path, e.to_string()))?;
    return write_form_8949_to(file, transactions);
}

/* Where the transactions of a failed run go, so they can't be mistaken for a complete form:
transactions.csv -> transactions.incomplete.csv */
pub fn incomplete_path(path: &str) -> String {
    return Path::new(path)
        .with_extension("incomplete.csv")
        .to_string_lossy()
        .to_string();
}

fn csv_error(error: &csv::Error) -> ParsingError {
    ParsingError::Csv {
        line: None,
        error: error.to_string(),
    }
}

#[cfg(test)]
mod tests {

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serial_test::serial;

    use super::*;
    use crate::structs::Lot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction::new(
                "0.4 BTC (virtual currency)".to_string(),
                vec![Lot::new("BTC", dec!(0.4), dec!(4000), date(2021, 1, 1))],
                date(2021, 3, 15),
                dec!(5000),
                Some("17".to_string()),
            ),
            Transaction::new(
                "1.0 ETH (virtual currency)".to_string(),
                vec![
                    Lot::new("ETH", dec!(0.5), dec!(1000.333), date(2020, 5, 1)),
                    Lot::new("ETH", dec!(0.5), dec!(1000), date(2020, 6, 1)),
                ],
                date(2021, 4, 2),
                dec!(1500.004),
                None,
            ),
        ]
    }

    #[test]
    fn test_write_rows() {
        let mut buffer = Vec::new();
        write_form_8949_to(&mut buffer, &transactions()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "description,date_acquired,date_sold,proceeds,cost,gain\n\
             0.4 BTC (virtual currency),01/01/2021,03/15/2021,5000.00,4000.00,1000.00\n\
             1.0 ETH (virtual currency),VARIOUS,04/02/2021,1500.00,2000.33,-500.33\n"
        );
    }

    #[test]
    fn test_empty_form_has_header() {
        let mut buffer = Vec::new();
        write_form_8949_to(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "description,date_acquired,date_sold,proceeds,cost,gain\n"
        );
    }

    #[test]
    #[serial]
    fn test_write_file() {
        let path = ".data_test/form/transactions.csv";
        write_form_8949(path, &transactions()).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written.lines().count(), 3);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_incomplete_path() {
        assert_eq!(incomplete_path("out/transactions.csv"), "out/transactions.incomplete.csv");
        assert_eq!(incomplete_path("transactions"), "transactions.incomplete.csv");
    }
}
