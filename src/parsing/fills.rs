/* Reader for the exchange "fills" export.

Expected columns: trade id, product, side, created at, size, size unit, price, fee, total, price/fee/total unit.
The optional timestamp (UNIX seconds) and yyyy, mm, dd columns take precedence over `created at` when present.
Other columns (portfolio, fee...) are ignored. Rows are returned in file order, they are not sorted. */

use std::{fs::File, io::Read, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    errors::{IoError, ParsingError},
    structs::{Fill, Side, TradingPair},
    utils::decimal_to_datetime_utc,
};

#[derive(Debug, Deserialize)]
struct FillRecord {
    #[serde(rename = "trade id", default)]
    trade_id: Option<String>,
    product: String,
    side: String,
    #[serde(rename = "created at", default)]
    created_at: Option<String>,
    size: String,
    #[serde(rename = "size unit")]
    size_unit: String,
    price: String,
    total: String,
    #[serde(rename = "price/fee/total unit")]
    total_unit: String,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    yyyy: Option<String>,
    #[serde(default)]
    mm: Option<String>,
    #[serde(default)]
    dd: Option<String>,
}

pub fn read_fills(file_name: &str) -> Result<Vec<Fill>, ParsingError> {
    let file = File::open(file_name).map_err(|e| IoError::new(file_name, e.to_string()))?;
    return read_fills_from(file);
}

pub fn read_fills_from<R: Read>(reader: R) -> Result<Vec<Fill>, ParsingError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| csv_error(&e))?
        .clone();

    let mut fills = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| csv_error(&e))?;
        fills.push(to_fill(&record, &headers)?);
    }
    return Ok(fills);
}

fn csv_error(error: &csv::Error) -> ParsingError {
    ParsingError::Csv {
        line: error.position().map(|p| p.line()),
        error: error.to_string(),
    }
}

fn to_fill(record: &StringRecord, headers: &StringRecord) -> Result<Fill, ParsingError> {
    let line = record.position().map(|p| p.line());
    let row: FillRecord = record
        .deserialize(Some(headers))
        .map_err(|e| ParsingError::Csv {
            line,
            error: e.to_string(),
        })?;

    let pair: TradingPair = parse_field(line, "product", &row.product)?;
    let side: Side = parse_field(line, "side", &row.side)?;
    if row.size_unit != pair.base {
        return Err(invalid(line, "size unit", &row.size_unit));
    }
    if row.total_unit != pair.quote {
        return Err(invalid(line, "price/fee/total unit", &row.total_unit));
    }

    let created_at = match row.created_at.as_deref() {
        Some(value) => Some(
            DateTime::parse_from_rfc3339(value)
                .map(|time| time.with_timezone(&Utc))
                .map_err(|_| invalid(line, "created at", value))?,
        ),
        None => None,
    };

    let timestamp = match row.timestamp.as_deref() {
        Some(value) => {
            let seconds: Decimal = parse_field(line, "timestamp", value)?;
            decimal_to_datetime_utc(seconds).ok_or_else(|| invalid(line, "timestamp", value))?
        }
        None => created_at.ok_or_else(|| invalid(line, "timestamp", ""))?,
    };

    let date = match (row.yyyy.as_deref(), row.mm.as_deref(), row.dd.as_deref()) {
        (Some(yyyy), Some(mm), Some(dd)) => {
            let year: i32 = parse_field(line, "yyyy", yyyy)?;
            let month: u32 = parse_field(line, "mm", mm)?;
            let day: u32 = parse_field(line, "dd", dd)?;
            NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| invalid(line, "yyyy/mm/dd", &format!("{yyyy}/{mm}/{dd}")))?
        }
        _ => created_at.unwrap_or(timestamp).date_naive(),
    };

    return Ok(Fill {
        trade_id: row.trade_id,
        size: parse_field(line, "size", &row.size)?,
        price: parse_field(line, "price", &row.price)?,
        total: parse_field(line, "total", &row.total)?,
        size_unit: row.size_unit,
        total_unit: row.total_unit,
        pair,
        side,
        timestamp,
        date,
    });
}

fn parse_field<T: FromStr>(
    line: Option<u64>,
    field: &'static str,
    value: &str,
) -> Result<T, ParsingError> {
    return value.trim().parse::<T>().map_err(|_| invalid(line, field, value));
}

fn invalid(line: Option<u64>, field: &'static str, value: &str) -> ParsingError {
    ParsingError::InvalidField {
        line,
        field,
        value: value.to_string(),
    }
}
