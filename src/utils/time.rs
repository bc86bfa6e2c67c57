use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{prelude::ToPrimitive, Decimal};

/* Dates as written on the form 8949 */
pub fn format_tax_date(date: &NaiveDate) -> String {
    return date.format("%m/%d/%Y").to_string();
}

/* UNIX timestamps in exports may carry a fractional part (e.g. 1546300800.123) */
pub fn decimal_to_datetime_utc(timestamp: Decimal) -> Option<DateTime<Utc>> {
    let seconds = timestamp.trunc().to_i64()?;
    let nanoseconds = (timestamp.fract().abs() * Decimal::from(1_000_000_000))
        .trunc()
        .to_u32()?;
    if timestamp.is_sign_negative() && nanoseconds > 0 {
        // -1.5 is one second and a half before the epoch: -2 seconds + 0.5
        return DateTime::from_timestamp(seconds - 1, 1_000_000_000 - nanoseconds);
    }
    return DateTime::from_timestamp(seconds, nanoseconds);
}

#[cfg(test)]
mod tests {

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_format_tax_date() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 7).unwrap();
        assert_eq!(format_tax_date(&date), "03/07/2019");
    }

    #[test]
    fn test_decimal_timestamp() {
        let time = decimal_to_datetime_utc(dec!(1546300800.25)).unwrap();
        assert_eq!(time.timestamp(), 1546300800);
        assert_eq!(time.timestamp_subsec_millis(), 250);

        let before_epoch = decimal_to_datetime_utc(dec!(-1.5)).unwrap();
        assert_eq!(before_epoch.timestamp(), -2);
        assert_eq!(before_epoch.timestamp_subsec_millis(), 500);
    }
}
