use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Last calendar day of the month `date` falls in. Computed as the first day of the next month
/// minus one day, wrapping December into January of the next year.
pub(crate) fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let month = date.month();
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_month_year = if month == 12 { date.year() + 1 } else { date.year() };
    NaiveDate::from_ymd_opt(next_month_year, next_month, 1)?.pred_opt()
}

/// Format $ amount with thousands separators and 2 decimals, e.g. 1234.5 -> "1,234.50".
/// Rounds half away from zero.
pub(crate) fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}.{fraction}")
    } else {
        format!("{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use crate::util::{format_amount, last_day_of_month};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(date(2024, 12, 10)), Some(date(2024, 12, 31)));
        assert_eq!(last_day_of_month(date(2024, 2, 10)), Some(date(2024, 2, 29)));
        assert_eq!(last_day_of_month(date(2023, 2, 28)), Some(date(2023, 2, 28)));
        assert_eq!(last_day_of_month(date(2024, 4, 1)), Some(date(2024, 4, 30)));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(50)), "50.00");
        assert_eq!(format_amount(dec!(999.999)), "1,000.00");
        assert_eq!(format_amount(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_amount(dec!(2.005)), "2.01");
        assert_eq!(format_amount(dec!(-10)), "-10.00");
        assert_eq!(format_amount(dec!(-1500.5)), "-1,500.50");
        assert_eq!(format_amount(dec!(-0.001)), "0.00");
    }
}
