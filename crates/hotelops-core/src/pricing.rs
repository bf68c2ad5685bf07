// ── Stay pricing ──
//
// Nights between two calendar dates times a nightly rate, in exact decimal
// arithmetic. Nothing here is rounded; `format_money` is the only place two
// decimal places are applied, and only for display.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Check-in and check-out dates with check-out strictly after check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, CoreError> {
        if check_out <= check_in {
            return Err(CoreError::InvalidRange {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whole nights in the stay, always at least 1.
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days();
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

/// Computed price of a stay. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingQuote {
    pub range: DateRange,
    pub rate: Decimal,
    pub nights: u32,
    pub total: Decimal,
}

/// Nights between two dates. Dates carry no time of day, so the difference
/// is already whole.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> Result<u32, CoreError> {
    DateRange::new(check_in, check_out).map(|range| range.nights())
}

/// Price a stay at `rate` per night. The rate is checked before the dates.
pub fn quote(
    rate: Decimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<BookingQuote, CoreError> {
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(CoreError::InvalidRate { rate });
    }
    let range = DateRange::new(check_in, check_out)?;
    let nights = range.nights();
    Ok(BookingQuote {
        range,
        rate,
        nights,
        total: rate * Decimal::from(nights),
    })
}

/// Render an amount for display: `$1,234.50`, `-$3.10`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn two_night_stay() {
        let q = quote(Decimal::new(100, 0), date("2024-01-01"), date("2024-01-03")).unwrap();
        assert_eq!(q.nights, 2);
        assert_eq!(q.total, Decimal::new(200, 0));
        assert_eq!(q.range.check_out(), date("2024-01-03"));
    }

    #[test]
    fn same_day_is_invalid_range() {
        let err = quote(Decimal::new(100, 0), date("2024-01-01"), date("2024-01-01")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { .. }));
    }

    #[test]
    fn reversed_dates_are_invalid() {
        assert!(matches!(
            nights(date("2024-03-10"), date("2024-03-01")),
            Err(CoreError::InvalidRange { .. })
        ));
    }

    #[test]
    fn rate_is_checked_before_dates() {
        let err = quote(Decimal::new(-1, 0), date("2024-01-05"), date("2024-01-01")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRate { .. }));
    }

    #[test]
    fn zero_rate_is_allowed() {
        let q = quote(Decimal::ZERO, date("2024-01-01"), date("2024-01-04")).unwrap();
        assert_eq!(q.total, Decimal::ZERO);
    }

    #[test]
    fn nights_cross_month_and_leap_day() {
        assert_eq!(nights(date("2024-02-28"), date("2024-03-01")).unwrap(), 2);
        assert_eq!(nights(date("2023-12-31"), date("2024-01-01")).unwrap(), 1);
    }

    #[test]
    fn fractional_rates_stay_exact() {
        let q = quote(Decimal::new(9999, 2), date("2024-05-01"), date("2024-05-04")).unwrap();
        assert_eq!(q.total, Decimal::new(29997, 2));
    }

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(Decimal::new(200, 0)), "$200.00");
        assert_eq!(format_money(Decimal::new(123_450, 2)), "$1,234.50");
        assert_eq!(format_money(Decimal::new(1_000_000, 0)), "$1,000,000.00");
        assert_eq!(format_money(Decimal::new(-3105, 3)), "-$3.11");
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
    }
}
