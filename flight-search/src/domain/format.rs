//! Display formatting for flight results.
//!
//! Results are shown with a 12-hour clock ("9:05 AM"), durations as
//! "2h 30m" and prices as "$123.45". Each formatter has a parser so that
//! callers holding only rendered text can recover the numeric value for
//! sorting.

use chrono::{NaiveDateTime, Timelike};

/// Minutes in a day.
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned for malformed formatting input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    /// Durations cannot be negative
    #[error("negative duration: {0} minutes")]
    NegativeDuration(i64),

    /// Price amounts must be finite and non-negative
    #[error("invalid price amount: {0}")]
    InvalidAmount(f64),

    /// Text is not a valid "h:mm AM/PM" time
    #[error("invalid time: {0}")]
    InvalidTime(&'static str),

    /// Text is not a valid "Xh Ym" duration
    #[error("invalid duration: {0}")]
    InvalidDuration(&'static str),

    /// Text is not a valid "$X.XX" price
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),
}

/// Format the time-of-day part of a timestamp on a 12-hour clock.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use flight_search::domain::format_time;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(format_time(date.and_hms_opt(0, 5, 0).unwrap()), "12:05 AM");
/// assert_eq!(format_time(date.and_hms_opt(13, 30, 0).unwrap()), "1:30 PM");
/// ```
pub fn format_time(timestamp: NaiveDateTime) -> String {
    let (is_pm, hour) = timestamp.hour12();
    let period = if is_pm { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour, timestamp.minute(), period)
}

/// Parse a 12-hour clock time into minutes since midnight.
///
/// 12:00 AM is midnight (0) and 12:00 PM is noon (720).
///
/// # Examples
///
/// ```
/// use flight_search::domain::parse_time;
///
/// assert_eq!(parse_time("12:00 AM").unwrap(), 0);
/// assert_eq!(parse_time("12:00 PM").unwrap(), 720);
/// assert_eq!(parse_time("1:30 PM").unwrap(), 810);
/// assert!(parse_time("13:30 PM").is_err());
/// ```
pub fn parse_time(s: &str) -> Result<u32, FormatError> {
    let (clock, period) = s
        .split_once(' ')
        .ok_or(FormatError::InvalidTime("expected h:mm AM/PM"))?;
    let (hour, minute) = clock
        .split_once(':')
        .ok_or(FormatError::InvalidTime("expected colon between hour and minute"))?;

    if hour.is_empty() || hour.len() > 2 || !is_digits(hour) {
        return Err(FormatError::InvalidTime("invalid hour digits"));
    }
    if minute.len() != 2 || !is_digits(minute) {
        return Err(FormatError::InvalidTime("invalid minute digits"));
    }

    let hour: u32 = hour
        .parse()
        .map_err(|_| FormatError::InvalidTime("invalid hour digits"))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| FormatError::InvalidTime("invalid minute digits"))?;

    if !(1..=12).contains(&hour) {
        return Err(FormatError::InvalidTime("hour must be 1-12"));
    }
    if minute > 59 {
        return Err(FormatError::InvalidTime("minute must be 0-59"));
    }

    let hour = if period.eq_ignore_ascii_case("AM") {
        hour % 12
    } else if period.eq_ignore_ascii_case("PM") {
        hour % 12 + 12
    } else {
        return Err(FormatError::InvalidTime("period must be AM or PM"));
    };

    Ok(hour * 60 + minute)
}

/// Minutes since midnight for the time-of-day part of a timestamp.
pub fn minutes_since_midnight(timestamp: NaiveDateTime) -> u32 {
    (timestamp.hour() * 60 + timestamp.minute()) % MINUTES_PER_DAY
}

/// Format a duration in minutes as "Xh Ym".
///
/// # Examples
///
/// ```
/// use flight_search::domain::format_duration;
///
/// assert_eq!(format_duration(150).unwrap(), "2h 30m");
/// assert_eq!(format_duration(45).unwrap(), "0h 45m");
/// assert!(format_duration(-1).is_err());
/// ```
pub fn format_duration(minutes: i64) -> Result<String, FormatError> {
    if minutes < 0 {
        return Err(FormatError::NegativeDuration(minutes));
    }
    Ok(format!("{}h {}m", minutes / 60, minutes % 60))
}

/// Parse a "Xh Ym" duration back into minutes.
///
/// The space between the parts is optional, so "2h30m" is accepted too.
pub fn parse_duration(s: &str) -> Result<i64, FormatError> {
    let (hours, rest) = s
        .trim()
        .split_once('h')
        .ok_or(FormatError::InvalidDuration("expected hours followed by 'h'"))?;
    let minutes = rest
        .trim_start()
        .strip_suffix('m')
        .ok_or(FormatError::InvalidDuration("expected minutes followed by 'm'"))?;

    if hours.is_empty() || !is_digits(hours) {
        return Err(FormatError::InvalidDuration("invalid hour digits"));
    }
    if minutes.is_empty() || minutes.len() > 2 || !is_digits(minutes) {
        return Err(FormatError::InvalidDuration("invalid minute digits"));
    }

    let hours: i64 = hours
        .parse()
        .map_err(|_| FormatError::InvalidDuration("hours out of range"))?;
    let minutes: i64 = minutes
        .parse()
        .map_err(|_| FormatError::InvalidDuration("invalid minute digits"))?;

    if minutes > 59 {
        return Err(FormatError::InvalidDuration("minutes must be 0-59"));
    }

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or(FormatError::InvalidDuration("hours out of range"))
}

/// Format a price as dollars with two decimal places.
///
/// # Examples
///
/// ```
/// use flight_search::domain::format_price;
///
/// assert_eq!(format_price(123.456).unwrap(), "$123.46");
/// assert_eq!(format_price(10.0).unwrap(), "$10.00");
/// assert!(format_price(f64::NAN).is_err());
/// assert!(format_price(-5.0).is_err());
/// ```
pub fn format_price(amount: f64) -> Result<String, FormatError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(FormatError::InvalidAmount(amount));
    }
    // abs() folds -0.0 into 0.0
    Ok(format!("${:.2}", amount.abs()))
}

/// Parse a "$X.XX" price back into an amount.
pub fn parse_price(s: &str) -> Result<f64, FormatError> {
    let digits = s
        .trim()
        .strip_prefix('$')
        .ok_or(FormatError::InvalidPrice("expected leading '$'"))?;
    let amount: f64 = digits
        .parse()
        .map_err(|_| FormatError::InvalidPrice("invalid amount"))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(FormatError::InvalidPrice("amount must be finite and non-negative"));
    }
    Ok(amount)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    proptest! {
        /// Duration formatting round-trips for any non-negative minute count
        #[test]
        fn duration_roundtrip(minutes in 0i64..10_000_000) {
            let text = format_duration(minutes).unwrap();
            prop_assert_eq!(parse_duration(&text).unwrap(), minutes);
        }

        /// Every time of day survives formatting and parsing
        #[test]
        fn time_roundtrip(hour in 0u32..24, minute in 0u32..60) {
            let ts = NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            let text = format_time(ts);
            prop_assert_eq!(parse_time(&text).unwrap(), hour * 60 + minute);
        }

        /// Whole-cent prices survive formatting and parsing
        #[test]
        fn price_roundtrip(cents in 0u64..100_000_000) {
            let amount = cents as f64 / 100.0;
            let text = format_price(amount).unwrap();
            let parsed = parse_price(&text).unwrap();
            prop_assert_eq!((parsed * 100.0).round() as u64, cents);
        }

        /// Negative durations are always rejected
        #[test]
        fn negative_duration_rejected(minutes in i64::MIN..0) {
            prop_assert!(format_duration(minutes).is_err());
        }
    }
}
