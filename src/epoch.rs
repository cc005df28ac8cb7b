//! Calendar to epoch arithmetic.
//!
//! The chip counts years from 2000. Day counts use the proleptic Gregorian
//! calendar, so every fourth year is a leap year except centuries not divisible
//! by 400.

use crate::fields::{Calendar, Time};

/// First year of the chip's century
pub const BASE_YEAR: i64 = 2000;

const SECONDS_PER_DAY: i64 = 86_400;

/// Days from 1970-01-01 to the given civil date.
///
/// Out-of-range months and days are normalized instead of rejected: month 13
/// is January of the next year, day 0 is the last day of the previous month.
pub fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = year + (month - 1).div_euclid(12);
    let month = (month - 1).rem_euclid(12) + 1;

    // Shift the year to start in March so the leap day is the last day of it
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doy = (153 * ((month + 9) % 12) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Seconds since 1970-01-01T00:00:00 for a time and calendar as stored by the chip
pub fn epoch_seconds(time: &Time, calendar: &Calendar) -> i64 {
    let days = days_from_civil(
        BASE_YEAR + i64::from(calendar.year),
        i64::from(calendar.month),
        i64::from(calendar.date),
    );
    days * SECONDS_PER_DAY
        + i64::from(time.hours_24()) * 3600
        + i64::from(time.minutes) * 60
        + i64::from(time.seconds)
}
