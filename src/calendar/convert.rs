//! UTC conversions
//!
//! All arithmetic is done on `i64` day and second counts so that any
//! combination of out-of-range `Tm` fields carries cleanly; only the
//! final result is reduced to the 32-bit epoch range.

use crate::config::{EPOCH_WEEKDAY, EPOCH_YEAR, NTP_OFFSET, ONE_DAY, ONE_HOUR, ONE_MINUTE, UNIX_OFFSET};
use crate::types::{Dst, Month, Time, Tm};

/// Days before the first of each month in a common year
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Gregorian leap year rule
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Leap days in the years `1..year`, counted from year zero
const fn leap_days_before(year: i32) -> i64 {
    let y = year as i64 - 1;
    y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

/// Whole days from the epoch to January 1 of `year`.
///
/// Negative for years before the epoch.
#[must_use]
pub const fn days_to_epoch(year: i32) -> i64 {
    365 * (year as i64 - EPOCH_YEAR as i64) + leap_days_before(year) - leap_days_before(EPOCH_YEAR)
}

/// Seconds since the epoch for a broken-down UTC time, unreduced
pub(crate) fn epoch_seconds(tm: &Tm) -> i64 {
    // Carry months into years first, everything below is additive
    let months = i64::from(tm.year) * 12 + i64::from(tm.mon);
    let year = i64::from(Tm::YEAR_BASE) + months.div_euclid(12);
    let mon = months.rem_euclid(12);

    #[allow(clippy::cast_possible_truncation)]
    let year = year as i32;
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let mon = mon as usize;

    let mut days = days_to_epoch(year) + i64::from(DAYS_BEFORE_MONTH[mon]);
    if mon > Month::February.index() as usize && is_leap_year(year) {
        days += 1;
    }
    days += i64::from(tm.mday) - 1;

    days * i64::from(ONE_DAY)
        + i64::from(tm.hour) * i64::from(ONE_HOUR)
        + i64::from(tm.min) * i64::from(ONE_MINUTE)
        + i64::from(tm.sec)
}

/// Reduce a second count to the epoch range, modulo 2^32
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) const fn wrap(secs: i64) -> Time {
    secs as Time
}

/// Convert broken-down UTC time to epoch seconds.
///
/// Out-of-range fields are carried into the adjacent ones. `wday`,
/// `yday` and `isdst` are ignored and the input is left untouched.
#[must_use]
pub fn mk_gmtime(tm: &Tm) -> Time {
    wrap(epoch_seconds(tm))
}

/// Convert epoch seconds to broken-down UTC time
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn gmtime(time: Time) -> Tm {
    let mut days = time / ONE_DAY;
    let secs = time % ONE_DAY;

    let wday = (days + u32::from(EPOCH_WEEKDAY.index())) % 7;

    let mut year = EPOCH_YEAR;
    loop {
        let len = if is_leap_year(year) { 366 } else { 365 };
        if days < len {
            break;
        }
        days -= len;
        year += 1;
    }
    let yday = days;

    let leap = is_leap_year(year);
    let mut month = Month::January;
    for m in Month::ALL {
        month = m;
        let len = u32::from(m.days(leap));
        if days < len {
            break;
        }
        days -= len;
    }

    Tm {
        sec: (secs % ONE_MINUTE) as i16,
        min: (secs % ONE_HOUR / ONE_MINUTE) as i16,
        hour: (secs / ONE_HOUR) as i16,
        mday: days as i16 + 1,
        wday: wday as i16,
        mon: i16::from(month.index()),
        year: (year - i32::from(Tm::YEAR_BASE)) as i16,
        yday: yday as i16,
        isdst: Dst::Off,
    }
}

/// Signed difference `time1 - time0` in seconds
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn difftime(time1: Time, time0: Time) -> i32 {
    time1.wrapping_sub(time0) as i32
}

/// Epoch seconds from a UNIX timestamp
#[must_use]
pub const fn from_unix(unix: i64) -> Time {
    wrap(unix - UNIX_OFFSET as i64)
}

/// UNIX timestamp of an epoch time
#[must_use]
pub const fn to_unix(time: Time) -> i64 {
    time as i64 + UNIX_OFFSET as i64
}

/// Epoch seconds from an NTP era 0 timestamp
#[must_use]
pub const fn from_ntp(ntp: u32) -> Time {
    ntp.wrapping_sub(NTP_OFFSET)
}

/// NTP era 0 timestamp of an epoch time, wrapping at the era boundary
#[must_use]
pub const fn to_ntp(time: Time) -> u32 {
    time.wrapping_add(NTP_OFFSET)
}
