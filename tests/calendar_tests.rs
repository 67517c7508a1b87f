//! Calendar Engine Tests
//!
//! Tests for epoch/broken-down conversions, leap years, zone and DST.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test calendar_tests

use rtc_firmware::calendar::{
    days_to_epoch, difftime, from_ntp, from_unix, gmtime, is_leap_year, isotime, isotime_string,
    mk_gmtime, to_ntp, to_unix, Calendar, ISOTIME_LEN,
};
use rtc_firmware::config::{ONE_DAY, ONE_HOUR};
use rtc_firmware::types::{Dst, Month, Time, Tm, Weekday};

/// 2017-07-04 09:05:03 UTC
const JULY_4_2017: Time = 552_474_303;

/// 2024-03-31 01:00:00 UTC, EU summer time starts
const EU_DST_START_2024: Time = 765_162_000;

/// 2024-10-27 01:00:00 UTC, EU summer time ends
const EU_DST_END_2024: Time = 783_306_000;

fn eu_summer_2024(utc: Time) -> (bool, i32) {
    (
        (EU_DST_START_2024..EU_DST_END_2024).contains(&utc),
        ONE_HOUR as i32,
    )
}

fn date(tm: &Tm) -> (i32, i16, i16) {
    (tm.full_year(), tm.mon, tm.mday)
}

fn clock(tm: &Tm) -> (i16, i16, i16) {
    (tm.hour, tm.min, tm.sec)
}

// =============================================================================
// Leap Year Tests
// =============================================================================

#[test]
fn test_leap_year_gregorian_rule() {
    assert!(is_leap_year(2000)); // Divisible by 400
    assert!(!is_leap_year(1900)); // Century
    assert!(!is_leap_year(2100)); // Century
    assert!(is_leap_year(2400)); // Divisible by 400
    assert!(is_leap_year(2016));
    assert!(is_leap_year(2024));
    assert!(!is_leap_year(2017));
    assert!(!is_leap_year(2023));
}

#[test]
fn test_days_to_epoch() {
    assert_eq!(days_to_epoch(2000), 0);
    assert_eq!(days_to_epoch(2001), 366);
    assert_eq!(days_to_epoch(2004), 1461);
    assert_eq!(days_to_epoch(2100), 36_525);
    assert_eq!(days_to_epoch(2400), 146_097);
}

#[test]
fn test_days_to_epoch_before_epoch() {
    assert_eq!(days_to_epoch(1999), -365);
    assert_eq!(days_to_epoch(1900), -36_524);
}

// =============================================================================
// gmtime Tests
// =============================================================================

#[test]
fn test_gmtime_epoch_is_saturday() {
    let tm = gmtime(0);
    assert_eq!(date(&tm), (2000, 0, 1));
    assert_eq!(clock(&tm), (0, 0, 0));
    assert_eq!(tm.weekday(), Some(Weekday::Saturday));
    assert_eq!(tm.yday, 0);
    assert_eq!(tm.isdst, Dst::Off);
}

#[test]
fn test_gmtime_leap_day_boundary() {
    let feb_28 = 58 * ONE_DAY;

    let tm = gmtime(feb_28);
    assert_eq!(date(&tm), (2000, 1, 28));
    assert_eq!(tm.weekday(), Some(Weekday::Monday));

    let tm = gmtime(feb_28 + ONE_DAY);
    assert_eq!(date(&tm), (2000, 1, 29));
    assert_eq!(tm.weekday(), Some(Weekday::Tuesday));
    assert_eq!(tm.yday, 59);

    let tm = gmtime(feb_28 + 2 * ONE_DAY);
    assert_eq!(date(&tm), (2000, 2, 1));
    assert_eq!(tm.month(), Some(Month::March));
    assert_eq!(tm.weekday(), Some(Weekday::Wednesday));
    assert_eq!(tm.yday, 60);
}

#[test]
fn test_gmtime_known_instant() {
    let tm = gmtime(JULY_4_2017);
    assert_eq!(date(&tm), (2017, 6, 4));
    assert_eq!(clock(&tm), (9, 5, 3));
    assert_eq!(tm.weekday(), Some(Weekday::Tuesday));
    assert_eq!(tm.yday, 184);
}

#[test]
fn test_gmtime_leap_day_2024() {
    let tm = gmtime(8825 * ONE_DAY);
    assert_eq!(date(&tm), (2024, 1, 29));
    assert_eq!(tm.weekday(), Some(Weekday::Thursday));
}

#[test]
fn test_gmtime_end_of_range() {
    let tm = gmtime(u32::MAX);
    assert_eq!(date(&tm), (2136, 1, 7));
    assert_eq!(clock(&tm), (6, 28, 15));
    assert_eq!(tm.weekday(), Some(Weekday::Tuesday));
    assert_eq!(tm.yday, 37);
}

#[test]
fn test_gmtime_last_second_of_year() {
    let tm = gmtime(days_to_epoch(2017) as Time * ONE_DAY - 1);
    assert_eq!(date(&tm), (2016, 11, 31));
    assert_eq!(clock(&tm), (23, 59, 59));
    assert_eq!(tm.yday, 365);
}

// =============================================================================
// mk_gmtime Tests
// =============================================================================

#[test]
fn test_mk_gmtime_known_instant() {
    let tm = Tm::new(2, 2017, 6, 4, 9, 5, 3);
    assert_eq!(mk_gmtime(&tm), JULY_4_2017);
}

#[test]
fn test_mk_gmtime_does_not_modify_input() {
    let tm = Tm::new(0, 2017, 6, 4, 9, 5, 75);
    let copy = tm;
    let _ = mk_gmtime(&tm);
    assert_eq!(tm, copy);
}

#[test]
fn test_mk_gmtime_ignores_weekday_and_yday() {
    let mut tm = Tm::new(5, 2017, 6, 4, 9, 5, 3);
    tm.yday = 300;
    tm.isdst = Dst::On;
    assert_eq!(mk_gmtime(&tm), JULY_4_2017);
}

#[test]
fn test_mk_gmtime_round_trip_over_range() {
    let mut t: u64 = 0;
    while t <= u64::from(u32::MAX) {
        let time = t as Time;
        assert_eq!(mk_gmtime(&gmtime(time)), time, "round trip of {time}");
        t += 7_919_993;
    }
    assert_eq!(mk_gmtime(&gmtime(u32::MAX)), u32::MAX);
}

#[test]
fn test_mk_gmtime_round_trip_every_day_of_leap_year() {
    let start = days_to_epoch(2024) as Time * ONE_DAY;
    for day in 0..366 {
        let time = start + day * ONE_DAY + 12 * ONE_HOUR;
        assert_eq!(mk_gmtime(&gmtime(time)), time);
    }
}

#[test]
fn test_mk_gmtime_before_epoch_wraps() {
    let tm = Tm::new(0, 1999, 11, 31, 23, 59, 59);
    assert_eq!(mk_gmtime(&tm), u32::MAX);
}

// =============================================================================
// Normalization Tests
// =============================================================================

#[test]
fn test_normalize_seconds_overflow() {
    let mut tm = Tm::new(0, 2017, 6, 4, 9, 5, 75);
    let time = Calendar::new().mktime(&mut tm);
    assert_eq!(time, JULY_4_2017 + 72);
    assert_eq!(clock(&tm), (9, 6, 15));
}

#[test]
fn test_normalize_month_overflow_carries_year() {
    let mut tm = Tm::new(0, 2016, 12, 1, 0, 0, 0);
    Calendar::new().mktime(&mut tm);
    assert_eq!(date(&tm), (2017, 0, 1));
    assert_eq!(tm.weekday(), Some(Weekday::Sunday));
}

#[test]
fn test_normalize_day_zero_is_last_of_previous_month() {
    let mut tm = Tm::new(0, 2000, 2, 0, 0, 0, 0);
    Calendar::new().mktime(&mut tm);
    assert_eq!(date(&tm), (2000, 1, 29));
    assert_eq!(tm.yday, 59);
}

#[test]
fn test_normalize_negative_hour_borrows_day() {
    let mut tm = Tm::new(0, 2017, 0, 1, -1, 30, 0);
    Calendar::new().mktime(&mut tm);
    assert_eq!(date(&tm), (2016, 11, 31));
    assert_eq!(clock(&tm), (23, 30, 0));
}

#[test]
fn test_normalize_day_overflow() {
    let mut tm = Tm::new(0, 2017, 1, 30, 0, 0, 0);
    Calendar::new().mktime(&mut tm);
    assert_eq!(date(&tm), (2017, 2, 2));
}

#[test]
fn test_normalize_fills_weekday_and_yday() {
    let mut tm = Tm::new(0, 2017, 6, 4, 9, 5, 3);
    Calendar::new().mktime(&mut tm);
    assert_eq!(tm.weekday(), Some(Weekday::Tuesday));
    assert_eq!(tm.yday, 184);
    assert_eq!(tm.isdst, Dst::Off);
}

// =============================================================================
// Zone and DST Tests
// =============================================================================

#[test]
fn test_calendar_default_is_utc() {
    let calendar = Calendar::default();
    assert_eq!(calendar.zone(), 0);
    assert!(!calendar.has_dst());
    assert_eq!(calendar.localtime(JULY_4_2017), gmtime(JULY_4_2017));
}

#[test]
fn test_mktime_utc_round_trip() {
    let calendar = Calendar::new();
    for time in [0, 1, JULY_4_2017, EU_DST_START_2024, u32::MAX] {
        let mut tm = gmtime(time);
        assert_eq!(calendar.mktime(&mut tm), time);
    }
}

#[test]
fn test_mktime_subtracts_zone() {
    let calendar = Calendar::with_zone(ONE_HOUR as i32);
    let mut tm = Tm::new(0, 2017, 6, 4, 10, 5, 3);
    assert_eq!(calendar.mktime(&mut tm), JULY_4_2017);
    assert_eq!(clock(&tm), (10, 5, 3));
}

#[test]
fn test_localtime_adds_zone() {
    let mut calendar = Calendar::new();
    calendar.set_zone(-5 * ONE_HOUR as i32);
    let tm = calendar.localtime(JULY_4_2017);
    assert_eq!(date(&tm), (2017, 6, 4));
    assert_eq!(clock(&tm), (4, 5, 3));
}

#[test]
fn test_localtime_zone_crosses_midnight() {
    let calendar = Calendar::with_zone(-10 * ONE_HOUR as i32);
    let tm = calendar.localtime(JULY_4_2017);
    assert_eq!(date(&tm), (2017, 6, 3));
    assert_eq!(clock(&tm), (23, 5, 3));
    assert_eq!(tm.weekday(), Some(Weekday::Monday));
}

#[test]
fn test_localtime_with_dst() {
    let mut calendar = Calendar::with_zone(ONE_HOUR as i32);
    calendar.set_dst(eu_summer_2024);

    let winter = calendar.localtime(EU_DST_START_2024 - 1);
    assert_eq!(clock(&winter), (1, 59, 59));
    assert_eq!(winter.isdst, Dst::Off);

    let summer = calendar.localtime(EU_DST_START_2024);
    assert_eq!(clock(&summer), (3, 0, 0));
    assert_eq!(summer.isdst, Dst::On);
}

#[test]
fn test_mktime_with_dst_round_trip() {
    let mut calendar = Calendar::with_zone(ONE_HOUR as i32);
    calendar.set_dst(eu_summer_2024);

    let time = EU_DST_START_2024 + 30 * ONE_DAY;
    let mut tm = calendar.localtime(time);
    assert_eq!(calendar.mktime(&mut tm), time);
    assert_eq!(tm.isdst, Dst::On);
}

#[test]
fn test_mktime_evaluates_dst_on_unadjusted_estimate() {
    let mut calendar = Calendar::new();
    calendar.set_dst(eu_summer_2024);

    // Estimate just before the transition: no adjustment
    let mut tm = gmtime(EU_DST_START_2024 - 1);
    assert_eq!(calendar.mktime(&mut tm), EU_DST_START_2024 - 1);

    // Estimate just after the transition: adjusted back across it
    let mut tm = gmtime(EU_DST_START_2024 + 10);
    assert_eq!(
        calendar.mktime(&mut tm),
        EU_DST_START_2024 + 10 - ONE_HOUR
    );
}

#[test]
fn test_mktime_ignores_input_dst_flag() {
    let mut calendar = Calendar::new();
    for flag in [Dst::Unknown, Dst::Off, Dst::On] {
        let mut tm = gmtime(JULY_4_2017);
        tm.isdst = flag;
        assert_eq!(calendar.mktime(&mut tm), JULY_4_2017);
        assert_eq!(tm.isdst, Dst::Off);
    }

    calendar.set_dst(eu_summer_2024);
    let time = EU_DST_START_2024 + ONE_DAY;
    for flag in [Dst::Unknown, Dst::Off, Dst::On] {
        let mut tm = calendar.localtime(time);
        tm.isdst = flag;
        assert_eq!(calendar.mktime(&mut tm), time);
        assert_eq!(tm.isdst, Dst::On);
    }
}

#[test]
fn test_clear_dst() {
    let mut calendar = Calendar::new();
    calendar.set_dst(eu_summer_2024);
    assert!(calendar.has_dst());
    calendar.clear_dst();
    assert!(!calendar.has_dst());
    assert_eq!(calendar.localtime(EU_DST_START_2024).isdst, Dst::Off);
}

// =============================================================================
// Formatting Tests
// =============================================================================

#[test]
fn test_isotime_layout() {
    let tm = Tm::new(2, 2017, 6, 4, 9, 5, 3);
    let mut buf = [0u8; ISOTIME_LEN];
    assert_eq!(isotime(&tm, &mut buf), "2017-07-04 09:05:03");
    assert_eq!(&buf, b"2017-07-04 09:05:03");
}

#[test]
fn test_isotime_string_matches_display() {
    let tm = gmtime(u32::MAX);
    assert_eq!(isotime_string(&tm).as_str(), "2136-02-07 06:28:15");
    assert_eq!(format!("{tm}"), "2136-02-07 06:28:15");
}

#[test]
fn test_isotime_epoch() {
    assert_eq!(isotime_string(&gmtime(0)).as_str(), "2000-01-01 00:00:00");
}

// =============================================================================
// Epoch Offset Tests
// =============================================================================

#[test]
fn test_difftime_signed() {
    assert_eq!(difftime(20, 10), 10);
    assert_eq!(difftime(10, 20), -10);
}

#[test]
fn test_unix_conversion() {
    assert_eq!(to_unix(0), 946_684_800);
    assert_eq!(from_unix(1_499_159_103), JULY_4_2017);
    assert_eq!(to_unix(JULY_4_2017), 1_499_159_103);
}

#[test]
fn test_ntp_conversion() {
    assert_eq!(to_ntp(0), 3_155_673_600);
    assert_eq!(from_ntp(to_ntp(JULY_4_2017)), JULY_4_2017);
}
