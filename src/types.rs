//! Shared types used across the timekeeping firmware
//!
//! This module defines the epoch timestamp and the broken-down calendar
//! representation shared by the software clock, the calendar engine and
//! the DS1302 driver.

use core::fmt;

/// Seconds elapsed since 2000-01-01 00:00:00 UTC
///
/// The range reaches 2136-02-07 06:28:15 UTC. Arithmetic that would go
/// below the epoch wraps modulo 2^32.
pub type Time = u32;

/// Daylight saving flag of a broken-down time
///
/// Set by [`Calendar::mktime`](crate::calendar::Calendar::mktime) and
/// [`Calendar::localtime`](crate::calendar::Calendar::localtime) from the
/// DST rule. It is never read back as an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Dst {
    /// Not known, e.g. a value built by hand
    Unknown,
    /// Standard time
    #[default]
    Off,
    /// Daylight saving time in effect
    On,
}

impl Dst {
    /// Flag value in the -1/0/1 convention
    #[must_use]
    pub const fn as_flag(self) -> i8 {
        match self {
            Self::Unknown => -1,
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Build from a -1/0/1 style flag; any positive value is `On`
    #[must_use]
    pub const fn from_flag(flag: i8) -> Self {
        if flag < 0 {
            Self::Unknown
        } else if flag == 0 {
            Self::Off
        } else {
            Self::On
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Dst {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Unknown => defmt::write!(f, "DST?"),
            Self::Off => defmt::write!(f, "STD"),
            Self::On => defmt::write!(f, "DST"),
        }
    }
}

/// Day of the week, Sunday first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weekday {
    /// Sunday (0)
    Sunday,
    /// Monday (1)
    Monday,
    /// Tuesday (2)
    Tuesday,
    /// Wednesday (3)
    Wednesday,
    /// Thursday (4)
    Thursday,
    /// Friday (5)
    Friday,
    /// Saturday (6)
    Saturday,
}

impl Weekday {
    /// All weekdays in index order
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Days since Sunday
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Weekday from days since Sunday, `None` above 6
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 7 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Three letter English abbreviation
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Weekday {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.abbreviation());
    }
}

/// Month of the year, January first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Month {
    /// January (0)
    January,
    /// February (1)
    February,
    /// March (2)
    March,
    /// April (3)
    April,
    /// May (4)
    May,
    /// June (5)
    June,
    /// July (6)
    July,
    /// August (7)
    August,
    /// September (8)
    September,
    /// October (9)
    October,
    /// November (10)
    November,
    /// December (11)
    December,
}

impl Month {
    /// All months in index order
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Months since January
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Month from months since January, `None` above 11
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 12 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Number of days in this month for a leap or common year
    #[must_use]
    pub const fn days(self, leap: bool) -> u8 {
        match self {
            Self::February => {
                if leap {
                    29
                } else {
                    28
                }
            }
            Self::April | Self::June | Self::September | Self::November => 30,
            _ => 31,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Month {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "M{}", self.index() + 1);
    }
}

/// Broken-down calendar time
///
/// Field conventions follow the C `struct tm`: months count from zero,
/// years count from 1900. Fields are signed and may hold out-of-range
/// values; the calendar conversions carry them into adjacent fields.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Tm {
    /// Seconds [0-60]
    pub sec: i16,
    /// Minutes [0-59]
    pub min: i16,
    /// Hours [0-23]
    pub hour: i16,
    /// Day in month [1-31]
    pub mday: i16,
    /// Days since Sunday [0-6]
    pub wday: i16,
    /// Months since January [0-11]
    pub mon: i16,
    /// Years since 1900
    pub year: i16,
    /// Days since January 1 [0-365]
    pub yday: i16,
    /// Daylight saving flag
    pub isdst: Dst,
}

impl Tm {
    /// Offset between `year` and the calendar year
    pub const YEAR_BASE: i16 = 1900;

    /// Build a broken-down time from a calendar year.
    ///
    /// `mon` counts from zero. Year-day is left at zero and DST off;
    /// run the value through a conversion to fill them in.
    #[must_use]
    pub const fn new(wday: i16, year: i16, mon: i16, mday: i16, hour: i16, min: i16, sec: i16) -> Self {
        Self {
            sec,
            min,
            hour,
            mday,
            wday,
            mon,
            year: year - Self::YEAR_BASE,
            yday: 0,
            isdst: Dst::Off,
        }
    }

    /// Calendar year (e.g. 2017)
    #[must_use]
    pub const fn full_year(&self) -> i32 {
        self.year as i32 + Self::YEAR_BASE as i32
    }

    /// Weekday, if the field is in range
    #[must_use]
    pub fn weekday(&self) -> Option<Weekday> {
        u8::try_from(self.wday).ok().and_then(Weekday::from_index)
    }

    /// Month, if the field is in range
    #[must_use]
    pub fn month(&self) -> Option<Month> {
        u8::try_from(self.mon).ok().and_then(Month::from_index)
    }
}

impl fmt::Debug for Tm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tm({} wday={} yday={} {:?})",
            self, self.wday, self.yday, self.isdst
        )
    }
}

/// `YYYY-MM-DD hh:mm:ss`, the same layout as [`crate::calendar::isotime`]
impl fmt::Display for Tm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.full_year(),
            self.mon + 1,
            self.mday,
            self.hour,
            self.min,
            self.sec
        )
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Tm {
    fn format(&self, f: defmt::Formatter) {
        let mut buf = [0u8; crate::calendar::ISOTIME_LEN];
        defmt::write!(f, "{=str}", crate::calendar::isotime(self, &mut buf));
    }
}
