//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the timekeeping firmware.
//! Pin mappings, timing parameters and calendar constants are centralized here.

use crate::types::Weekday;

/// Calendar year of the epoch (`Time` zero)
pub const EPOCH_YEAR: i32 = 2000;

/// Weekday of 2000-01-01
pub const EPOCH_WEEKDAY: Weekday = Weekday::Saturday;

/// One minute, expressed in seconds
pub const ONE_MINUTE: u32 = 60;

/// One hour, expressed in seconds
pub const ONE_HOUR: u32 = 3600;

/// Angular degree, expressed in arc seconds
pub const ONE_DEGREE: u32 = 3600;

/// One day, expressed in seconds
pub const ONE_DAY: u32 = 86_400;

/// Difference between the Y2K and the UNIX epochs, in seconds
pub const UNIX_OFFSET: u32 = 946_684_800;

/// Difference between the Y2K and the NTP epochs, in seconds
pub const NTP_OFFSET: u32 = 3_155_673_600;

/// Software clock resolution in milliseconds
pub const TICK_PERIOD_MS: u32 = 1000;

/// How often the tick task samples the millisecond timer.
/// The clock tolerates long gaps, this only bounds the jitter.
pub const TICK_POLL_MS: u64 = 50;

/// Interval between copies of the epoch counter into chip RAM
pub const RAM_SNAPSHOT_SECS: u32 = 60;

/// Default time zone, seconds east of Greenwich (UTC only)
pub const DEFAULT_ZONE_SECS: i32 = 0;

/// DS1302 static RAM size in bytes
pub const DS1302_RAM_SIZE: usize = 31;

/// DS1302 clock high/low hold time in nanoseconds (2.0 V worst case)
pub const DS1302_SETTLE_NS: u32 = 1_000;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// DS1302 chip enable (RST), asserted high
    pub const DS1302_CE: &str = "PB3";

    /// DS1302 serial data, bidirectional
    pub const DS1302_IO: &str = "PB4";

    /// DS1302 serial clock
    pub const DS1302_SCLK: &str = "PB5";
}
