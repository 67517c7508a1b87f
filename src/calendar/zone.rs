//! Time zone and daylight saving context
//!
//! Local time is UTC shifted by a fixed zone offset plus whatever the
//! optional DST rule reports for the instant being converted. The rule
//! is caller supplied; there is no zone database.

use super::convert::{epoch_seconds, gmtime, wrap};
use crate::config::DEFAULT_ZONE_SECS;
use crate::types::{Dst, Time, Tm};

/// Daylight saving rule.
///
/// Maps a UTC instant to `(active, adjustment_seconds)`. The adjustment
/// is added to local time while `active` is true.
pub type DstFn = fn(Time) -> (bool, i32);

/// Calendar configuration: time zone and DST rule
///
/// Configure once at start-up and share it with every conversion that
/// needs local time.
#[derive(Clone, Copy, Debug)]
pub struct Calendar {
    /// Seconds east of the prime meridian
    zone: i32,
    /// Daylight saving rule, `None` means DST never applies
    dst: Option<DstFn>,
}

impl Calendar {
    /// UTC only calendar
    #[must_use]
    pub const fn new() -> Self {
        Self::with_zone(DEFAULT_ZONE_SECS)
    }

    /// Calendar for a fixed zone, without DST
    #[must_use]
    pub const fn with_zone(zone: i32) -> Self {
        Self { zone, dst: None }
    }

    /// Set the time zone in seconds east of Greenwich.
    ///
    /// New York is `-5 * ONE_HOUR`.
    pub fn set_zone(&mut self, zone: i32) {
        self.zone = zone;
    }

    /// Time zone in seconds east of Greenwich
    #[must_use]
    pub const fn zone(&self) -> i32 {
        self.zone
    }

    /// Register a daylight saving rule
    pub fn set_dst(&mut self, rule: DstFn) {
        self.dst = Some(rule);
    }

    /// Remove the daylight saving rule
    pub fn clear_dst(&mut self) {
        self.dst = None;
    }

    /// Whether a daylight saving rule is registered
    #[must_use]
    pub const fn has_dst(&self) -> bool {
        self.dst.is_some()
    }

    /// DST adjustment for a UTC instant, `None` when inactive
    fn dst_adjustment(&self, utc: Time) -> Option<i32> {
        let rule = self.dst?;
        match rule(utc) {
            (true, adjustment) => Some(adjustment),
            (false, _) => None,
        }
    }

    /// Convert broken-down local time to epoch seconds.
    ///
    /// The zone offset is subtracted, then the DST rule is evaluated once
    /// against that estimate and its adjustment subtracted as well. The
    /// estimate has not been DST adjusted, so results within one
    /// adjustment of a transition follow the estimate's side of it.
    ///
    /// On return `tm` holds the normalized local time with `wday`, `yday`
    /// and `isdst` filled in.
    pub fn mktime(&self, tm: &mut Tm) -> Time {
        let estimate = epoch_seconds(tm) - i64::from(self.zone);
        let adjustment = self.dst_adjustment(wrap(estimate)).unwrap_or(0);
        let time = wrap(estimate - i64::from(adjustment));
        *tm = self.localtime(time);
        time
    }

    /// Convert epoch seconds to broken-down local time
    #[must_use]
    pub fn localtime(&self, time: Time) -> Tm {
        let adjustment = self.dst_adjustment(time);
        let local = i64::from(time) + i64::from(self.zone) + i64::from(adjustment.unwrap_or(0));
        let mut tm = gmtime(wrap(local));
        tm.isdst = if adjustment.is_some() { Dst::On } else { Dst::Off };
        tm
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Calendar {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Calendar(zone={}s, dst={})", self.zone, self.has_dst());
    }
}
