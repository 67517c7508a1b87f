//! Software Real-Time Clock
//!
//! Keeps seconds since the epoch by polling a free-running millisecond
//! counter. `tick` may run from a timer interrupt while the accessors
//! run from thread mode, and the 32-bit counter plus its millisecond
//! baseline cannot be updated in one store, so every access happens
//! inside a `critical_section::with` scope. The previous interrupt
//! state is restored on exit, nested scopes included.
//!
//! ```ignore
//! static RTC: SoftRtc = SoftRtc::new();
//!
//! #[interrupt]
//! fn TIM6_DAC() {
//!     RTC.tick(millis());
//! }
//! ```

use core::cell::Cell;

use critical_section::Mutex;

use crate::calendar::{gmtime, Calendar};
use crate::config::TICK_PERIOD_MS;
use crate::hal::timer::MillisSource;
use crate::types::{Time, Tm};

/// Clock state shared with the tick context
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ClockState {
    /// Millisecond reading the counter was last advanced to
    millis: u32,
    /// Seconds since the epoch
    time: Time,
}

/// Software real-time clock
pub struct SoftRtc {
    state: Mutex<Cell<ClockState>>,
}

impl SoftRtc {
    /// Clock at the epoch with a zero millisecond baseline
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(ClockState { millis: 0, time: 0 })),
        }
    }

    /// Advance the clock to the millisecond reading `now_ms`.
    ///
    /// Adds every whole second elapsed since the baseline and moves the
    /// baseline by the same amount, keeping the sub-second remainder for
    /// the next call. Missed ticks are caught up in one call. The
    /// reading may wrap. Returns whether the clock advanced.
    pub fn tick(&self, now_ms: u32) -> bool {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            let elapsed = now_ms.wrapping_sub(state.millis);
            if elapsed < TICK_PERIOD_MS {
                return false;
            }
            let secs = elapsed / TICK_PERIOD_MS;
            state.time = state.time.wrapping_add(secs);
            state.millis = state.millis.wrapping_add(secs * TICK_PERIOD_MS);
            cell.set(state);
            true
        })
    }

    /// Advance the clock from a millisecond counter
    pub fn tick_from<C: MillisSource + ?Sized>(&self, clock: &C) -> bool {
        self.tick(clock.millis())
    }

    /// Seconds since the epoch
    #[must_use]
    pub fn get_time(&self) -> Time {
        critical_section::with(|cs| self.state.borrow(cs).get().time)
    }

    /// Set seconds since the epoch. The millisecond baseline is kept.
    pub fn set_time(&self, time: Time) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            cell.set(ClockState {
                time,
                ..cell.get()
            });
        });
    }

    /// Set the time and restart the sub-second phase at `now_ms`
    pub fn restart(&self, time: Time, now_ms: u32) {
        critical_section::with(|cs| {
            self.state.borrow(cs).set(ClockState { millis: now_ms, time });
        });
    }

    /// Current time as broken-down time
    #[must_use]
    pub fn get_tm(&self) -> Tm {
        gmtime(self.get_time())
    }

    /// Set the clock from broken-down time.
    ///
    /// The value goes through [`Calendar::mktime`], which normalizes `tm`
    /// in place, and the zone offset is added back. Without DST,
    /// [`Self::get_tm`] then returns the same wall-clock fields.
    pub fn set_tm(&self, calendar: &Calendar, tm: &mut Tm) {
        let time = calendar.mktime(tm).wrapping_add_signed(calendar.zone());
        self.set_time(time);
    }
}

impl Default for SoftRtc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SoftRtc {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "SoftRtc({})", self.get_tm());
    }
}
