//! Timer Abstractions
//!
//! The software clock is driven from a free-running millisecond counter.
//! Only differences between two readings are ever used, so the counter
//! may wrap at any width up to 32 bits.

/// Free-running millisecond counter
pub trait MillisSource {
    /// Milliseconds since start-up, wrapping
    fn millis(&self) -> u32;
}

/// Any `Fn() -> u32` is a counter; handy for simulated time in tests
impl<F> MillisSource for F
where
    F: Fn() -> u32,
{
    fn millis(&self) -> u32 {
        self()
    }
}

/// Millisecond counter backed by the embassy time driver
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyMillis;

#[cfg(feature = "embedded")]
impl MillisSource for EmbassyMillis {
    #[allow(clippy::cast_possible_truncation)]
    fn millis(&self) -> u32 {
        // Truncation is the wrap the clock expects
        embassy_time::Instant::now().as_millis() as u32
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for EmbassyMillis {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EmbassyMillis({}ms)", self.millis());
    }
}
