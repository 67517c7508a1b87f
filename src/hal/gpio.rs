//! GPIO Abstractions
//!
//! The DS1302 link needs three wires: chip enable, a bidirectional data
//! line and a clock. [`DigitalPin`] is the capability the driver is
//! generic over, so the same protocol code runs against STM32 pins on
//! target and against a simulated chip in host tests.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, PinState, StatefulOutputPin};

/// A digital pin whose direction can be switched at runtime
pub trait DigitalPin {
    /// Drive the pin
    fn set_output_mode(&mut self);

    /// Release the pin and sample it
    fn set_input_mode(&mut self);

    /// Set the output level
    fn write(&mut self, level: PinState);

    /// Sample the current level
    fn read(&mut self) -> PinState;

    /// Invert the output level
    fn toggle(&mut self);
}

/// Output-only pin adapter
///
/// Chip enable and clock are never read back, so any `embedded-hal`
/// push-pull output will do. Direction changes are ignored and `read`
/// reports the driven level.
pub struct OutputOnly<P> {
    pin: P,
}

impl<P> OutputOnly<P>
where
    P: StatefulOutputPin + ErrorType<Error = Infallible>,
{
    /// Wrap an output pin
    #[must_use]
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Unwrap the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> DigitalPin for OutputOnly<P>
where
    P: StatefulOutputPin + ErrorType<Error = Infallible>,
{
    fn set_output_mode(&mut self) {}

    fn set_input_mode(&mut self) {}

    fn write(&mut self, level: PinState) {
        infallible(self.pin.set_state(level));
    }

    fn read(&mut self) -> PinState {
        PinState::from(infallible(self.pin.is_set_high()))
    }

    fn toggle(&mut self) {
        infallible(StatefulOutputPin::toggle(&mut self.pin));
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(feature = "embedded")]
mod stm32 {
    use embassy_stm32::gpio::{Flex, Level, Pull, Speed};
    use embedded_hal::digital::PinState;

    use super::DigitalPin;

    /// Flex pins can change direction, which the DS1302 data line needs
    impl DigitalPin for Flex<'_> {
        fn set_output_mode(&mut self) {
            self.set_as_output(Speed::VeryHigh);
        }

        fn set_input_mode(&mut self) {
            self.set_as_input(Pull::None);
        }

        fn write(&mut self, level: PinState) {
            self.set_level(Level::from(bool::from(level)));
        }

        fn read(&mut self) -> PinState {
            PinState::from(self.is_high())
        }

        fn toggle(&mut self) {
            Flex::toggle(self);
        }
    }
}
