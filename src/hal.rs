//! Hardware Abstraction Layer
//!
//! Capabilities the timekeeping core consumes from the platform: digital
//! pins with switchable direction and a free-running millisecond counter.
//! Implementations for STM32 peripherals are compiled with the `embedded`
//! feature; host tests provide their own.

pub mod gpio;
pub mod timer;
