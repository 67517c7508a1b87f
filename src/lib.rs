//! Timekeeping Firmware Library
//!
//! This library provides calendar-aware timekeeping for an STM32-based
//! board without a usable RTC peripheral. Time is kept by a software
//! clock driven from the millisecond timer, and can be synchronized
//! with an external battery-backed DS1302 chip over a bit-banged
//! 3-wire serial link.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        Software RTC (tick / get / set)  │  main tasks        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    CALENDAR LAYER                            │
//! │  mktime / gmtime / localtime  │  zone + DST  │  isotime      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  DS1302 protocol  │  BCD codec  │  GPIO pins  │  ms timer    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Clamp and continue**: out-of-range inputs are normalized or
//!   truncated, never rejected
//! - **Type-driven design**: pins and timers are injected through traits
//! - **No unsafe in application code**: interrupt masking goes through
//!   `critical-section`
//! - **Functional core, imperative shell**: calendar math is pure,
//!   hardware access lives in drivers

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Pin and timer capabilities consumed by the drivers and the clock.
pub mod hal;

/// Peripheral Drivers
///
/// Drivers for external ICs (DS1302 timekeeping chip).
pub mod drivers;

/// Packed binary-coded-decimal codec
pub mod bcd;

/// Calendar Engine
///
/// Epoch seconds to broken-down time and back, timezone and DST.
pub mod calendar;

/// Software real-time clock
pub mod rtc;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::calendar::{gmtime, isotime, isotime_string, mk_gmtime, Calendar};
    pub use crate::config::*;
    pub use crate::drivers::ds1302::Ds1302;
    pub use crate::hal::gpio::DigitalPin;
    pub use crate::hal::timer::{EmbassyMillis, MillisSource};
    pub use crate::rtc::SoftRtc;
    pub use crate::types::*;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
