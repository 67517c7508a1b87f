//! Peripheral Drivers
//!
//! Drivers for external ICs attached to the board.

pub mod ds1302;
