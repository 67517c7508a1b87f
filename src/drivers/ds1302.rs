//! `DS1302` Trickle-Charge Timekeeping Chip Driver
//!
//! Bit-banged 3-wire driver for the Maxim DS1302. The chip keeps a
//! BCD clock/calendar and 31 bytes of battery-backed RAM.
//!
//! ```text
//!                  DS1302
//!              +------------+
//!   (VCC)----1-|VCC         |
//!   (GND)----2-|GND         |
//!   (CLK)----3-|SCLK        |
//!   (SDA)----4-|I/O         |
//!   (CE)-----5-|CE (RST)    |
//!              +------------+
//! ```
//!
//! Every transaction raises chip enable, sends one command byte and then
//! one or more data bytes, LSB first, and drops chip enable again. The
//! chip latches input on the rising clock edge and drives output after
//! the falling edge, so the data line is switched to input only between
//! the command byte and the end of a read.
//!
//! Bit timing relies on a settle delay only; interrupts are not masked
//! during a transfer. An interrupt that stalls a transfer for long
//! enough can break the chip's timing, so keep long handlers off the
//! bus or transfer with interrupts disabled at a higher level.
//!
//! The chip cannot be detected: with nothing attached, reads return
//! whatever the floating data line gives, decoded as if it were valid.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::bcd::{from_bcd, to_bcd};
use crate::calendar::{gmtime, mk_gmtime};
use crate::config::{DS1302_RAM_SIZE, DS1302_SETTLE_NS};
use crate::hal::gpio::DigitalPin;
use crate::types::{Dst, Tm};

/// Command byte encoding
mod cmd {
    /// Read/write bit in write mode
    pub const WRITE: u8 = 0x80;
    /// Read/write bit in read mode
    pub const READ: u8 = 0x81;
    /// Clock/calendar register burst
    pub const CLOCK_BURST: u8 = 0xBE;
    /// RAM burst
    pub const RAM_BURST: u8 = 0xFE;
    /// Register address bits
    pub const ADDR_MASK: u8 = 0x3F;
}

/// `DS1302` register addresses
mod reg {
    pub const SECONDS: u8 = 0;
    pub const WRITE_PROTECT: u8 = 7;
    pub const RAM_START: u8 = 32;
}

/// Write protect bit in the WP register
const WP_BIT: u8 = 0x80;

/// Clock halt bit in the seconds register
const CLOCK_HALT: u8 = 0x80;

/// Build the command byte for a single register transfer
const fn address_byte(addr: u8, rw: u8) -> u8 {
    ((addr & cmd::ADDR_MASK) << 1) | rw
}

/// Clock/calendar register block, in burst transfer order
///
/// The first seven fields hold packed BCD exactly as on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ClockRegisters {
    /// 00-59 seconds, bit 7 is clock halt
    pub seconds: u8,
    /// 00-59 minutes
    pub minutes: u8,
    /// 00-23 hours (24 hour mode)
    pub hours: u8,
    /// 01-31 day of month
    pub date: u8,
    /// 01-12 month
    pub month: u8,
    /// 01-07 day of week, Sunday is 1
    pub weekday: u8,
    /// 00-99 year since 2000
    pub year: u8,
    /// Write protect register, bit 7 set protects
    pub write_protect: u8,
}

impl ClockRegisters {
    /// Size of the register block on the wire
    pub const LEN: usize = 8;

    /// Parse a block in wire order
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self {
            seconds: bytes[0],
            minutes: bytes[1],
            hours: bytes[2],
            date: bytes[3],
            month: bytes[4],
            weekday: bytes[5],
            year: bytes[6],
            write_protect: bytes[7],
        }
    }

    /// Serialize in wire order
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; Self::LEN] {
        [
            self.seconds,
            self.minutes,
            self.hours,
            self.date,
            self.month,
            self.weekday,
            self.year,
            self.write_protect,
        ]
    }

    /// Encode a normalized broken-down time, write protect set.
    ///
    /// The clock halt bit is cleared, so writing this block also starts
    /// the oscillator. Years outside 2000-2099 keep their last two digits.
    #[must_use]
    pub fn from_tm(tm: &Tm) -> Self {
        Self {
            seconds: bcd_field(tm.sec),
            minutes: bcd_field(tm.min),
            hours: bcd_field(tm.hour),
            date: bcd_field(tm.mday),
            month: bcd_field(tm.mon + 1),
            weekday: bcd_field(tm.wday + 1),
            year: bcd_field(tm.year - 100),
            write_protect: WP_BIT,
        }
    }

    /// Decode into broken-down time.
    ///
    /// The clock halt bit is ignored. Year-day is derived from the date.
    #[must_use]
    pub fn to_tm(&self) -> Tm {
        let mut tm = Tm {
            sec: i16::from(from_bcd(self.seconds & !CLOCK_HALT)),
            min: i16::from(from_bcd(self.minutes)),
            hour: i16::from(from_bcd(self.hours & 0x3F)),
            mday: i16::from(from_bcd(self.date)),
            wday: i16::from(from_bcd(self.weekday)) - 1,
            mon: i16::from(from_bcd(self.month)) - 1,
            year: i16::from(from_bcd(self.year)) + 100,
            yday: 0,
            isdst: Dst::Off,
        };
        tm.yday = gmtime(mk_gmtime(&tm)).yday;
        tm
    }

    /// Whether the oscillator is stopped
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.seconds & CLOCK_HALT != 0
    }

    /// Whether register writes are blocked
    #[must_use]
    pub const fn is_write_protected(&self) -> bool {
        self.write_protect & WP_BIT != 0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ClockRegisters {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DS1302{=[u8]:x}", &self.to_bytes()[..]);
    }
}

/// Two BCD digits of a calendar field
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bcd_field(value: i16) -> u8 {
    to_bcd(value.rem_euclid(100) as u8)
}

/// `DS1302` driver
pub struct Ds1302<CS, SDA, CLK, D> {
    /// Chip enable, asserted high
    cs: CS,
    /// Serial data, bidirectional
    sda: SDA,
    /// Serial clock, idles low
    clk: CLK,
    delay: D,
}

impl<CS, SDA, CLK, D> Ds1302<CS, SDA, CLK, D>
where
    CS: DigitalPin,
    SDA: DigitalPin,
    CLK: DigitalPin,
    D: DelayNs,
{
    /// Static RAM size
    pub const RAM_MAX: usize = DS1302_RAM_SIZE;

    /// Create a new driver. All pins become outputs, chip enable and
    /// clock are driven low.
    pub fn new(mut cs: CS, mut sda: SDA, mut clk: CLK, delay: D) -> Self {
        cs.set_output_mode();
        cs.write(PinState::Low);
        sda.set_output_mode();
        clk.set_output_mode();
        clk.write(PinState::Low);
        Self { cs, sda, clk, delay }
    }

    /// Give the pins and delay back
    pub fn release(self) -> (CS, SDA, CLK, D) {
        (self.cs, self.sda, self.clk, self.delay)
    }

    /// Burst read the clock/calendar register block
    pub fn read_registers(&mut self) -> ClockRegisters {
        let mut bytes = [0u8; ClockRegisters::LEN];
        self.burst_read(cmd::CLOCK_BURST, &mut bytes);
        ClockRegisters::from_bytes(bytes)
    }

    /// Burst write the clock/calendar register block.
    ///
    /// Write protect is cleared first; the block's own eighth byte then
    /// sets the final write protect state.
    pub fn write_registers(&mut self, regs: &ClockRegisters) {
        self.write_enable();
        self.burst_write(cmd::CLOCK_BURST, &regs.to_bytes());
    }

    /// Read the clock and calendar as broken-down time
    pub fn get_time(&mut self) -> Tm {
        self.read_registers().to_tm()
    }

    /// Set the clock and calendar from a normalized broken-down time.
    ///
    /// Leaves the chip write protected.
    pub fn set_time(&mut self, tm: &Tm) {
        #[cfg(feature = "embedded")]
        defmt::debug!("DS1302: set time {}", tm);
        self.write_registers(&ClockRegisters::from_tm(tm));
    }

    /// Clear write protect; clock/calendar and RAM accept writes
    pub fn write_enable(&mut self) {
        self.write_register(reg::WRITE_PROTECT, 0x00);
    }

    /// Set write protect; further writes are ignored by the chip
    pub fn write_disable(&mut self) {
        self.write_register(reg::WRITE_PROTECT, WP_BIT);
    }

    /// Whether the oscillator is stopped (clock halt bit set)
    pub fn is_halted(&mut self) -> bool {
        self.read_register(reg::SECONDS) & CLOCK_HALT != 0
    }

    /// Read one RAM byte. Addresses above 30 clamp to 30.
    pub fn read_ram_byte(&mut self, addr: u8) -> u8 {
        self.read_register(ram_address(addr))
    }

    /// Write one RAM byte. Addresses above 30 clamp to 30.
    ///
    /// Write protect is left alone: call [`Self::write_enable`] first or
    /// the chip silently drops the write.
    pub fn write_ram_byte(&mut self, addr: u8, data: u8) {
        self.write_register(ram_address(addr), data);
    }

    /// Burst read RAM from address zero into `buf`.
    ///
    /// Reads at most 31 bytes and returns how many were read.
    pub fn read_ram(&mut self, buf: &mut [u8]) -> usize {
        let len = buf.len().min(Self::RAM_MAX);
        if len == 0 {
            return 0;
        }
        self.burst_read(cmd::RAM_BURST, &mut buf[..len]);
        len
    }

    /// Burst write `buf` to RAM from address zero.
    ///
    /// Writes at most 31 bytes and returns how many were written.
    /// Write protect is cleared for the burst and set again afterwards.
    pub fn write_ram(&mut self, buf: &[u8]) -> usize {
        let len = buf.len().min(Self::RAM_MAX);
        if len == 0 {
            return 0;
        }
        #[cfg(feature = "embedded")]
        {
            if len < buf.len() {
                defmt::debug!("DS1302: RAM burst clamped {} -> {}", buf.len(), len);
            }
        }
        self.write_enable();
        self.burst_write(cmd::RAM_BURST, &buf[..len]);
        self.write_disable();
        len
    }

    /// Read a single register by device address (0-63)
    pub fn read_register(&mut self, addr: u8) -> u8 {
        self.select();
        self.write_byte(address_byte(addr, cmd::READ));
        self.sda.set_input_mode();
        let data = self.read_byte();
        self.sda.set_output_mode();
        self.deselect();
        data
    }

    /// Write a single register by device address (0-63)
    pub fn write_register(&mut self, addr: u8, data: u8) {
        self.select();
        self.write_byte(address_byte(addr, cmd::WRITE));
        self.write_byte(data);
        self.deselect();
    }

    fn burst_read(&mut self, command: u8, buf: &mut [u8]) {
        #[cfg(feature = "embedded")]
        defmt::trace!("DS1302: burst read {=u8:#x}, {} bytes", command | cmd::READ, buf.len());
        self.select();
        self.write_byte(command | cmd::READ);
        self.sda.set_input_mode();
        for byte in buf.iter_mut() {
            *byte = self.read_byte();
        }
        self.sda.set_output_mode();
        self.deselect();
    }

    fn burst_write(&mut self, command: u8, buf: &[u8]) {
        #[cfg(feature = "embedded")]
        defmt::trace!("DS1302: burst write {=u8:#x}, {} bytes", command | cmd::WRITE, buf.len());
        self.select();
        self.write_byte(command | cmd::WRITE);
        for &byte in buf {
            self.write_byte(byte);
        }
        self.deselect();
    }

    fn select(&mut self) {
        self.cs.write(PinState::High);
    }

    fn deselect(&mut self) {
        self.cs.write(PinState::Low);
    }

    /// Shift one byte in, LSB first. Data line must already be an input.
    fn read_byte(&mut self) -> u8 {
        let mut data = 0;
        for bit in 0..8 {
            if self.sda.read() == PinState::High {
                data |= 1 << bit;
            }
            self.clk.toggle();
            self.delay.delay_ns(DS1302_SETTLE_NS);
            self.clk.toggle();
            self.delay.delay_ns(DS1302_SETTLE_NS);
        }
        data
    }

    /// Shift one byte out, LSB first
    fn write_byte(&mut self, data: u8) {
        for bit in 0..8 {
            self.sda.write(PinState::from(data & (1 << bit) != 0));
            self.delay.delay_ns(DS1302_SETTLE_NS);
            self.clk.toggle();
            self.delay.delay_ns(DS1302_SETTLE_NS);
            self.clk.toggle();
        }
    }
}

/// Device address of a RAM byte
fn ram_address(addr: u8) -> u8 {
    #[allow(clippy::cast_possible_truncation)]
    let last = (DS1302_RAM_SIZE - 1) as u8;
    reg::RAM_START + addr.min(last)
}
