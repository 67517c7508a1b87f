//! Timekeeping Firmware Main Application
//!
//! Entry point for the STM32G474 software RTC with DS1302 backup.
//! Seeds the software clock from the chip, then keeps it running from
//! the embassy time driver.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Flex, Level, Output, Speed};
use embassy_time::{Delay, Duration, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use rtc_firmware::prelude::*;

/// Process-wide software clock, advanced by `tick_task`
static RTC: SoftRtc = SoftRtc::new();

/// Local time configuration used for display
const CALENDAR: Calendar = Calendar::with_zone(DEFAULT_ZONE_SECS);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Timekeeping Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Status LED (typically on PA5 for Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // DS1302 on PB3 = CE, PB4 = I/O, PB5 = SCLK
    let mut chip = Ds1302::new(Flex::new(p.PB3), Flex::new(p.PB4), Flex::new(p.PB5), Delay);

    let regs = chip.read_registers();
    if regs.is_halted() {
        // Oscillator stopped (battery lost); fall back to the last snapshot
        let mut snapshot = [0u8; 4];
        chip.read_ram(&mut snapshot);
        let time = Time::from_le_bytes(snapshot);
        warn!("DS1302 halted, restoring snapshot {}", time);
        RTC.restart(time, EmbassyMillis.millis());
        chip.set_time(&gmtime(time));
    } else {
        let now = regs.to_tm();
        RTC.restart(mk_gmtime(&now), EmbassyMillis.millis());
        info!("Clock seeded from DS1302: {}", now);
    }

    // Spawn background tasks
    spawner.spawn(tick_task()).unwrap();
    spawner.spawn(heartbeat_task(led)).unwrap();

    info!("Tasks spawned, entering main loop");

    // Main loop - persist the epoch counter in chip RAM
    let mut ticker = Ticker::every(Duration::from_secs(u64::from(RAM_SNAPSHOT_SECS)));
    loop {
        ticker.next().await;
        let time = RTC.get_time();
        chip.write_ram(&time.to_le_bytes());
        info!("Snapshot {} saved", time);
    }
}

/// Tick task - advances the software clock
#[embassy_executor::task]
async fn tick_task() {
    loop {
        RTC.tick_from(&EmbassyMillis);
        Timer::after(Duration::from_millis(TICK_POLL_MS)).await;
    }
}

/// Heartbeat task - blinks LED and prints local time once per second
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        let local = CALENDAR.localtime(RTC.get_time());
        info!("{} {}", local.weekday(), isotime_string(&local).as_str());
        Timer::after(Duration::from_millis(900)).await;
    }
}
