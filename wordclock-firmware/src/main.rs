//! Wordclock - 8x8 LED Word Clock Firmware
//!
//! Main firmware binary for RP2040 boards driving a MAX7219 matrix behind
//! a letter plate. Spells the time in words ("A QUARTER PAST NINE") and
//! animates between phrases.
//!
//! Pin assignments (Raspberry Pi Pico):
//! - SPI0 SCK GPIO18, MOSI GPIO19, CS GPIO17 to the MAX7219
//! - Push button on GPIO15 to ground

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::rtc::Rtc;
use embassy_rp::spi::{self, Spi};
use embedded_hal_bus::spi::ExclusiveDevice;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use {defmt_rtt as _, panic_probe as _};

use wordclock_core::settings::SettingsStore;
use wordclock_core::time::DemoTime;
use wordclock_core::{Animation, ClockController, WallTime};
use wordclock_drivers::input::Button;
use wordclock_drivers::matrix::Max7219;
use wordclock_hal::ActiveLow;
use wordclock_hal_rp2040::{FlashEeprom, RpInput, RtcClock};

use crate::clock_source::ClockSource;

mod channels;
mod clock_source;
mod config;
mod tasks;

/// MAX7219 SPI clock
const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Wordclock firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::clock_config();
    if let Err(e) = config.validate() {
        defmt::panic!("Invalid clock configuration: {}", e);
    }
    info!(
        "Config: transition={}, poll={}ms, half_to={}",
        config.transition, config.poll_interval_ms, config.phrasing.half_to_enabled
    );

    // Setup SPI for the LED matrix
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let bus = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let device = unwrap!(ExclusiveDevice::new_no_delay(bus, cs));

    let mut matrix = Max7219::new(device, config.wiring);
    match matrix.init() {
        Ok(()) => info!("MAX7219 initialized"),
        Err(e) => error!("MAX7219 init failed: {}", Debug2Format(&e)),
    }

    // Time source
    let source = if config::DEMO_MODE {
        info!("Demo mode: one minute per poll");
        ClockSource::Demo(DemoTime::new(WallTime::MIDNIGHT))
    } else {
        ClockSource::Rtc(RtcClock::new(Rtc::new(p.RTC)))
    };

    // Settings storage in the last flash sector
    let store = SettingsStore::new(FlashEeprom::new(p.FLASH, p.DMA_CH0));

    // Button, active low with pull-up
    let button = Button::new(ActiveLow(RpInput(Input::new(p.PIN_15, Pull::Up))));

    // Sparkle transition randomness
    let rng = SmallRng::seed_from_u64(RoscRng.next_u64());
    let animation = Animation::new(config.transition, config.scroll_speed_ms, rng);
    let controller = ClockController::new(&config, animation);

    // Spawn tasks
    spawner.spawn(tasks::settings_task(store)).unwrap();
    spawner.spawn(tasks::button_task(button)).unwrap();
    spawner
        .spawn(tasks::clock_task(controller, matrix, source, config))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
