//! Clock task
//!
//! Owns the controller, the matrix and the time source. Polls the time,
//! runs transitions and handles button events. While a transition runs no
//! events are taken; they wait in the button channel.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Delay, Instant, Timer};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use rand::rngs::SmallRng;
use wordclock_core::config::ClockConfig;
use wordclock_core::state::{Command, Mode};
use wordclock_core::traits::{SettableClock, TimeSource};
use wordclock_core::{Animation, ClockController};
use wordclock_drivers::matrix::Max7219;

use crate::channels::BUTTON_EVENTS;
use crate::clock_source::ClockSource;

/// Refresh interval while the adjust frame blinks
const BLINK_REFRESH_MS: u64 = 32;

/// LED matrix on SPI0
pub type Matrix = Max7219<ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>>;

/// Controller with the configured transition
pub type Controller = ClockController<Animation<SmallRng>>;

/// Clock task - main display loop
#[embassy_executor::task]
pub async fn clock_task(
    mut controller: Controller,
    mut matrix: Matrix,
    mut source: ClockSource,
    config: ClockConfig,
) {
    info!("Clock task started");

    let mut delay = Delay;
    let mut reported_failures = 0;

    // Power-on test: every pixel lit
    controller.show_boot(&mut matrix);
    Timer::after_millis(config.boot_hold_ms as u64).await;

    let valid = source.is_valid();
    controller.begin(valid, source.now());
    if !valid {
        warn!("Clock not set, entering adjust mode");
    }

    loop {
        let wait_ms = match controller.mode() {
            Mode::Running => config.poll_interval_ms as u64,
            Mode::Adjusting => BLINK_REFRESH_MS,
        };

        if let Either::First(event) = select(BUTTON_EVENTS.receive(), Timer::after_millis(wait_ms)).await {
            let mode = controller.mode();
            match controller.handle(event.into(), source.now()) {
                Some(Command::Replay) => controller.replay(&mut matrix, &mut delay).await,
                Some(Command::SetTime(time)) => match source.set_time(time) {
                    Ok(()) => info!("Clock set to {}", time),
                    Err(e) => error!("Failed to set clock: {}", Debug2Format(&e)),
                },
                None => {}
            }
            if controller.mode() != mode {
                info!("Mode: {} -> {}", mode, controller.mode());
            }
        }

        match controller.mode() {
            Mode::Running => {
                if controller.update(source.now(), &mut matrix, &mut delay).await {
                    debug!("Frame updated");
                }
            }
            Mode::Adjusting => controller.show_adjust(Instant::now().as_millis(), &mut matrix),
        }

        if matrix.failed_writes() != reported_failures {
            reported_failures = matrix.failed_writes();
            if let Some(e) = matrix.last_error() {
                warn!("Matrix write failed ({} total): {}", reported_failures, Debug2Format(e));
            }
        }
    }
}
