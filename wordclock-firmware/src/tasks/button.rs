//! Button polling task
//!
//! Samples the front-panel button and queues decoded events for the clock
//! task.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use wordclock_drivers::input::Button;
use wordclock_hal::ActiveLow;
use wordclock_hal_rp2040::RpInput;

use crate::channels::BUTTON_EVENTS;

/// Sampling interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 10;

/// Button task - polls the pin and forwards clicks and long presses
#[embassy_executor::task]
pub async fn button_task(mut button: Button<ActiveLow<RpInput<'static>>>) {
    info!("Button task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        if let Some(event) = button.poll(Instant::now().as_millis()) {
            debug!("Button: {}", event);
            if BUTTON_EVENTS.try_send(event).is_err() {
                warn!("Button queue full, dropping {}", event);
            }
        }
    }
}
