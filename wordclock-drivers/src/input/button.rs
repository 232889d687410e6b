//! Push-button handler
//!
//! Decodes a polled button into clicks and long presses:
//!
//! - The raw level must hold for [`DEBOUNCE_MS`] before it is accepted.
//! - Holding for [`LONG_PRESS_MS`] fires one `LongPress` while still held.
//! - Releasing before that fires `Click`; releasing after a long press
//!   fires nothing.

use wordclock_core::state::Event;
use wordclock_hal::InputPin;

/// Time the level must be stable before it counts
pub const DEBOUNCE_MS: u64 = 50;

/// Hold time for a long press
pub const LONG_PRESS_MS: u64 = 800;

/// Decoded button events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Click,
    LongPress,
}

impl From<ButtonEvent> for Event {
    fn from(event: ButtonEvent) -> Self {
        match event {
            ButtonEvent::Click => Event::Click,
            ButtonEvent::LongPress => Event::LongPress,
        }
    }
}

/// Debounce and press-length state machine
///
/// Fed with the raw level and a millisecond timestamp on every poll.
#[derive(Debug, Clone, Default)]
pub struct ButtonDecoder {
    /// Last raw level seen
    raw: bool,
    /// When the raw level last changed
    raw_since: u64,
    /// Debounced level
    pressed: bool,
    /// When the debounced press started
    pressed_since: u64,
    /// Long press already reported for this press
    long_fired: bool,
}

impl ButtonDecoder {
    /// Create a decoder with the button released
    pub fn new() -> Self {
        Self::default()
    }

    /// Debounced level
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one sample
    pub fn update(&mut self, raw_pressed: bool, now_ms: u64) -> Option<ButtonEvent> {
        if raw_pressed != self.raw {
            self.raw = raw_pressed;
            self.raw_since = now_ms;
        }

        let stable = now_ms.saturating_sub(self.raw_since) >= DEBOUNCE_MS;
        if stable && self.raw != self.pressed {
            self.pressed = self.raw;
            if self.pressed {
                self.pressed_since = now_ms;
                self.long_fired = false;
            } else if !self.long_fired {
                return Some(ButtonEvent::Click);
            }
        }

        if self.pressed
            && !self.long_fired
            && now_ms.saturating_sub(self.pressed_since) >= LONG_PRESS_MS
        {
            self.long_fired = true;
            return Some(ButtonEvent::LongPress);
        }

        None
    }
}

/// Button on an input pin that reads high while pressed
///
/// Wrap active-low buttons in [`wordclock_hal::ActiveLow`].
pub struct Button<P> {
    pin: P,
    decoder: ButtonDecoder,
}

impl<P: InputPin> Button<P> {
    /// Create a new button handler
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            decoder: ButtonDecoder::new(),
        }
    }

    /// Sample the pin
    ///
    /// Should be called regularly (every 10-20 ms).
    pub fn poll(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        self.decoder.update(self.pin.is_high(), now_ms)
    }
}
