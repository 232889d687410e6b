//! GPIO pin abstractions
//!
//! The clock only reads pins (the push button); outputs are driven through
//! the SPI matrix driver.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input pin with inverted logic
///
/// Wraps an active-low input (button to ground with pull-up) so that
/// `is_high()` means "pressed".
#[derive(Debug, Clone)]
pub struct ActiveLow<P>(pub P);

impl<P: InputPin> InputPin for ActiveLow<P> {
    fn is_high(&self) -> bool {
        self.0.is_low()
    }
}
