//! GPIO inputs

use embassy_rp::gpio::Input;
use wordclock_hal::InputPin;

/// Embassy input pin behind the shared `InputPin` trait
pub struct RpInput<'d>(pub Input<'d>);

impl<'d> InputPin for RpInput<'d> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
