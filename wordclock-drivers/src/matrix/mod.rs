//! LED matrix drivers
//!
//! Drivers take logical frames (row 0 on top, bit 0 leftmost) and apply the
//! board's [`Wiring`] transform before sending rows to the hardware.

pub mod max7219;

pub use max7219::{Max7219, Max7219Error};
pub use wordclock_core::config::Wiring;
