//! Hardware abstraction traits
//!
//! These traits define the interface between the clock logic
//! and hardware-specific implementations.

pub mod clock;
pub mod display;

pub use clock::{SettableClock, TimeSource};
pub use display::FrameSink;
