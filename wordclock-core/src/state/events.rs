//! Button events and the commands they produce

use crate::time::WallTime;

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Short press and release
    Click,
    /// Button held past the long-press threshold
    LongPress,
}

/// Work the controller asks the firmware to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Play the transition to the current frame again
    Replay,
    /// Write the adjusted time to the clock
    SetTime(WallTime),
}
