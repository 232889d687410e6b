//! Time source traits (RTC, NTP, demo clock)

use crate::time::WallTime;

/// Supplies the current wall-clock time
pub trait TimeSource {
    /// Latest reading, or `None` if no fresh reading is available
    ///
    /// The clock keeps showing the last composed frame while this
    /// returns `None`.
    fn now(&mut self) -> Option<WallTime>;
}

/// Time source that can be set from the front panel
pub trait SettableClock: TimeSource {
    /// Error type for setting the clock
    type Error;

    /// Set the clock to `time`
    fn set_time(&mut self, time: WallTime) -> Result<(), Self::Error>;
}
