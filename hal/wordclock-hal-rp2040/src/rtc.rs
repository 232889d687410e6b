//! On-chip real-time clock
//!
//! The RP2040 RTC loses its time on power-down. A year before
//! [`VALID_FROM_YEAR`] means it was never set since boot.

use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc, RtcError};
use wordclock_core::traits::{SettableClock, TimeSource};
use wordclock_core::WallTime;

/// Readings from earlier years are treated as unset
pub const VALID_FROM_YEAR: u16 = 2020;

/// RTC-backed time source
pub struct RtcClock<'d> {
    rtc: Rtc<'d, RTC>,
}

impl<'d> RtcClock<'d> {
    /// Wrap an initialized RTC
    pub fn new(rtc: Rtc<'d, RTC>) -> Self {
        Self { rtc }
    }

    /// Check if the RTC holds a time set since power-up
    pub fn is_valid(&self) -> bool {
        matches!(self.rtc.now(), Ok(dt) if dt.year >= VALID_FROM_YEAR)
    }
}

impl<'d> TimeSource for RtcClock<'d> {
    fn now(&mut self) -> Option<WallTime> {
        match self.rtc.now() {
            Ok(dt) if dt.year >= VALID_FROM_YEAR => WallTime::new(dt.hour, dt.minute),
            _ => None,
        }
    }
}

impl<'d> SettableClock for RtcClock<'d> {
    type Error = RtcError;

    fn set_time(&mut self, time: WallTime) -> Result<(), RtcError> {
        // Only the time of day is shown, so the date is pinned
        self.rtc.set_datetime(DateTime {
            year: VALID_FROM_YEAR,
            month: 1,
            day: 1,
            day_of_week: DayOfWeek::Wednesday,
            hour: time.hour(),
            minute: time.minute(),
            second: 0,
        })
    }
}
