//! Time source selection
//!
//! Embassy tasks cannot be generic, so the RTC and the demo clock are
//! wrapped in one enum.

use embassy_rp::rtc::RtcError;
use wordclock_core::traits::{SettableClock, TimeSource};
use wordclock_core::{DemoTime, WallTime};
use wordclock_hal_rp2040::RtcClock;

/// Where the clock reads its time
pub enum ClockSource {
    Rtc(RtcClock<'static>),
    Demo(DemoTime),
}

impl ClockSource {
    /// Check if the time can be trusted without adjusting it first
    pub fn is_valid(&self) -> bool {
        match self {
            ClockSource::Rtc(rtc) => rtc.is_valid(),
            ClockSource::Demo(_) => true,
        }
    }
}

impl TimeSource for ClockSource {
    fn now(&mut self) -> Option<WallTime> {
        match self {
            ClockSource::Rtc(rtc) => rtc.now(),
            ClockSource::Demo(demo) => demo.now(),
        }
    }
}

impl SettableClock for ClockSource {
    type Error = RtcError;

    fn set_time(&mut self, time: WallTime) -> Result<(), RtcError> {
        match self {
            ClockSource::Rtc(rtc) => rtc.set_time(time),
            ClockSource::Demo(demo) => {
                *demo = DemoTime::new(time);
                Ok(())
            }
        }
    }
}
