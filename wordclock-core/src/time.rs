//! Wall-clock time values

use crate::traits::TimeSource;

/// Hour and minute of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    hour: u8,
    minute: u8,
}

impl WallTime {
    /// Midnight
    pub const MIDNIGHT: WallTime = WallTime { hour: 0, minute: 0 };

    /// Create a time, rejecting out-of-range values
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Hour, 0-23
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute, 0-59
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight
    pub fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// This time plus `minutes`, wrapping at midnight
    pub fn add_minutes(&self, minutes: u16) -> Self {
        let total = (self.minutes_of_day() as u32 + minutes as u32) % (24 * 60);
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }

    /// Round the minute down to a multiple of `step`
    pub fn floor_minutes(&self, step: u8) -> Self {
        let step = step.max(1);
        Self {
            hour: self.hour,
            minute: self.minute / step * step,
        }
    }
}

/// Time source that advances one minute per reading
///
/// Runs the clock through the whole day quickly, without an RTC.
#[derive(Debug, Clone)]
pub struct DemoTime {
    next: WallTime,
}

impl DemoTime {
    /// Start the demo at `start`
    pub fn new(start: WallTime) -> Self {
        Self { next: start }
    }
}

impl TimeSource for DemoTime {
    fn now(&mut self) -> Option<WallTime> {
        let now = self.next;
        self.next = now.add_minutes(1);
        Some(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_range() {
        assert!(WallTime::new(23, 59).is_some());
        assert!(WallTime::new(24, 0).is_none());
        assert!(WallTime::new(0, 60).is_none());
    }

    #[test]
    fn test_add_minutes_wraps() {
        let t = WallTime::new(23, 50).unwrap();
        assert_eq!(t.add_minutes(15), WallTime::new(0, 5).unwrap());
        assert_eq!(t.add_minutes(24 * 60), t);
    }

    #[test]
    fn test_floor_minutes() {
        let t = WallTime::new(9, 44).unwrap();
        assert_eq!(t.floor_minutes(15), WallTime::new(9, 30).unwrap());
        assert_eq!(t.floor_minutes(0), t);
    }

    #[test]
    fn test_demo_time_advances() {
        let mut demo = DemoTime::new(WallTime::new(11, 59).unwrap());
        assert_eq!(demo.now(), WallTime::new(11, 59));
        assert_eq!(demo.now(), WallTime::new(12, 0));
        assert_eq!(demo.now(), WallTime::new(12, 1));
    }
}
