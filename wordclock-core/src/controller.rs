//! Clock controller
//!
//! Owns the frame on screen and decides what to show next:
//!
//! - Running: each poll composes the current time; when the phrase changes
//!   the configured transition animates to it.
//! - Adjusting: the time being set blinks on the matrix and the button steps
//!   it forward in quarter hours.
//!
//! The controller never touches hardware. Frames go to a [`FrameSink`], time
//! readings are passed in, and writing the RTC is returned as a [`Command`].

use embedded_hal_async::delay::DelayNs;

use crate::compose::{compose, Phrasing};
use crate::config::ClockConfig;
use crate::pixels::PixelBuffer;
use crate::state::{Command, Event, Mode};
use crate::time::WallTime;
use crate::traits::FrameSink;
use crate::transition::Transition;

/// Minutes added per click while adjusting
pub const ADJUST_STEP_MINUTES: u8 = 15;

/// The adjust frame toggles every 256 ms
const BLINK_SHIFT: u32 = 8;

/// Word clock controller
pub struct ClockController<T> {
    transition: T,
    phrasing: Phrasing,
    mode: Mode,
    current: PixelBuffer,
    adjust: WallTime,
}

impl<T: Transition> ClockController<T> {
    /// Create a controller; the matrix is assumed to show all pixels lit
    pub fn new(config: &ClockConfig, transition: T) -> Self {
        Self {
            transition,
            phrasing: config.phrasing,
            mode: Mode::Running,
            current: PixelBuffer::full(),
            adjust: WallTime::MIDNIGHT,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Frame on screen
    pub fn current(&self) -> &PixelBuffer {
        &self.current
    }

    /// Time being set while adjusting
    pub fn adjust_time(&self) -> WallTime {
        self.adjust
    }

    /// Show the power-on frame
    pub fn show_boot<S: FrameSink>(&mut self, sink: &mut S) {
        self.current = PixelBuffer::full();
        sink.show(&self.current);
    }

    /// Pick the starting mode
    ///
    /// A clock without a trustworthy time starts in adjust mode.
    pub fn begin(&mut self, clock_valid: bool, now: Option<WallTime>) {
        if !clock_valid {
            self.enter_adjust(now);
        }
    }

    /// Show the time from a fresh reading
    ///
    /// Returns `true` when a transition ran. `None` means no fresh reading,
    /// and the frame on screen stays. Readings are ignored while adjusting.
    pub async fn update<S: FrameSink, D: DelayNs>(
        &mut self,
        reading: Option<WallTime>,
        sink: &mut S,
        delay: &mut D,
    ) -> bool {
        if !self.mode.follows_clock() {
            return false;
        }
        let Some(now) = reading else {
            return false;
        };

        let target = compose(now.hour(), now.minute(), self.phrasing);
        if target == self.current {
            return false;
        }

        self.current = self
            .transition
            .animate(&self.current, &target, sink, delay)
            .await;
        true
    }

    /// Run the transition again onto the frame already on screen
    pub async fn replay<S: FrameSink, D: DelayNs>(&mut self, sink: &mut S, delay: &mut D) {
        let target = self.current;
        self.current = self
            .transition
            .animate(&self.current, &target, sink, delay)
            .await;
    }

    /// Handle a button event
    ///
    /// `now` seeds the adjust time when entering adjust mode.
    pub fn handle(&mut self, event: Event, now: Option<WallTime>) -> Option<Command> {
        let next = self.mode.transition(event);

        let command = match (self.mode, event) {
            (Mode::Running, Event::Click) => Some(Command::Replay),
            (Mode::Running, Event::LongPress) => {
                self.enter_adjust(now);
                None
            }
            (Mode::Adjusting, Event::Click) => {
                self.step_adjust();
                None
            }
            (Mode::Adjusting, Event::LongPress) => Some(Command::SetTime(self.adjust)),
        };

        self.mode = next;
        command
    }

    /// Frame to show at `now_ms` while adjusting
    pub fn adjust_frame(&self, now_ms: u64) -> PixelBuffer {
        if (now_ms >> BLINK_SHIFT) & 1 == 1 {
            compose(self.adjust.hour(), self.adjust.minute(), self.phrasing)
        } else {
            PixelBuffer::new()
        }
    }

    /// Show the blinking adjust frame
    pub fn show_adjust<S: FrameSink>(&mut self, now_ms: u64, sink: &mut S) {
        self.current = self.adjust_frame(now_ms);
        sink.show(&self.current);
    }

    fn enter_adjust(&mut self, now: Option<WallTime>) {
        self.mode = Mode::Adjusting;
        self.adjust = now
            .unwrap_or(WallTime::MIDNIGHT)
            .floor_minutes(ADJUST_STEP_MINUTES);
    }

    fn step_adjust(&mut self) {
        let next = self.adjust.add_minutes(ADJUST_STEP_MINUTES as u16);
        self.adjust = WallTime::new(next.hour() % 12, next.minute()).unwrap_or(WallTime::MIDNIGHT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingDelay, RecordingSink};
    use crate::transition::ScrollShift;
    use embassy_futures::block_on;

    fn controller() -> ClockController<ScrollShift> {
        ClockController::new(&ClockConfig::default(), ScrollShift::default())
    }

    fn t(hour: u8, minute: u8) -> Option<WallTime> {
        WallTime::new(hour, minute)
    }

    #[test]
    fn test_starts_full() {
        let mut c = controller();
        let mut sink = RecordingSink::default();
        c.show_boot(&mut sink);
        assert_eq!(sink.frames, vec![PixelBuffer::full()]);
        assert_eq!(c.mode(), Mode::Running);
    }

    #[test]
    fn test_update_transitions_on_change() {
        let mut c = controller();
        let mut sink = RecordingSink::default();
        let mut delay = RecordingDelay::default();

        assert!(block_on(c.update(t(9, 15), &mut sink, &mut delay)));
        assert_eq!(sink.frames.len(), 16);
        assert_eq!(*c.current(), compose(9, 15, Phrasing::default()));

        // Same phrase, nothing to do
        assert!(!block_on(c.update(t(9, 16), &mut sink, &mut delay)));
        assert_eq!(sink.frames.len(), 16);

        // No fresh reading keeps the frame
        assert!(!block_on(c.update(None, &mut sink, &mut delay)));
        assert_eq!(sink.frames.len(), 16);
    }

    #[test]
    fn test_click_replays() {
        let mut c = controller();
        let mut sink = RecordingSink::default();
        let mut delay = RecordingDelay::default();
        block_on(c.update(t(3, 0), &mut sink, &mut delay));

        assert_eq!(c.handle(Event::Click, t(3, 0)), Some(Command::Replay));
        block_on(c.replay(&mut sink, &mut delay));
        assert_eq!(sink.frames.len(), 32);
        assert_eq!(*c.current(), compose(3, 0, Phrasing::default()));
    }

    #[test]
    fn test_adjust_cycle() {
        let mut c = controller();

        assert_eq!(c.handle(Event::LongPress, t(14, 44)), None);
        assert_eq!(c.mode(), Mode::Adjusting);
        assert_eq!(c.adjust_time(), WallTime::new(14, 30).unwrap());

        c.handle(Event::Click, None);
        assert_eq!(c.adjust_time(), WallTime::new(2, 45).unwrap());
        c.handle(Event::Click, None);
        assert_eq!(c.adjust_time(), WallTime::new(3, 0).unwrap());

        let command = c.handle(Event::LongPress, None);
        assert_eq!(command, Some(Command::SetTime(WallTime::new(3, 0).unwrap())));
        assert_eq!(c.mode(), Mode::Running);
    }

    #[test]
    fn test_adjust_wraps_at_twelve() {
        let mut c = controller();
        c.handle(Event::LongPress, t(11, 50));
        c.handle(Event::Click, None);
        assert_eq!(c.adjust_time(), WallTime::MIDNIGHT);
    }

    #[test]
    fn test_updates_ignored_while_adjusting() {
        let mut c = controller();
        let mut sink = RecordingSink::default();
        let mut delay = RecordingDelay::default();
        c.begin(false, None);
        assert_eq!(c.mode(), Mode::Adjusting);
        assert!(!block_on(c.update(t(5, 0), &mut sink, &mut delay)));
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn test_begin_with_valid_clock_runs() {
        let mut c = controller();
        c.begin(true, t(8, 0));
        assert_eq!(c.mode(), Mode::Running);
    }

    #[test]
    fn test_adjust_blinks() {
        let mut c = controller();
        c.handle(Event::LongPress, t(9, 15));
        let lit = compose(9, 15, Phrasing::default());

        assert!(c.adjust_frame(0).is_blank());
        assert!(c.adjust_frame(255).is_blank());
        assert_eq!(c.adjust_frame(256), lit);
        assert_eq!(c.adjust_frame(511), lit);
        assert!(c.adjust_frame(512).is_blank());

        let mut sink = RecordingSink::default();
        c.show_adjust(300, &mut sink);
        assert_eq!(sink.frames, vec![lit]);
        assert_eq!(*c.current(), lit);
    }

    #[test]
    fn test_leaving_adjust_animates_to_clock() {
        let mut c = controller();
        let mut sink = RecordingSink::default();
        let mut delay = RecordingDelay::default();

        c.handle(Event::LongPress, t(9, 0));
        c.show_adjust(0, &mut sink);
        c.handle(Event::LongPress, None);

        assert!(block_on(c.update(t(9, 0), &mut sink, &mut delay)));
        assert_eq!(*c.current(), compose(9, 0, Phrasing::default()));
    }
}
