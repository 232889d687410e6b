//! Mode definition

use super::events::Event;

/// Clock modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Showing the current time
    #[default]
    Running,
    /// User is setting the time in 15 minute steps
    Adjusting,
}

impl Mode {
    /// Check if the displayed time follows the time source
    pub fn follows_clock(&self) -> bool {
        matches!(self, Mode::Running)
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Mode::*;

        match (self, event) {
            (Running, LongPress) => Adjusting,
            (Adjusting, LongPress) => Running,

            // Clicks never change mode
            _ => self,
        }
    }
}
