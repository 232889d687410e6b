//! Configuration type definitions

use crate::compose::Phrasing;
use crate::transition::scroll::DEFAULT_SPEED_MS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default input polling interval
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 200;

/// Default time the all-on test frame is held after power-on
pub const DEFAULT_BOOT_HOLD_MS: u32 = 3000;

/// Transition strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransitionKind {
    /// Old frame slides out, new frame slides in
    Scroll,
    /// Pixels fade out and in in random order
    #[default]
    Sparkle,
}

/// How the matrix is wired relative to the logical frame
///
/// Row 0 of a [`PixelBuffer`](crate::pixels::PixelBuffer) is the top row and
/// bit 0 the leftmost column. Boards that route the matrix differently
/// mirror one or both axes before the rows go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wiring {
    /// Mirror each row byte (column 0 becomes column 7)
    pub reverse_bits: bool,
    /// Send row 7 first
    pub reverse_rows: bool,
}

impl Wiring {
    /// Map logical rows to the order and bit layout the driver expects
    pub fn apply(&self, rows: &[u8; 8]) -> [u8; 8] {
        let mut out = *rows;
        if self.reverse_rows {
            out.reverse();
        }
        if self.reverse_bits {
            for row in out.iter_mut() {
                *row = row.reverse_bits();
            }
        }
        out
    }
}

/// Clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Phrasing thresholds
    pub phrasing: Phrasing,
    /// Transition used when the phrase changes
    pub transition: TransitionKind,
    /// Delay between scroll frames (ms)
    pub scroll_speed_ms: u32,
    /// Interval between time and button polls (ms)
    pub poll_interval_ms: u32,
    /// How long the all-on frame is shown at boot (ms)
    pub boot_hold_ms: u32,
    /// Matrix wiring transform
    pub wiring: Wiring,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            phrasing: Phrasing::default(),
            transition: TransitionKind::default(),
            scroll_speed_ms: DEFAULT_SPEED_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            boot_hold_ms: DEFAULT_BOOT_HOLD_MS,
            wiring: Wiring::default(),
        }
    }
}

impl ClockConfig {
    /// Check the values are usable
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.scroll_speed_ms == 0 {
            return Err("scroll_speed_ms must be greater than 0");
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0");
        }
        Ok(())
    }
}
