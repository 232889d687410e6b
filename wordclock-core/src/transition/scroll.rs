//! Scroll-shift transition
//!
//! The old frame slides out column by column, then the new frame slides in
//! behind it:
//!
//! - Vanish, 8 steps: every row shifts left by one bit (the high bit falls
//!   off the edge).
//! - Reveal, 8 steps (`p = 0..7`): every row shifts left and takes bit
//!   `7 - p` of the matching target row into bit 0.
//!
//! Every step emits one frame and waits `speed_ms`, so a transition is
//! exactly 16 frames and `16 * speed_ms` long. The final frame is the target.

use embedded_hal_async::delay::DelayNs;

use super::Transition;
use crate::pixels::{PixelBuffer, SIZE};
use crate::traits::FrameSink;

/// Default delay between frames
pub const DEFAULT_SPEED_MS: u32 = 20;

/// Frames emitted per transition
pub const FRAMES: usize = 2 * SIZE;

/// Scroll-shift transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollShift {
    speed_ms: u32,
}

impl Default for ScrollShift {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_MS)
    }
}

impl ScrollShift {
    /// Create a transition with `speed_ms` between frames
    pub fn new(speed_ms: u32) -> Self {
        Self { speed_ms }
    }

    /// Delay between frames
    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }
}

impl Transition for ScrollShift {
    async fn animate<S: FrameSink, D: DelayNs>(
        &mut self,
        current: &PixelBuffer,
        target: &PixelBuffer,
        sink: &mut S,
        delay: &mut D,
    ) -> PixelBuffer {
        let mut frame = *current;

        // vanish
        for _ in 0..SIZE {
            for row in frame.rows_mut() {
                *row <<= 1;
            }
            sink.show(&frame);
            delay.delay_ms(self.speed_ms).await;
        }

        // reveal
        for p in 0..SIZE {
            for (row, incoming) in frame.rows_mut().iter_mut().zip(target.rows()) {
                *row = (*row << 1) | ((incoming >> (7 - p)) & 1);
            }
            sink.show(&frame);
            delay.delay_ms(self.speed_ms).await;
        }

        frame
    }
}
