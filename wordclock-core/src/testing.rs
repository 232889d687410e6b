//! Test doubles shared by the unit tests

use embedded_hal_async::delay::DelayNs;

use crate::pixels::PixelBuffer;
use crate::traits::FrameSink;

/// Records every frame shown
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<PixelBuffer>,
}

impl FrameSink for RecordingSink {
    fn show(&mut self, frame: &PixelBuffer) {
        self.frames.push(*frame);
    }
}

/// Records requested delays (in milliseconds) without sleeping
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub delays_ms: Vec<u32>,
}

impl RecordingDelay {
    /// Total requested delay in milliseconds
    pub fn total_ms(&self) -> u32 {
        self.delays_ms.iter().sum()
    }
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}
