//! Frame sink trait for the LED matrix

use crate::pixels::PixelBuffer;

/// Receives every frame the clock wants on screen
///
/// Rows arrive in logical order (row 0 first). Wiring-specific transforms
/// such as bit or row reversal are the implementation's job. Showing a frame
/// cannot fail from the caller's point of view; drivers deal with their own
/// bus errors.
pub trait FrameSink {
    /// Put `frame` on the display
    fn show(&mut self, frame: &PixelBuffer);
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    fn show(&mut self, frame: &PixelBuffer) {
        (**self).show(frame)
    }
}
