//! Sparkle-shuffle transition
//!
//! The lit pixels of the old frame go dark in random order, then the pixels
//! of the new frame light up in random order. Each half runs [`LOOPS`]
//! frames spread over [`FADE_MS`].
//!
//! On loop `i` of the fade-out a pixel stays lit when a draw from
//! `0..LOOPS` exceeds `i`; on the fade-in it lights when the draw is at most
//! `i`. The last loop of each half is therefore certain, which makes the
//! final frame equal the target for every random sequence.

use embedded_hal_async::delay::DelayNs;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::Transition;
use crate::pixels::{PixelBuffer, PIXEL_COUNT};
use crate::traits::FrameSink;

/// Loops per half of the transition
pub const LOOPS: u8 = 12;

/// Duration of each half
pub const FADE_MS: u32 = 500;

/// Delay between frames
pub const FRAME_MS: u32 = FADE_MS / LOOPS as u32;

/// Frames emitted per transition
pub const FRAMES: usize = 2 * LOOPS as usize;

/// Sparkle-shuffle transition driven by an injected random source
#[derive(Debug, Clone)]
pub struct Sparkle<R> {
    rng: R,
}

impl<R: RngCore> Sparkle<R> {
    /// Create a transition drawing from `rng`
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Release the random source
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Run one half of the transition over `pixels`
    ///
    /// `lit(draw, loop)` decides whether a pixel is lit on a given loop.
    async fn fade<S: FrameSink, D: DelayNs>(
        &mut self,
        frame: &mut PixelBuffer,
        pixels: &mut heapless::Vec<u8, PIXEL_COUNT>,
        lit: fn(u8, u8) -> bool,
        sink: &mut S,
        delay: &mut D,
    ) {
        for i in 0..LOOPS {
            pixels.shuffle(&mut self.rng);
            for &idx in pixels.iter() {
                let draw = self.rng.gen_range(0..LOOPS);
                frame.set_index(idx, lit(draw, i));
            }
            sink.show(frame);
            delay.delay_ms(FRAME_MS).await;
        }
    }
}

impl<R: RngCore> Transition for Sparkle<R> {
    async fn animate<S: FrameSink, D: DelayNs>(
        &mut self,
        current: &PixelBuffer,
        target: &PixelBuffer,
        sink: &mut S,
        delay: &mut D,
    ) -> PixelBuffer {
        let mut frame = *current;

        let mut outgoing = current.lit_pixels();
        outgoing.shuffle(&mut self.rng);
        self.fade(&mut frame, &mut outgoing, |draw, i| draw > i, sink, delay)
            .await;

        let mut incoming = target.lit_pixels();
        self.fade(&mut frame, &mut incoming, |draw, i| draw <= i, sink, delay)
            .await;

        debug_assert_eq!(frame, *target);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingDelay, RecordingSink};
    use embassy_futures::block_on;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn run(seed: u64, current: PixelBuffer, target: PixelBuffer) -> (PixelBuffer, RecordingSink, RecordingDelay) {
        let mut sparkle = Sparkle::new(SmallRng::seed_from_u64(seed));
        let mut sink = RecordingSink::default();
        let mut delay = RecordingDelay::default();
        let last = block_on(sparkle.animate(&current, &target, &mut sink, &mut delay));
        (last, sink, delay)
    }

    #[test]
    fn test_frame_count_and_timing() {
        let (_, sink, delay) = run(1, PixelBuffer::full(), PixelBuffer::new());
        assert_eq!(sink.frames.len(), FRAMES);
        assert_eq!(delay.delays_ms.len(), FRAMES);
        assert!(delay.delays_ms.iter().all(|&ms| ms == 41));
    }

    #[test]
    fn test_fade_out_ends_dark() {
        let (_, sink, _) = run(7, PixelBuffer::full(), PixelBuffer::full());
        // Halfway through every source pixel is off
        assert!(sink.frames[LOOPS as usize - 1].is_blank());
        assert_eq!(sink.frames[FRAMES - 1], PixelBuffer::full());
    }

    #[test]
    fn test_same_seed_same_frames() {
        let current = PixelBuffer::from_rows([0xF0, 0x0F, 0, 0, 0xAA, 0x55, 0, 0xFF]);
        let target = PixelBuffer::from_rows([0, 0xFF, 0x18, 0x18, 0, 0, 0x81, 0]);
        let (_, a, _) = run(42, current, target);
        let (_, b, _) = run(42, current, target);
        assert_eq!(a.frames, b.frames);
    }

    fn replay_half(
        rng: &mut SmallRng,
        from: PixelBuffer,
        mut pixels: heapless::Vec<u8, PIXEL_COUNT>,
        lit: fn(u8, u8) -> bool,
    ) -> Vec<PixelBuffer> {
        let mut frame = from;
        (0..LOOPS)
            .map(|i| {
                pixels.shuffle(rng);
                for &idx in pixels.iter() {
                    frame.set_index(idx, lit(rng.gen_range(0..LOOPS), i));
                }
                frame
            })
            .collect()
    }

    #[test]
    fn test_fade_out_shuffles_once_before_loops() {
        let current = PixelBuffer::from_rows([0xF0, 0x0F, 0, 0x3C, 0xAA, 0x55, 0, 0xFF]);
        let (_, sink, _) = run(5, current, PixelBuffer::new());

        let mut rng = SmallRng::seed_from_u64(5);
        let mut outgoing = current.lit_pixels();
        outgoing.shuffle(&mut rng);
        let expected = replay_half(&mut rng, current, outgoing, |draw, i| draw > i);
        assert_eq!(&sink.frames[..LOOPS as usize], &expected[..]);
    }

    #[test]
    fn test_reveal_has_no_leading_shuffle() {
        // Blank source: the fade-out draws nothing from the rng
        let target = PixelBuffer::from_rows([0, 0xFF, 0x18, 0x18, 0, 0x42, 0x81, 0]);
        let (_, sink, _) = run(11, PixelBuffer::new(), target);

        let mut rng = SmallRng::seed_from_u64(11);
        let expected = replay_half(&mut rng, PixelBuffer::new(), target.lit_pixels(), |draw, i| draw <= i);
        assert_eq!(&sink.frames[LOOPS as usize..], &expected[..]);
    }

    #[test]
    fn test_blank_to_blank() {
        let (last, sink, _) = run(3, PixelBuffer::new(), PixelBuffer::new());
        assert!(last.is_blank());
        assert!(sink.frames.iter().all(PixelBuffer::is_blank));
    }

    #[test]
    fn test_into_inner() {
        let sparkle = Sparkle::new(SmallRng::seed_from_u64(9));
        let mut rng = sparkle.into_inner();
        let mut fresh = SmallRng::seed_from_u64(9);
        assert_eq!(rng.next_u32(), fresh.next_u32());
    }

    proptest! {
        #[test]
        fn converges_on_target(seed in any::<u64>(), current in any::<[u8; 8]>(), target in any::<[u8; 8]>()) {
            let current = PixelBuffer::from_rows(current);
            let target = PixelBuffer::from_rows(target);
            let (last, sink, _) = run(seed, current, target);
            prop_assert_eq!(last, target);
            prop_assert_eq!(sink.frames[FRAMES - 1], target);
        }

        #[test]
        fn only_touches_source_and_target_pixels(seed in any::<u64>(), current in any::<[u8; 8]>(), target in any::<[u8; 8]>()) {
            let current = PixelBuffer::from_rows(current);
            let target = PixelBuffer::from_rows(target);
            let mut either = current;
            either.merge(&target);
            let (_, sink, _) = run(seed, current, target);
            for frame in &sink.frames {
                let mut combined = *frame;
                combined.merge(&either);
                prop_assert_eq!(combined, either);
            }
        }
    }
}
