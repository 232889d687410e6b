//! Frame transitions
//!
//! A transition animates from the frame on screen to a new target frame,
//! emitting each intermediate frame to a [`FrameSink`] and pausing between
//! frames through an async [`DelayNs`]. The pause is the only suspension
//! point: the caller's task does nothing else until the transition returns,
//! and there is no cancellation.

pub mod scroll;
pub mod sparkle;

use core::future::Future;

use embedded_hal_async::delay::DelayNs;
use rand::RngCore;

use crate::config::TransitionKind;
use crate::pixels::PixelBuffer;
use crate::traits::FrameSink;

pub use scroll::ScrollShift;
pub use sparkle::Sparkle;

/// An animation strategy
pub trait Transition {
    /// Animate from `current` to `target`
    ///
    /// Returns the last frame shown, which equals `target`.
    fn animate<S: FrameSink, D: DelayNs>(
        &mut self,
        current: &PixelBuffer,
        target: &PixelBuffer,
        sink: &mut S,
        delay: &mut D,
    ) -> impl Future<Output = PixelBuffer>;
}

/// The transition chosen for a deployment
pub enum Animation<R> {
    Scroll(ScrollShift),
    Sparkle(Sparkle<R>),
}

impl<R: RngCore> Animation<R> {
    /// Build the configured transition
    ///
    /// `rng` is only used by the sparkle transition.
    pub fn new(kind: TransitionKind, scroll_speed_ms: u32, rng: R) -> Self {
        match kind {
            TransitionKind::Scroll => Animation::Scroll(ScrollShift::new(scroll_speed_ms)),
            TransitionKind::Sparkle => Animation::Sparkle(Sparkle::new(rng)),
        }
    }

    /// Which strategy this is
    pub fn kind(&self) -> TransitionKind {
        match self {
            Animation::Scroll(_) => TransitionKind::Scroll,
            Animation::Sparkle(_) => TransitionKind::Sparkle,
        }
    }
}

impl<R: RngCore> Transition for Animation<R> {
    async fn animate<S: FrameSink, D: DelayNs>(
        &mut self,
        current: &PixelBuffer,
        target: &PixelBuffer,
        sink: &mut S,
        delay: &mut D,
    ) -> PixelBuffer {
        match self {
            Animation::Scroll(t) => t.animate(current, target, sink, delay).await,
            Animation::Sparkle(t) => t.animate(current, target, sink, delay).await,
        }
    }
}
