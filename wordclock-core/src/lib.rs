//! Board-agnostic core logic for the word clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Glyph catalog for the 8x8 letter plate
//! - Pixel buffer and time-to-phrase composition
//! - Frame transitions (scroll-shift, sparkle)
//! - Checksummed settings persistence
//! - Clock controller and time-adjust state machine
//! - Hardware abstraction traits (frame sink, time source)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod compose;
pub mod config;
pub mod controller;
pub mod glyph;
pub mod pixels;
pub mod settings;
pub mod state;
pub mod time;
pub mod traits;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;

pub use compose::{compose, Phrase, Phrasing};
pub use config::{ClockConfig, TransitionKind, Wiring};
pub use controller::ClockController;
pub use glyph::GlyphId;
pub use pixels::PixelBuffer;
pub use settings::{Settings, SettingsStore};
pub use time::{DemoTime, WallTime};
pub use transition::{Animation, Transition};
