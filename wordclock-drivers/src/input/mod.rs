//! User input decoding

pub mod button;

pub use button::{Button, ButtonDecoder, ButtonEvent};
