//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware fills these in from
//! constants generated at build time out of its `clock.toml`.

pub mod types;

pub use types::*;
