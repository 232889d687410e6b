//! Clock mode state machine
//!
//! The clock is either showing the time or letting the user set it. The
//! single button drives every transition.

pub mod events;
pub mod machine;

pub use events::{Command, Event};
pub use machine::Mode;
