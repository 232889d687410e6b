//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod button;
pub mod clock;
pub mod settings;

pub use button::button_task;
pub use clock::{clock_task, Controller, Matrix};
pub use settings::settings_task;
