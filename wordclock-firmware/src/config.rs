//! Build-time clock configuration
//!
//! The constants are generated by build.rs from `clock.toml`.

use wordclock_core::config::{ClockConfig, TransitionKind, Wiring};
use wordclock_core::Phrasing;

include!(concat!(env!("OUT_DIR"), "/clock_config.rs"));

/// Assemble the clock configuration
pub fn clock_config() -> ClockConfig {
    ClockConfig {
        phrasing: Phrasing {
            half_to_enabled: HALF_TO_ENABLED,
        },
        transition: TRANSITION,
        scroll_speed_ms: SCROLL_SPEED_MS,
        poll_interval_ms: POLL_INTERVAL_MS,
        boot_hold_ms: BOOT_HOLD_MS,
        wiring: Wiring {
            reverse_bits: REVERSE_BITS,
            reverse_rows: REVERSE_ROWS,
        },
    }
}
