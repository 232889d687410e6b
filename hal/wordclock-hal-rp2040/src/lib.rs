//! RP2040-specific HAL for the word clock firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `wordclock-hal` and `wordclock-core` traits:
//!
//! - Flash-backed EEPROM emulation (implements `wordclock_hal::NvStorage`)
//! - On-chip RTC as the clock's time source
//! - Button input on an embassy GPIO

#![no_std]

pub mod eeprom;
pub mod gpio;
pub mod rtc;

pub use eeprom::FlashEeprom;
pub use gpio::RpInput;
pub use rtc::RtcClock;

// Re-export shared traits from wordclock-hal for convenience
pub use wordclock_hal::{NvStorage, StorageError};
