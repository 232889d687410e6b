//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use wordclock_core::settings::{Settings, SettingsUpdate};
use wordclock_drivers::input::ButtonEvent;

/// Channel capacity for button events
const BUTTON_CHANNEL_SIZE: usize = 4;

/// Channel capacity for settings updates
const SETTINGS_CHANNEL_SIZE: usize = 2;

/// Button events; they queue up while a transition is running
pub static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Configuration updates for the settings task
///
/// Hook for the network side (HTTP config endpoint). No task in this
/// firmware sends on it yet; the settings task waits here after loading.
pub static SETTINGS_UPDATES: Channel<CriticalSectionRawMutex, SettingsUpdate, SETTINGS_CHANNEL_SIZE> =
    Channel::new();

/// Latest settings, published by the settings task after load and each save
///
/// Read by the network side (NTP client) once it exists; nothing here
/// consumes it.
pub static SETTINGS: Signal<CriticalSectionRawMutex, Settings> = Signal::new();
