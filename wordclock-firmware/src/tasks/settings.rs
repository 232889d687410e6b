//! Settings task
//!
//! Sole owner of the settings store. Loads the record at startup, then
//! applies configuration updates one at a time and publishes the result.

use defmt::*;
use wordclock_core::settings::{render_json, LoadOutcome, SettingsStore};
use wordclock_hal_rp2040::FlashEeprom;

use crate::channels::{SETTINGS, SETTINGS_UPDATES};

/// Settings task - single writer for the persisted settings
#[embassy_executor::task]
pub async fn settings_task(mut store: SettingsStore<FlashEeprom<'static>>) {
    info!("Settings task started");

    match store.load().await {
        LoadOutcome::Restored => info!("Settings restored"),
        LoadOutcome::Defaulted => warn!("Settings defaulted"),
    }
    SETTINGS.signal(store.settings().clone());

    loop {
        let update = SETTINGS_UPDATES.receive().await;
        debug!("Settings update: {}", update);

        match store.apply(&update).await {
            Ok(()) => info!("Settings saved: {}", render_json(store.settings()).as_str()),
            Err(e) => error!("Failed to save settings: {}", e),
        }
        SETTINGS.signal(store.settings().clone());
    }
}
