//! Settings ownership and persistence

use core::fmt::Write;

use wordclock_hal::{NvStorage, StorageError};

use super::api::SettingsUpdate;
use super::record::{self, RECORD_LEN};
use super::Settings;

/// Longest summary: 99-byte server and an offset of `i32::MIN` minutes
pub const SUMMARY_LEN: usize = 131;

/// Where the record lives in the storage area
pub const RECORD_OFFSET: usize = 0;

/// Errors from saving settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// The storage area cannot hold the record
    TooSmall,
    /// Storage write or commit failed
    Storage(StorageError),
}

impl From<StorageError> for SettingsError {
    fn from(e: StorageError) -> Self {
        SettingsError::Storage(e)
    }
}

/// What [`SettingsStore::load`] found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadOutcome {
    /// A valid record was read
    Restored,
    /// The record was missing, corrupt or unreadable; defaults are in use
    Defaulted,
}

/// Owner of the settings and their storage
///
/// There is one store per device. Whoever holds it is the only writer.
pub struct SettingsStore<S> {
    storage: S,
    settings: Settings,
}

impl<S: NvStorage> SettingsStore<S> {
    /// Create a store holding defaults; call [`load`](Self::load) next
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            settings: Settings::default(),
        }
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access; call [`save`](Self::save) to persist changes
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Clamp and default the current values
    pub fn sanitize(&mut self) {
        self.settings.sanitize();
    }

    /// Read the persisted record
    ///
    /// A bad checksum or a failed read falls back to defaults. The result is
    /// always sanitized.
    pub async fn load(&mut self) -> LoadOutcome {
        let mut bytes = [0u8; RECORD_LEN];
        let read = self.storage.read(RECORD_OFFSET, &mut bytes).await;

        let outcome = match read.map(|()| record::decode(&bytes)) {
            Ok(Ok(settings)) => {
                self.settings = settings;
                LoadOutcome::Restored
            }
            Ok(Err(_e)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("invalid CRC of settings, using defaults: {}", _e);
                self.settings = Settings::new("", super::DEFAULT_UTC_OFFSET);
                LoadOutcome::Defaulted
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("settings read failed, using defaults: {}", _e);
                self.settings = Settings::new("", super::DEFAULT_UTC_OFFSET);
                LoadOutcome::Defaulted
            }
        };

        self.sanitize();
        self.print();
        outcome
    }

    /// Write the record with a fresh checksum and commit it
    pub async fn save(&mut self) -> Result<(), SettingsError> {
        if self.storage.capacity() < RECORD_OFFSET + RECORD_LEN {
            return Err(SettingsError::TooSmall);
        }
        let bytes = record::encode(&self.settings);
        self.storage.write(RECORD_OFFSET, &bytes).await?;
        self.storage.commit().await?;
        Ok(())
    }

    /// Apply a configuration update, sanitize and save
    pub async fn apply(&mut self, update: &SettingsUpdate) -> Result<(), SettingsError> {
        update.apply_to(&mut self.settings);
        self.sanitize();
        self.save().await
    }

    /// One-line description of the current values
    pub fn summary(&self) -> heapless::String<SUMMARY_LEN> {
        let mut out = heapless::String::new();
        let _ = write!(out, "{}", self.settings);
        out
    }

    /// Log the current values
    pub fn print(&self) {
        #[cfg(feature = "defmt")]
        defmt::info!("settings: {}", self.summary().as_str());
    }

    /// Release the storage handle
    pub fn into_storage(self) -> S {
        self.storage
    }
}
