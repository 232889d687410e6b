//! EEPROM emulation in flash
//!
//! The last 4 KiB sector of flash holds the settings area. Reads and writes
//! go to a RAM copy of the sector that is loaded on first use; `commit`
//! erases the sector and programs the RAM copy back.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use embedded_storage_async::nor_flash::{NorFlash, ReadNorFlash};
use wordclock_hal::storage::check_bounds;
use wordclock_hal::{NvStorage, StorageError};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const EEPROM_SIZE: usize = ERASE_SIZE;
pub const EEPROM_START: usize = FLASH_SIZE - EEPROM_SIZE;

/// RP2040 flash-backed EEPROM
pub struct FlashEeprom<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
    shadow: [u8; EEPROM_SIZE],
    loaded: bool,
    dirty: bool,
}

impl<'d> FlashEeprom<'d> {
    /// Create a new EEPROM instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
            shadow: [0xFF; EEPROM_SIZE],
            loaded: false,
            dirty: false,
        }
    }

    /// Check if there are writes not yet committed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    async fn ensure_loaded(&mut self) -> Result<(), StorageError> {
        if !self.loaded {
            ReadNorFlash::read(&mut self.flash, EEPROM_START as u32, &mut self.shadow)
                .await
                .map_err(|_| StorageError::Flash)?;
            self.loaded = true;
        }
        Ok(())
    }
}

impl<'d> NvStorage for FlashEeprom<'d> {
    fn capacity(&self) -> usize {
        EEPROM_SIZE
    }

    async fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        check_bounds(EEPROM_SIZE, offset, buffer.len())?;
        self.ensure_loaded().await?;
        buffer.copy_from_slice(&self.shadow[offset..offset + buffer.len()]);
        Ok(())
    }

    async fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        check_bounds(EEPROM_SIZE, offset, data.len())?;
        self.ensure_loaded().await?;
        let target = &mut self.shadow[offset..offset + data.len()];
        if target != data {
            target.copy_from_slice(data);
            self.dirty = true;
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StorageError> {
        if !self.dirty {
            return Ok(());
        }

        let start = EEPROM_START as u32;
        let end = FLASH_SIZE as u32;
        NorFlash::erase(&mut self.flash, start, end)
            .await
            .map_err(|_| StorageError::Flash)?;
        NorFlash::write(&mut self.flash, start, &self.shadow)
            .await
            .map_err(|_| StorageError::Flash)?;

        self.dirty = false;
        Ok(())
    }
}
