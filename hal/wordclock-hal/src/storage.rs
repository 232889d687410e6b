//! Non-volatile storage abstractions
//!
//! Provides a byte-addressed storage trait modelled on an EEPROM: reads and
//! writes go to a working copy, and `commit` makes the written bytes durable.
//! Chip-specific HALs back this with flash (see `wordclock-hal-rp2040`).

/// Errors from non-volatile storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying flash operation failed
    Flash,
    /// Access outside the storage area
    OutOfBounds,
}

/// Byte-addressed non-volatile storage
///
/// Implementations should handle:
/// - Erase-before-write of the underlying medium
/// - Keeping reads consistent with uncommitted writes
pub trait NvStorage {
    /// Size of the storage area in bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    fn read(
        &mut self,
        offset: usize,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;

    /// Write `data` starting at `offset`
    ///
    /// The write is not guaranteed to survive a reset until [`commit`]
    /// returns.
    ///
    /// [`commit`]: NvStorage::commit
    fn write(
        &mut self,
        offset: usize,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;

    /// Force all pending writes to durable media
    fn commit(&mut self) -> impl core::future::Future<Output = Result<(), StorageError>>;
}

/// Check that `len` bytes at `offset` fit into `capacity`
pub fn check_bounds(capacity: usize, offset: usize, len: usize) -> Result<(), StorageError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(StorageError::OutOfBounds),
    }
}

/// RAM-backed storage
///
/// Keeps a working copy and a "media" copy; only [`NvStorage::commit`]
/// copies the working bytes to media. Used for host testing and for boards
/// without persistent storage.
#[derive(Debug, Clone)]
pub struct MemStorage<const N: usize> {
    working: [u8; N],
    media: [u8; N],
    commits: u32,
}

impl<const N: usize> Default for MemStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MemStorage<N> {
    /// Create erased storage (all bytes 0xFF)
    pub fn new() -> Self {
        Self {
            working: [0xFF; N],
            media: [0xFF; N],
            commits: 0,
        }
    }

    /// Number of successful commits
    pub fn commits(&self) -> u32 {
        self.commits
    }

    /// Committed bytes
    pub fn media(&self) -> &[u8; N] {
        &self.media
    }

    /// Mutable access to the committed bytes (e.g. to inject corruption)
    pub fn media_mut(&mut self) -> &mut [u8; N] {
        &mut self.media
    }

    /// Simulate a reset: uncommitted writes are lost
    pub fn power_cycle(&mut self) {
        self.working = self.media;
    }
}

impl<const N: usize> NvStorage for MemStorage<N> {
    fn capacity(&self) -> usize {
        N
    }

    async fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        check_bounds(N, offset, buffer.len())?;
        buffer.copy_from_slice(&self.working[offset..offset + buffer.len()]);
        Ok(())
    }

    async fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        check_bounds(N, offset, data.len())?;
        self.working[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StorageError> {
        self.media = self.working;
        self.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_bounds() {
        assert!(check_bounds(16, 0, 16).is_ok());
        assert!(check_bounds(16, 10, 6).is_ok());
        assert_eq!(check_bounds(16, 10, 7), Err(StorageError::OutOfBounds));
        assert_eq!(check_bounds(16, usize::MAX, 2), Err(StorageError::OutOfBounds));
    }

    #[test]
    fn test_error_kinds() {
        let kind = |e: StorageError| match e {
            StorageError::Flash => "flash",
            StorageError::OutOfBounds => "bounds",
        };
        assert_eq!(check_bounds(4, 4, 1).map_err(kind), Err("bounds"));
    }

    #[test]
    fn test_read_back_uncommitted() {
        let mut storage = MemStorage::<8>::new();
        block_on(storage.write(2, &[1, 2, 3])).unwrap();

        let mut buf = [0u8; 4];
        block_on(storage.read(1, &mut buf)).unwrap();
        assert_eq!(buf, [0xFF, 1, 2, 3]);
        assert_eq!(storage.commits(), 0);
    }

    #[test]
    fn test_power_cycle_drops_uncommitted() {
        let mut storage = MemStorage::<4>::new();
        block_on(storage.write(0, &[7])).unwrap();
        storage.power_cycle();

        let mut buf = [0u8; 1];
        block_on(storage.read(0, &mut buf)).unwrap();
        assert_eq!(buf, [0xFF]);

        block_on(storage.write(0, &[7])).unwrap();
        block_on(storage.commit()).unwrap();
        storage.power_cycle();
        block_on(storage.read(0, &mut buf)).unwrap();
        assert_eq!(buf, [7]);
        assert_eq!(storage.commits(), 1);
    }

    #[test]
    fn test_out_of_bounds_write() {
        let mut storage = MemStorage::<4>::new();
        assert_eq!(
            block_on(storage.write(3, &[0, 0])),
            Err(StorageError::OutOfBounds)
        );
    }
}
