//! Persistent storage abstractions
//!
//! The servo configuration lives in a flat, byte-addressable block that is
//! read once at boot and rewritten whole after every edit. Blank storage
//! reads back as [`ERASED_BYTE`], which the configuration layer relies on
//! to recognise servos that were never configured.

/// Value every byte of freshly erased storage reads back as
pub const ERASED_BYTE: u8 = 0xFF;

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Flash/EEPROM operation failed
    Flash,
    /// Access beyond the end of the storage region
    OutOfBounds,
}

/// Flat byte-addressable persistent storage
///
/// Offsets are relative to the start of the region reserved for the
/// configuration. Implementations backed by NOR flash must erase before
/// writing; callers always write the whole configuration in one call.
pub trait ConfigStorage {
    /// Size of the storage region in bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` starting at `offset`
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError>;
}

/// RAM-backed storage
///
/// Starts out erased. Useful on the host and for boards without
/// non-volatile memory (configuration is then lost at power-off).
#[derive(Debug, Clone)]
pub struct RamStorage<const N: usize> {
    bytes: [u8; N],
    writes: u32,
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamStorage<N> {
    /// Create erased storage
    pub const fn new() -> Self {
        Self {
            bytes: [ERASED_BYTE; N],
            writes: 0,
        }
    }

    /// Create storage pre-filled with `bytes`
    pub const fn with_contents(bytes: [u8; N]) -> Self {
        Self { bytes, writes: 0 }
    }

    /// Raw contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of successful write calls
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    fn range(offset: usize, len: usize) -> Result<core::ops::Range<usize>, StorageError> {
        let end = offset.checked_add(len).ok_or(StorageError::OutOfBounds)?;
        if end > N {
            return Err(StorageError::OutOfBounds);
        }
        Ok(offset..end)
    }
}

impl<const N: usize> ConfigStorage for RamStorage<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        let range = Self::range(offset, buffer.len())?;
        buffer.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        let range = Self::range(offset, data.len())?;
        self.bytes[range].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_storage_starts_erased() {
        let mut storage = RamStorage::<32>::new();
        let mut buf = [0u8; 32];
        storage.read(0, &mut buf).unwrap();
        assert!(buf.iter().all(|&b| b == ERASED_BYTE));
        assert_eq!(storage.capacity(), 32);
    }

    #[test]
    fn test_ram_storage_write_then_read() {
        let mut storage = RamStorage::<16>::new();
        storage.write(4, &[1, 2, 3]).unwrap();

        let mut buf = [0u8; 5];
        storage.read(3, &mut buf).unwrap();
        assert_eq!(buf, [0xFF, 1, 2, 3, 0xFF]);
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_ram_storage_bounds() {
        let mut storage = RamStorage::<8>::new();
        let mut buf = [0u8; 4];

        assert_eq!(storage.read(6, &mut buf), Err(StorageError::OutOfBounds));
        assert_eq!(storage.write(5, &[0; 4]), Err(StorageError::OutOfBounds));
        assert_eq!(storage.write(usize::MAX, &[0]), Err(StorageError::OutOfBounds));
        assert_eq!(storage.write_count(), 0);

        // Exactly at the end is fine
        storage.write(4, &[0; 4]).unwrap();
    }
}
