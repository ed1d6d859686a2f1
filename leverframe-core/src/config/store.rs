//! Configuration store
//!
//! Holds one [`ServoConfig`] per servo slot for the lifetime of the
//! firmware. The whole array is read from persistent storage at boot and
//! the whole array is written back after every change.

use leverframe_hal::{ConfigStorage, StorageError};

use super::hardware::{ServoIndex, SERVO_COUNT};
use super::servo::{ServoConfig, RECORD_SIZE};

/// Size of the persisted blob in bytes
pub const STORE_SIZE: usize = SERVO_COUNT * RECORD_SIZE;

/// Offset of the blob within the storage region
pub const STORE_OFFSET: usize = 0;

/// In-memory configuration of every servo slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    servos: [ServoConfig; SERVO_COUNT],
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::unconfigured()
    }
}

impl ConfigStore {
    /// A store where no servo is configured
    pub const fn unconfigured() -> Self {
        Self {
            servos: [ServoConfig::UNCONFIGURED; SERVO_COUNT],
        }
    }

    /// Decode a store from its persisted blob
    pub fn from_bytes(bytes: &[u8; STORE_SIZE]) -> Self {
        let mut store = Self::unconfigured();
        for (slot, chunk) in store
            .servos
            .iter_mut()
            .zip(bytes.chunks_exact(RECORD_SIZE))
        {
            let mut record = [0u8; RECORD_SIZE];
            record.copy_from_slice(chunk);
            *slot = ServoConfig::decode(&record);
        }
        store
    }

    /// Encode the store as its persisted blob
    pub fn to_bytes(&self) -> [u8; STORE_SIZE] {
        let mut bytes = [0u8; STORE_SIZE];
        for (chunk, servo) in bytes.chunks_exact_mut(RECORD_SIZE).zip(self.servos.iter()) {
            chunk.copy_from_slice(&servo.encode());
        }
        bytes
    }

    /// Read the store from persistent storage
    pub fn load<S: ConfigStorage>(storage: &mut S) -> Result<Self, StorageError> {
        let mut bytes = [0u8; STORE_SIZE];
        storage.read(STORE_OFFSET, &mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Read the store, treating any storage failure as blank storage
    pub fn load_or_unconfigured<S: ConfigStorage>(storage: &mut S) -> Self {
        Self::load(storage).unwrap_or_else(|_| Self::unconfigured())
    }

    /// Write the whole store back to persistent storage
    pub fn save<S: ConfigStorage>(&self, storage: &mut S) -> Result<(), StorageError> {
        storage.write(STORE_OFFSET, &self.to_bytes())
    }

    /// Configuration of one servo
    pub fn get(&self, servo: ServoIndex) -> &ServoConfig {
        &self.servos[servo.linear()]
    }

    /// Mutable configuration of one servo
    pub fn get_mut(&mut self, servo: ServoIndex) -> &mut ServoConfig {
        &mut self.servos[servo.linear()]
    }

    /// Number of servos with a motion profile
    pub fn configured_count(&self) -> usize {
        self.servos.iter().filter(|s| s.is_configured()).count()
    }

    /// Iterate over all slots with their index
    pub fn iter(&self) -> impl Iterator<Item = (ServoIndex, &ServoConfig)> {
        self.servos
            .iter()
            .enumerate()
            .filter_map(|(i, s)| ServoIndex::from_linear(i).map(|idx| (idx, s)))
    }
}
