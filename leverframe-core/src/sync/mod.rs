//! Switch-to-servo synchronization

pub mod controller;

pub use controller::{SyncAction, SyncController, SyncEvent};
