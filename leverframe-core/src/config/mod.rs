//! Configuration types
//!
//! The fixed hardware topology and the per-servo records persisted in
//! flash as a single fixed-layout blob.

pub mod hardware;
pub mod servo;
pub mod store;

pub use hardware::*;
pub use servo::*;
pub use store::*;
