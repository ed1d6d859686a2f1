//! Switch bank monitoring
//!
//! Edge detection over the board switch expanders.

pub mod monitor;

pub use monitor::{BoardSet, BoardState, SwitchEdge};
