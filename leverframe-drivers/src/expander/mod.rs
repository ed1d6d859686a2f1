//! Switch bank I/O expanders

pub mod mcp23017;

pub use mcp23017::Mcp23017;
