//! Servo motion
//!
//! Per-profile motion planning and blocking playback on a servo bank.

pub mod executor;
pub mod profile;

pub use executor::MotionExecutor;
pub use profile::{plan, sweep_angles, toward_limit2, MotionPlan, Phase};
