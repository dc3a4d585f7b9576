//! Application systems
//!
//! Startup builds the compound once; preview drives the spin animation.

mod preview;
mod startup;

pub use preview::PreviewSystem;
pub use startup::{StartupError, StartupOutput, StartupSystem};
