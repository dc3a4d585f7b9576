//! Polycompound - golden-ratio polyhedral compounds
//!
//! Library surface of the `polycompound` binary, exposed for integration
//! tests.

pub mod config;
pub mod systems;
