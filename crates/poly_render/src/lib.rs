//! Draw buffers and model transforms for polytope compounds
//!
//! This crate turns a partitioned [`poly_core::Compound`] into the flat
//! arrays a rendering front end uploads (positions, per-group colors and
//! per-primitive index lists) and computes the per-frame spin transform.
//! It does not talk to any graphics API.
//!
//! ## Modules
//!
//! - [`buffer`] - [`GeometryBuffer`] and its draw groups
//! - [`layers`] - [`DrawLayers`] selecting which primitive layers are built
//! - [`types`] - Pod vertex layout and primitive kinds
//! - [`animation`] - [`SpinAnimation`] model matrix

pub mod animation;
pub mod buffer;
pub mod layers;
pub mod types;

pub use animation::{SpinAnimation, SpinState};
pub use buffer::{BufferError, BufferOptions, DrawGroup, GeometryBuffer};
pub use layers::DrawLayers;
pub use types::{ColoredVertex, Primitive};
