//! Polytope Mathematics Library
//!
//! This crate provides the small linear-algebra toolkit used by the
//! polycompound kernel.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector in double precision
//! - [`Plane3`] - Oriented plane with unit normal, for coplanarity tests
//! - [`Mat4`] - 4x4 column-major matrix for model transforms
//!
//! ## Constants
//!
//! - [`golden`] - The golden ratio and its reciprocal, from which every
//!   coordinate and distance class is derived

mod vec3;
mod plane;
pub mod mat4;
pub mod golden;

pub use vec3::Vec3;
pub use plane::Plane3;
pub use mat4::Mat4;
pub use golden::{golden_ratio, inverse_golden_ratio, inverse_golden_ratio_squared};
