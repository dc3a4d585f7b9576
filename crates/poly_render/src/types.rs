//! Vertex layouts handed to the rendering front end
//!
//! All types derive Pod and Zeroable so they can be cast to bytes with
//! `bytemuck::cast_slice` and uploaded unchanged.

use bytemuck::{Pod, Zeroable};

/// A position with an 8-bit RGBA color
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex {
    /// Position in model space (x, y, z)
    pub position: [f32; 3],
    /// RGBA color, one byte per channel
    pub color: [u8; 4],
}

impl ColoredVertex {
    pub fn new(position: [f32; 3], color: [u8; 4]) -> Self {
        Self { position, color }
    }
}

/// The kind of primitive a draw group's indices describe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Index triples
    Triangles,
    /// Index pairs
    Lines,
    /// Single indices
    Points,
}

impl Primitive {
    /// Indices per primitive
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            Primitive::Triangles => 3,
            Primitive::Lines => 2,
            Primitive::Points => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Triangles => "triangles",
            Primitive::Lines => "lines",
            Primitive::Points => "points",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colored_vertex_size() {
        // 3 floats + 4 bytes, no padding
        assert_eq!(std::mem::size_of::<ColoredVertex>(), 16);
    }

    #[test]
    fn test_colored_vertex_bytes() {
        let v = ColoredVertex::new([1.0, 0.0, 0.0], [255, 127, 0, 255]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[12..], &[255, 127, 0, 255]);
    }

    #[test]
    fn test_primitive_arity() {
        assert_eq!(Primitive::Triangles.arity(), 3);
        assert_eq!(Primitive::Lines.arity(), 2);
        assert_eq!(Primitive::Points.arity(), 1);
    }
}
