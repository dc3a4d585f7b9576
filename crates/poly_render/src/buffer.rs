//! Flat draw buffers for a partitioned compound
//!
//! A [`GeometryBuffer`] holds one shared position array and a list of draw
//! groups. Each group carries its own index list and a color array that
//! broadcasts the group's color to every position, so a front end can bind
//! positions once and swap color/index arrays per draw call.

use std::collections::BTreeSet;
use std::fmt;

use poly_core::{Compound, Edge, Rgba8};

use crate::layers::DrawLayers;
use crate::types::{ColoredVertex, Primitive};

/// Settings for [`GeometryBuffer::build`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BufferOptions {
    /// Uniform factor applied to positions
    pub scale: f32,
    /// Which layers get draw groups
    pub layers: DrawLayers,
    /// Merged wireframe color (per-group wireframes use the group color)
    pub edge_color: Rgba8,
    pub hull_color: Rgba8,
    pub point_color: Rgba8,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            layers: DrawLayers::default(),
            edge_color: Rgba8::WHITE,
            hull_color: Rgba8::SILVER,
            point_color: Rgba8::BLACK,
        }
    }
}

impl BufferOptions {
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_layers(mut self, layers: DrawLayers) -> Self {
        self.layers = layers;
        self
    }
}

/// One draw call's worth of indices and colors
#[derive(Clone, Debug, PartialEq)]
pub struct DrawGroup {
    pub name: String,
    pub primitive: Primitive,
    pub color: Rgba8,
    /// RGBA per position, length `4 * vertex_count`
    pub colors: Vec<u8>,
    pub indices: Vec<u32>,
}

impl DrawGroup {
    fn new(name: impl Into<String>, primitive: Primitive, color: Rgba8, vertex_count: usize) -> Self {
        Self {
            name: name.into(),
            primitive,
            color,
            colors: color.to_bytes().repeat(vertex_count),
            indices: Vec::new(),
        }
    }

    fn with_edges(mut self, edges: &[Edge]) -> Self {
        self.indices = edges
            .iter()
            .flat_map(|e| [e.0 as u32, e.1 as u32])
            .collect();
        self
    }

    /// Number of primitives (triangles, lines or points)
    pub fn primitive_count(&self) -> usize {
        self.indices.len() / self.primitive.arity()
    }
}

/// Render-agnostic geometry for one compound
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryBuffer {
    /// Scaled positions, stride 3
    pub positions: Vec<f32>,
    pub groups: Vec<DrawGroup>,
}

impl GeometryBuffer {
    /// Flatten a compound into draw groups
    ///
    /// Group order is faces (table order), wireframes, hull, points.
    pub fn build(compound: &Compound, options: &BufferOptions) -> Result<Self, BufferError> {
        if !options.scale.is_finite() || options.scale <= 0.0 {
            return Err(BufferError::InvalidScale(options.scale));
        }

        let scale = options.scale as f64;
        let positions: Vec<f32> = compound
            .vertices()
            .vertices()
            .iter()
            .flat_map(|&v| (v * scale).to_f32())
            .collect();
        let n = compound.vertices().len();
        let mut groups = Vec::new();

        if options.layers.contains(DrawLayers::FACES) {
            for group in compound.groups() {
                let mut draw = DrawGroup::new(&group.name, Primitive::Triangles, group.color, n);
                draw.indices = group.triangles.iter().flatten().copied().collect();
                groups.push(draw);
            }
        }

        if options.layers.contains(DrawLayers::EDGES) {
            for (owner, edges) in compound.wireframes() {
                let draw = match owner {
                    Some(group) => DrawGroup::new(
                        format!("{} edges", group.name),
                        Primitive::Lines,
                        group.color,
                        n,
                    ),
                    None => DrawGroup::new("edges", Primitive::Lines, options.edge_color, n),
                };
                groups.push(draw.with_edges(edges));
            }
        }

        if options.layers.contains(DrawLayers::HULL) && !compound.hull_edges().is_empty() {
            groups.push(
                DrawGroup::new("hull", Primitive::Lines, options.hull_color, n)
                    .with_edges(compound.hull_edges()),
            );
        }

        if options.layers.contains(DrawLayers::POINTS) {
            let mut draw = DrawGroup::new("points", Primitive::Points, options.point_color, n);
            draw.indices = (0..n as u32).collect();
            groups.push(draw);
        }

        let buffer = Self { positions, groups };
        buffer.validate()?;

        log::debug!(
            "Built {} draw groups over {} vertices for '{}' ({} triangles, {} lines)",
            buffer.groups.len(),
            buffer.vertex_count(),
            compound.name(),
            buffer.indices_for(Primitive::Triangles).len() / 3,
            buffer.indices_for(Primitive::Lines).len() / 2
        );
        Ok(buffer)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Position `i` as a triple
    pub fn position(&self, i: usize) -> Option<[f32; 3]> {
        self.positions
            .get(3 * i..3 * i + 3)
            .map(|p| [p[0], p[1], p[2]])
    }

    pub fn group(&self, name: &str) -> Option<&DrawGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Groups of one primitive type, in draw order
    pub fn groups_of(&self, primitive: Primitive) -> impl Iterator<Item = &DrawGroup> + '_ {
        self.groups.iter().filter(move |g| g.primitive == primitive)
    }

    /// All indices of one primitive type, concatenated in draw order
    pub fn indices_for(&self, primitive: Primitive) -> Vec<u32> {
        self.groups_of(primitive)
            .flat_map(|g| g.indices.iter().copied())
            .collect()
    }

    /// Positions zipped with a group's colors
    pub fn interleaved(&self, group: &DrawGroup) -> Vec<ColoredVertex> {
        self.positions
            .chunks_exact(3)
            .zip(group.colors.chunks_exact(4))
            .map(|(p, c)| ColoredVertex::new([p[0], p[1], p[2]], [c[0], c[1], c[2], c[3]]))
            .collect()
    }

    /// Check every group against the position array
    ///
    /// Line groups must also be free of repeated undirected edges.
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.positions.len() % 3 != 0 {
            return Err(BufferError::PositionStride(self.positions.len()));
        }
        let n = self.vertex_count();

        for group in &self.groups {
            if group.colors.len() != 4 * n {
                return Err(BufferError::ColorLength {
                    group: group.name.clone(),
                    expected: 4 * n,
                    actual: group.colors.len(),
                });
            }

            if group.indices.len() % group.primitive.arity() != 0 {
                return Err(BufferError::IndexArity {
                    group: group.name.clone(),
                    primitive: group.primitive,
                    len: group.indices.len(),
                });
            }

            if let Some(&index) = group.indices.iter().find(|&&i| i as usize >= n) {
                return Err(BufferError::IndexOutOfBounds {
                    group: group.name.clone(),
                    index,
                    vertex_count: n,
                });
            }

            if group.primitive == Primitive::Lines {
                let mut seen = BTreeSet::new();
                for pair in group.indices.chunks_exact(2) {
                    let (a, b) = (pair[0].min(pair[1]), pair[0].max(pair[1]));
                    if !seen.insert((a, b)) {
                        return Err(BufferError::DuplicateLine {
                            group: group.name.clone(),
                            a,
                            b,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Inconsistent draw buffer
#[derive(Debug, Clone, PartialEq)]
pub enum BufferError {
    /// Scale factor is zero, negative or not finite
    InvalidScale(f32),
    /// Position array length is not a multiple of 3
    PositionStride(usize),
    /// An index exceeds the position array
    IndexOutOfBounds {
        group: String,
        index: u32,
        vertex_count: usize,
    },
    /// A color array does not cover every position
    ColorLength {
        group: String,
        expected: usize,
        actual: usize,
    },
    /// Index count is not a multiple of the primitive size
    IndexArity {
        group: String,
        primitive: Primitive,
        len: usize,
    },
    /// A line group repeats an undirected edge
    DuplicateLine { group: String, a: u32, b: u32 },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InvalidScale(s) => write!(f, "Invalid scale factor: {}", s),
            BufferError::PositionStride(len) => {
                write!(f, "Position array length {} is not a multiple of 3", len)
            }
            BufferError::IndexOutOfBounds { group, index, vertex_count } => write!(
                f,
                "Group '{}' index {} out of bounds ({} vertices)",
                group, index, vertex_count
            ),
            BufferError::ColorLength { group, expected, actual } => write!(
                f,
                "Group '{}' has {} color bytes, expected {}",
                group, actual, expected
            ),
            BufferError::IndexArity { group, primitive, len } => write!(
                f,
                "Group '{}' has {} indices, not a whole number of {}",
                group,
                len,
                primitive.name()
            ),
            BufferError::DuplicateLine { group, a, b } => {
                write!(f, "Group '{}' draws line {}-{} twice", group, a, b)
            }
        }
    }
}

impl std::error::Error for BufferError {}
