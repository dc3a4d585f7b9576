//! Closed-form vertex sets of the host solids
//!
//! Every compound is expressed over the vertices of one regular solid. The
//! vertex order is fixed: decomposition tables refer to vertices by index, so
//! reordering a generator silently breaks every table built on it.

use std::ops::Index;

use poly_math::{golden_ratio, inverse_golden_ratio, inverse_golden_ratio_squared, Vec3};
use serde::{Deserialize, Serialize};

/// The regular solid whose vertices host a compound
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolidFamily {
    Dodecahedron,
    Icosahedron,
    Octahedron,
    Cube,
}

impl SolidFamily {
    pub const ALL: [SolidFamily; 4] = [
        SolidFamily::Dodecahedron,
        SolidFamily::Icosahedron,
        SolidFamily::Octahedron,
        SolidFamily::Cube,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolidFamily::Dodecahedron => "dodecahedron",
            SolidFamily::Icosahedron => "icosahedron",
            SolidFamily::Octahedron => "octahedron",
            SolidFamily::Cube => "cube",
        }
    }

    #[inline]
    pub fn vertex_count(self) -> usize {
        match self {
            SolidFamily::Dodecahedron => 20,
            SolidFamily::Icosahedron => 12,
            SolidFamily::Octahedron => 6,
            SolidFamily::Cube => 8,
        }
    }

    /// Divisor that maps the unscaled generator's distances onto the
    /// canonical class centers (cube edge = 1)
    ///
    /// The generators use ±1 coordinates, so raw cube edges are 2 long. The
    /// octahedron's unit vertices put its edge at √2, so it is normalized by
    /// √2 to make its edge 1 as well.
    #[inline]
    pub fn distance_scale(self) -> f64 {
        match self {
            SolidFamily::Octahedron => std::f64::consts::SQRT_2,
            _ => 2.0,
        }
    }

    /// Circumradius of the unscaled generator
    pub fn circumradius(self) -> f64 {
        match self {
            SolidFamily::Dodecahedron | SolidFamily::Cube => 3.0f64.sqrt(),
            SolidFamily::Icosahedron => {
                let g = golden_ratio();
                (1.0 + g * g).sqrt()
            }
            SolidFamily::Octahedron => 1.0,
        }
    }

    /// Generate this family's vertex set at unit scale
    pub fn generate(self) -> VertexSet {
        VertexSet::generate(self)
    }
}

/// An ordered vertex set for one solid family
///
/// Vertices are stored in double precision. `scale` records any uniform
/// scaling applied after generation so distances can still be normalized
/// against the canonical class centers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexSet {
    family: SolidFamily,
    vertices: Vec<Vec3>,
    scale: f64,
}

impl VertexSet {
    /// Generate the canonical vertex set of a family
    pub fn generate(family: SolidFamily) -> Self {
        let vertices = match family {
            SolidFamily::Dodecahedron => dodecahedron_vertices(),
            SolidFamily::Icosahedron => icosahedron_vertices(),
            SolidFamily::Octahedron => octahedron_vertices(),
            SolidFamily::Cube => cube_vertices(),
        };
        log::debug!("Generated {} vertices for the {}", vertices.len(), family.name());
        Self { family, vertices, scale: 1.0 }
    }

    /// Wrap an explicit vertex list
    ///
    /// Nothing is checked here; run a
    /// [`DistanceClassifier`](crate::DistanceClassifier) over the result to
    /// find out whether it actually has the family's symmetry.
    pub fn from_vertices(family: SolidFamily, vertices: Vec<Vec3>, scale: f64) -> Self {
        Self { family, vertices, scale }
    }

    /// A uniformly scaled copy
    ///
    /// A negative factor mirrors the set through the origin; distances and
    /// the circumradius use the factor's magnitude.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            family: self.family,
            vertices: self.vertices.iter().map(|&v| v * factor).collect(),
            scale: self.scale * factor,
        }
    }

    #[inline]
    pub fn family(&self) -> SolidFamily {
        self.family
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied()
    }

    /// Circumradius after scaling
    pub fn circumradius(&self) -> f64 {
        self.family.circumradius() * self.scale.abs()
    }

    /// Positions narrowed to `f32`, flattened `[x, y, z, x, y, z, ...]`
    pub fn to_f32_positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_f32()).collect()
    }
}

impl Index<usize> for VertexSet {
    type Output = Vec3;

    fn index(&self, index: usize) -> &Vec3 {
        &self.vertices[index]
    }
}

/// The eight corners of the cube `[-1, 1]³`
///
/// The order walks the bottom face (z = -1) counter-clockwise, then the top.
fn cube_vertices() -> Vec<Vec3> {
    vec![
        Vec3::new(-1.0, -1.0, -1.0), // 0
        Vec3::new(1.0, -1.0, -1.0),  // 1
        Vec3::new(1.0, 1.0, -1.0),   // 2
        Vec3::new(-1.0, 1.0, -1.0),  // 3
        Vec3::new(-1.0, -1.0, 1.0),  // 4
        Vec3::new(1.0, -1.0, 1.0),   // 5
        Vec3::new(1.0, 1.0, 1.0),    // 6
        Vec3::new(-1.0, 1.0, 1.0),   // 7
    ]
}

/// Regular dodecahedron: the cube corners plus twelve vertices on the
/// coordinate planes
///
/// With `a = 1 + h` and `b = 1 - h²`, the extra vertices are the cyclic
/// placements of `(0, ±a, ±b)`.
fn dodecahedron_vertices() -> Vec<Vec3> {
    let h = inverse_golden_ratio();
    let a = 1.0 + h;
    let b = 1.0 - inverse_golden_ratio_squared();

    let mut vertices = cube_vertices();
    vertices.extend_from_slice(&[
        // yz-plane
        Vec3::new(0.0, -a, -b), // 8
        Vec3::new(0.0, -a, b),  // 9
        Vec3::new(0.0, a, b),   // 10
        Vec3::new(0.0, a, -b),  // 11
        // xy-plane
        Vec3::new(-a, -b, 0.0), // 12
        Vec3::new(-a, b, 0.0),  // 13
        Vec3::new(a, b, 0.0),   // 14
        Vec3::new(a, -b, 0.0),  // 15
        // xz-plane
        Vec3::new(-b, 0.0, -a), // 16
        Vec3::new(-b, 0.0, a),  // 17
        Vec3::new(b, 0.0, a),   // 18
        Vec3::new(b, 0.0, -a),  // 19
    ]);
    vertices
}

/// Regular icosahedron: three mutually orthogonal golden rectangles
///
/// Indices 0-3 span the x = 0 rectangle, 4-7 the y = 0 rectangle and 8-11
/// the z = 0 rectangle, each walked around its perimeter.
fn icosahedron_vertices() -> Vec<Vec3> {
    let g = golden_ratio();
    vec![
        Vec3::new(0.0, -1.0, -g), // 0
        Vec3::new(0.0, -1.0, g),  // 1
        Vec3::new(0.0, 1.0, g),   // 2
        Vec3::new(0.0, 1.0, -g),  // 3
        Vec3::new(-g, 0.0, -1.0), // 4
        Vec3::new(g, 0.0, -1.0),  // 5
        Vec3::new(g, 0.0, 1.0),   // 6
        Vec3::new(-g, 0.0, 1.0),  // 7
        Vec3::new(-1.0, -g, 0.0), // 8
        Vec3::new(-1.0, g, 0.0),  // 9
        Vec3::new(1.0, g, 0.0),   // 10
        Vec3::new(1.0, -g, 0.0),  // 11
    ]
}

/// Regular octahedron on the unit axes: `+x +y +z -x -y -z`
///
/// Vertex `i` and `i + 3` are antipodal.
fn octahedron_vertices() -> Vec<Vec3> {
    vec![
        Vec3::X,
        Vec3::Y,
        Vec3::Z,
        -Vec3::X,
        -Vec3::Y,
        -Vec3::Z,
    ]
}
