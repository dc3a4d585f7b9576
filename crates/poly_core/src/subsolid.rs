//! Sub-solids: colored groups of polygonal faces over a shared vertex set

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::distance::DistanceClass;

/// An undirected edge, stored with the smaller index first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    /// Canonical edge between two vertices
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }

    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.0 == self.1
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// A polygon given by its vertex indices in boundary order
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self::new(vec![a, b, c])
    }

    pub fn quad(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self::new(vec![a, b, c, d])
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.indices.len()
    }

    /// Boundary edges, closing the loop back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| Edge::new(self.indices[i], self.indices[(i + 1) % n]))
    }

    /// Fan triangulation from the first vertex
    ///
    /// Valid for the convex polygons used here. Faces with fewer than three
    /// vertices produce no triangles.
    pub fn triangulate(&self) -> Vec<[usize; 3]> {
        if self.indices.len() < 3 {
            return Vec::new();
        }
        let first = self.indices[0];
        self.indices[1..]
            .windows(2)
            .map(|w| [first, w[0], w[1]])
            .collect()
    }

    /// Vertex indices sorted, for comparing faces regardless of winding
    pub fn key(&self) -> Vec<usize> {
        let mut key = self.indices.clone();
        key.sort_unstable();
        key
    }

    /// True if some vertex appears more than once
    pub fn has_repeated_vertex(&self) -> bool {
        let key = self.key();
        key.windows(2).any(|w| w[0] == w[1])
    }
}

impl From<[usize; 3]> for Face {
    fn from(t: [usize; 3]) -> Self {
        Self::new(t.to_vec())
    }
}

impl From<[usize; 4]> for Face {
    fn from(q: [usize; 4]) -> Self {
        Self::new(q.to_vec())
    }
}

impl From<[usize; 5]> for Face {
    fn from(p: [usize; 5]) -> Self {
        Self::new(p.to_vec())
    }
}

/// What kind of polyhedron or patch a group represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubSolidKind {
    /// Regular tetrahedron on four host vertices
    Tetrahedron,
    /// Cube on eight host vertices
    Cube,
    /// Pentagonal faces of the dodecahedron
    PentagonPatch,
    /// A single golden rectangle
    GoldenRectangle,
    /// Triangular faces of a host solid
    TrianglePatch,
}

impl SubSolidKind {
    pub fn name(self) -> &'static str {
        match self {
            SubSolidKind::Tetrahedron => "tetrahedron",
            SubSolidKind::Cube => "cube",
            SubSolidKind::PentagonPatch => "pentagon patch",
            SubSolidKind::GoldenRectangle => "golden rectangle",
            SubSolidKind::TrianglePatch => "triangle patch",
        }
    }

    /// Vertices per face
    pub fn face_arity(self) -> usize {
        match self {
            SubSolidKind::Tetrahedron | SubSolidKind::TrianglePatch => 3,
            SubSolidKind::Cube | SubSolidKind::GoldenRectangle => 4,
            SubSolidKind::PentagonPatch => 5,
        }
    }

    /// Fixed face count of a closed solid, `None` for patches
    pub fn faces_per_group(self) -> Option<usize> {
        match self {
            SubSolidKind::Tetrahedron => Some(4),
            SubSolidKind::Cube => Some(6),
            SubSolidKind::GoldenRectangle => Some(1),
            SubSolidKind::PentagonPatch | SubSolidKind::TrianglePatch => None,
        }
    }

    /// Distinct vertices a closed solid spans, `None` for patches
    pub fn vertex_count(self) -> Option<usize> {
        match self {
            SubSolidKind::Tetrahedron => Some(4),
            SubSolidKind::Cube => Some(8),
            SubSolidKind::GoldenRectangle => Some(4),
            SubSolidKind::PentagonPatch | SubSolidKind::TrianglePatch => None,
        }
    }

    /// Distance classes a face boundary edge may fall in
    pub fn edge_classes(self) -> &'static [DistanceClass] {
        match self {
            SubSolidKind::Tetrahedron => &[DistanceClass::Square],
            SubSolidKind::Cube | SubSolidKind::TrianglePatch => &[DistanceClass::Adjacent],
            SubSolidKind::PentagonPatch => &[DistanceClass::Minor],
            SubSolidKind::GoldenRectangle => &[DistanceClass::Adjacent, DistanceClass::Golden],
        }
    }

    /// Closed solids can be told apart by vertex set alone
    pub fn is_closed(self) -> bool {
        matches!(self, SubSolidKind::Tetrahedron | SubSolidKind::Cube)
    }
}

/// Handedness of a chiral sub-solid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chirality {
    #[default]
    Achiral,
    Right,
    Left,
}

impl Chirality {
    pub fn name(self) -> &'static str {
        match self {
            Chirality::Achiral => "achiral",
            Chirality::Right => "right-handed",
            Chirality::Left => "left-handed",
        }
    }
}

/// A named, colored group of faces
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubSolid {
    pub name: String,
    pub kind: SubSolidKind,
    #[serde(default)]
    pub chirality: Chirality,
    pub color: Rgba8,
    pub faces: Vec<Face>,
}

impl SubSolid {
    pub fn new(name: impl Into<String>, kind: SubSolidKind, color: Rgba8) -> Self {
        Self {
            name: name.into(),
            kind,
            chirality: Chirality::Achiral,
            color,
            faces: Vec::new(),
        }
    }

    pub fn with_chirality(mut self, chirality: Chirality) -> Self {
        self.chirality = chirality;
        self
    }

    pub fn with_face(mut self, face: impl Into<Face>) -> Self {
        self.faces.push(face.into());
        self
    }

    pub fn with_faces<F: Into<Face>>(mut self, faces: impl IntoIterator<Item = F>) -> Self {
        self.faces.extend(faces.into_iter().map(Into::into));
        self
    }

    /// Distinct vertex indices used by any face
    pub fn vertex_indices(&self) -> BTreeSet<usize> {
        self.faces.iter().flat_map(|f| f.indices.iter().copied()).collect()
    }

    /// Distinct boundary edges across all faces
    pub fn edges(&self) -> BTreeSet<Edge> {
        self.faces.iter().flat_map(|f| f.edges()).collect()
    }

    /// Fan triangulation of every face, in face order
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.faces.iter().flat_map(|f| f.triangulate()).collect()
    }
}
