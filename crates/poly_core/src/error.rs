//! Kernel error types
//!
//! Both error families describe defects in the closed-form geometry or the
//! static decomposition tables. They are raised once, during
//! initialization, and are never recovered from.

use std::fmt;

use crate::distance::DistanceClass;
use crate::solid::SolidFamily;
use crate::subsolid::{Chirality, Edge};

/// A generated vertex set violates its expected symmetry
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionError {
    /// The set does not have the fixed vertex count of its family
    VertexCount {
        family: SolidFamily,
        expected: usize,
        actual: usize,
    },
    /// A reference vertex index is outside the set
    ReferenceOutOfRange { index: usize, vertex_count: usize },
    /// A vertex is not on the circumscribing sphere
    OffSphere { vertex: usize, radius: f64, expected: f64 },
    /// A pair's normalized distance fell outside every class window
    UnclassifiedPair { a: usize, b: usize, distance: f64 },
    /// A vertex has the wrong number of neighbours in some class
    ProfileMismatch {
        vertex: usize,
        class: DistanceClass,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::VertexCount { family, expected, actual } => write!(
                f,
                "{} vertex set has {} vertices, expected {}",
                family.name(),
                actual,
                expected
            ),
            ConstructionError::ReferenceOutOfRange { index, vertex_count } => write!(
                f,
                "Reference vertex {} out of range ({} vertices)",
                index, vertex_count
            ),
            ConstructionError::OffSphere { vertex, radius, expected } => write!(
                f,
                "Vertex {} at radius {} is off the circumscribing sphere (expected {})",
                vertex, radius, expected
            ),
            ConstructionError::UnclassifiedPair { a, b, distance } => write!(
                f,
                "Vertex pair ({}, {}) has unclassified normalized distance {}",
                a, b, distance
            ),
            ConstructionError::ProfileMismatch { vertex, class, expected, actual } => write!(
                f,
                "Vertex {} has {} '{}' neighbours, expected {}",
                vertex,
                actual,
                class.name(),
                expected
            ),
        }
    }
}

impl std::error::Error for ConstructionError {}

/// A decomposition table is inconsistent with its vertex set
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionError {
    /// Table declares no groups
    EmptyTable,
    /// Table was written for a different solid family
    FamilyMismatch {
        table: SolidFamily,
        vertices: SolidFamily,
    },
    /// Two groups share a name
    DuplicateGroupName(String),
    /// Two groups drawn in the same pass share a color
    DuplicateColor { first: String, second: String },
    /// A face references a vertex outside the set
    IndexOutOfRange {
        group: String,
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    /// A face has the wrong number of vertices for its group kind
    FaceArity {
        group: String,
        face: usize,
        expected: usize,
        actual: usize,
    },
    /// A face repeats a vertex
    DegenerateFace { group: String, face: usize },
    /// A polygon's vertices do not share one plane
    FaceNotPlanar { group: String, face: usize },
    /// The same face appears twice in the compound
    DuplicateFace { group: String, face: usize },
    /// A group has the wrong number of faces for its kind
    FaceCount {
        group: String,
        expected: usize,
        actual: usize,
    },
    /// A group spans the wrong number of distinct vertices for its kind
    VertexCount {
        group: String,
        expected: usize,
        actual: usize,
    },
    /// The compound's total face count does not match the table
    TotalFaceCount { expected: usize, actual: usize },
    /// A face edge joins vertices outside the kind's distance classes
    EdgeClassMismatch {
        group: String,
        edge: Edge,
        class: DistanceClass,
    },
    /// Two sub-solids span exactly the same vertices
    DuplicateSolid { first: String, second: String },
    /// A pairing names a face that no group of that chirality declares
    UnresolvedPairingFace {
        chirality: Chirality,
        face: Vec<usize>,
    },
    /// A declared pairing's faces do not share a supporting plane
    NonCoplanarPairing {
        right_group: String,
        left_group: String,
        right: Vec<usize>,
        left: Vec<usize>,
    },
    /// Number of declared pairings differs from the number of chiral faces
    PairingCount { expected: usize, actual: usize },
    /// A chiral face has no declared partner
    FaceNotPaired { group: String, face: usize },
    /// A chiral face appears in more than one pairing
    FacePairedTwice { group: String, face: usize },
    /// An undirected edge was emitted twice in one line buffer
    DuplicateEdge(Edge),
    /// A hull edge is out of range or not of the table's hull class
    HullEdgeMismatch { edge: Edge, class: Option<DistanceClass> },
}

impl PartitionError {
    /// Name of the offending group, when the error is tied to one
    pub fn group(&self) -> Option<&str> {
        match self {
            PartitionError::IndexOutOfRange { group, .. }
            | PartitionError::FaceArity { group, .. }
            | PartitionError::DegenerateFace { group, .. }
            | PartitionError::FaceNotPlanar { group, .. }
            | PartitionError::DuplicateFace { group, .. }
            | PartitionError::FaceCount { group, .. }
            | PartitionError::VertexCount { group, .. }
            | PartitionError::EdgeClassMismatch { group, .. }
            | PartitionError::FaceNotPaired { group, .. }
            | PartitionError::FacePairedTwice { group, .. } => Some(group),
            PartitionError::DuplicateGroupName(group) => Some(group),
            PartitionError::DuplicateColor { second, .. }
            | PartitionError::DuplicateSolid { second, .. } => Some(second),
            PartitionError::NonCoplanarPairing { right_group, .. } => Some(right_group),
            _ => None,
        }
    }
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionError::EmptyTable => write!(f, "Compound table has no groups"),
            PartitionError::FamilyMismatch { table, vertices } => write!(
                f,
                "Table is for the {} but the vertex set is a {}",
                table.name(),
                vertices.name()
            ),
            PartitionError::DuplicateGroupName(name) => {
                write!(f, "Duplicate group name: '{}'", name)
            }
            PartitionError::DuplicateColor { first, second } => write!(
                f,
                "Groups '{}' and '{}' share a color",
                first, second
            ),
            PartitionError::IndexOutOfRange { group, face, index, vertex_count } => write!(
                f,
                "Group '{}' face {} references vertex {} (only {} vertices)",
                group, face, index, vertex_count
            ),
            PartitionError::FaceArity { group, face, expected, actual } => write!(
                f,
                "Group '{}' face {} has {} vertices, expected {}",
                group, face, actual, expected
            ),
            PartitionError::DegenerateFace { group, face } => {
                write!(f, "Group '{}' face {} repeats a vertex", group, face)
            }
            PartitionError::FaceNotPlanar { group, face } => {
                write!(f, "Group '{}' face {} is not planar", group, face)
            }
            PartitionError::DuplicateFace { group, face } => write!(
                f,
                "Group '{}' face {} duplicates an earlier face",
                group, face
            ),
            PartitionError::FaceCount { group, expected, actual } => write!(
                f,
                "Group '{}' has {} faces, expected {}",
                group, actual, expected
            ),
            PartitionError::VertexCount { group, expected, actual } => write!(
                f,
                "Group '{}' spans {} vertices, expected {}",
                group, actual, expected
            ),
            PartitionError::TotalFaceCount { expected, actual } => write!(
                f,
                "Compound has {} faces, expected {}",
                actual, expected
            ),
            PartitionError::EdgeClassMismatch { group, edge, class } => write!(
                f,
                "Group '{}' edge ({}, {}) is '{}'",
                group,
                edge.0,
                edge.1,
                class.name()
            ),
            PartitionError::DuplicateSolid { first, second } => write!(
                f,
                "Groups '{}' and '{}' span the same vertices",
                first, second
            ),
            PartitionError::UnresolvedPairingFace { chirality, face } => write!(
                f,
                "Pairing face {:?} is not a face of any {} group",
                face,
                chirality.name()
            ),
            PartitionError::NonCoplanarPairing { right_group, left_group, right, left } => write!(
                f,
                "Face {:?} of '{}' is not coplanar with face {:?} of '{}'",
                right, right_group, left, left_group
            ),
            PartitionError::PairingCount { expected, actual } => write!(
                f,
                "Table declares {} face pairings, expected {}",
                actual, expected
            ),
            PartitionError::FaceNotPaired { group, face } => {
                write!(f, "Group '{}' face {} has no coplanar partner", group, face)
            }
            PartitionError::FacePairedTwice { group, face } => write!(
                f,
                "Group '{}' face {} appears in more than one pairing",
                group, face
            ),
            PartitionError::DuplicateEdge(edge) => {
                write!(f, "Edge ({}, {}) emitted more than once", edge.0, edge.1)
            }
            PartitionError::HullEdgeMismatch { edge, class } => match class {
                Some(class) => write!(
                    f,
                    "Hull edge ({}, {}) is '{}'",
                    edge.0,
                    edge.1,
                    class.name()
                ),
                None => write!(f, "Hull edge ({}, {}) is out of range", edge.0, edge.1),
            },
        }
    }
}

impl std::error::Error for PartitionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_error_display() {
        let err = ConstructionError::UnclassifiedPair { a: 3, b: 7, distance: 0.9 };
        let msg = format!("{}", err);
        assert!(msg.contains("(3, 7)"));
        assert!(msg.contains("0.9"));

        let err = ConstructionError::ProfileMismatch {
            vertex: 8,
            class: DistanceClass::Minor,
            expected: 3,
            actual: 2,
        };
        assert_eq!(format!("{}", err), "Vertex 8 has 2 'minor' neighbours, expected 3");
    }

    #[test]
    fn test_partition_error_names_group() {
        let err = PartitionError::FaceCount {
            group: "red".to_string(),
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.group(), Some("red"));
        assert_eq!(format!("{}", err), "Group 'red' has 3 faces, expected 4");

        assert_eq!(PartitionError::EmptyTable.group(), None);
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = PartitionError::IndexOutOfRange {
            group: "blue".to_string(),
            face: 2,
            index: 20,
            vertex_count: 20,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("'blue'"));
        assert!(msg.contains("vertex 20"));
    }

    #[test]
    fn test_hull_edge_display() {
        let out_of_range = PartitionError::HullEdgeMismatch { edge: Edge(1, 30), class: None };
        assert!(format!("{}", out_of_range).contains("out of range"));

        let wrong = PartitionError::HullEdgeMismatch {
            edge: Edge(0, 1),
            class: Some(DistanceClass::Adjacent),
        };
        assert!(format!("{}", wrong).contains("'adjacent'"));
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(PartitionError::EmptyTable);
        assert_eq!(err.to_string(), "Compound table has no groups");
    }
}
