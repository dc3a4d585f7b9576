//! Compound table validation
//!
//! Checks a [`CompoundTable`] against the vertex set it indexes before any
//! buffer is built. The [`CompoundValidator`] reports every defect it finds
//! rather than stopping at the first.

use std::collections::{BTreeSet, HashMap, HashSet};

use poly_math::Plane3;

use crate::distance::DistanceClassifier;
use crate::error::PartitionError;
use crate::solid::VertexSet;
use crate::subsolid::{Chirality, Edge, Face};
use crate::table::CompoundTable;

/// Tolerance for planarity and coplanarity at unit scale
///
/// Angular checks use it as is; distance checks multiply it by the vertex
/// set's scale.
pub const GEOMETRY_TOLERANCE: f64 = 1e-9;

/// A declared pairing resolved to concrete group faces
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPairing {
    pub right_group: usize,
    pub right_face: usize,
    pub left_group: usize,
    pub left_face: usize,
    /// The shared supporting plane
    pub plane: Plane3,
}

/// Validator for compound tables
///
/// # Example
/// ```
/// use poly_core::{CompoundKind, CompoundValidator};
///
/// let kind = CompoundKind::TenTetrahedra;
/// let vertices = kind.family().generate();
/// assert!(CompoundValidator::validate(&kind.table(), &vertices).is_empty());
/// ```
pub struct CompoundValidator;

impl CompoundValidator {
    /// Validate a table, returning all errors found
    pub fn validate(table: &CompoundTable, vertices: &VertexSet) -> Vec<PartitionError> {
        let mut errors = Vec::new();

        if table.family != vertices.family() {
            errors.push(PartitionError::FamilyMismatch {
                table: table.family,
                vertices: vertices.family(),
            });
            return errors;
        }

        if table.groups.is_empty() {
            errors.push(PartitionError::EmptyTable);
            return errors;
        }

        Self::check_names_and_colors(table, &mut errors);

        let classifier = DistanceClassifier::new(vertices);
        let tolerance = Self::tolerance(vertices);
        for group_index in 0..table.groups.len() {
            Self::check_group(table, group_index, &classifier, tolerance, &mut errors);
        }

        Self::check_duplicates(table, vertices, &mut errors);

        let total = table.face_count();
        if total != table.expected_faces {
            errors.push(PartitionError::TotalFaceCount {
                expected: table.expected_faces,
                actual: total,
            });
        }

        Self::check_hull(table, &classifier, &mut errors);

        if Self::has_pairings(table) {
            let (_, pairing_errors) = Self::resolve_pairings(table, vertices);
            errors.extend(pairing_errors);
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(
        table: &CompoundTable,
        vertices: &VertexSet,
    ) -> Result<(), Vec<PartitionError>> {
        let errors = Self::validate(table, vertices);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Pairing checks apply once a table declares pairings or mixes
    /// right- and left-handed groups
    pub fn has_pairings(table: &CompoundTable) -> bool {
        let has = |c: Chirality| table.groups.iter().any(|g| g.chirality == c);
        !table.pairings.is_empty() || (has(Chirality::Right) && has(Chirality::Left))
    }

    /// Resolve every declared pairing to group faces and check it
    ///
    /// Each pairing face is matched to a group face of the right chirality
    /// by vertex set, so winding does not matter. Every chiral face must be
    /// used by exactly one pairing.
    pub fn resolve_pairings(
        table: &CompoundTable,
        vertices: &VertexSet,
    ) -> (Vec<ResolvedPairing>, Vec<PartitionError>) {
        let tolerance = Self::tolerance(vertices);
        let mut errors = Vec::new();
        let mut resolved = Vec::new();

        let index_faces = |chirality: Chirality| -> HashMap<Vec<usize>, (usize, usize)> {
            let mut map = HashMap::new();
            for (gi, group) in table.groups.iter().enumerate() {
                if group.chirality != chirality {
                    continue;
                }
                for (fi, face) in group.faces.iter().enumerate() {
                    map.entry(face.key()).or_insert((gi, fi));
                }
            }
            map
        };
        let right_faces = index_faces(Chirality::Right);
        let left_faces = index_faces(Chirality::Left);

        let mut uses: HashMap<(usize, usize), usize> = HashMap::new();
        for pairing in &table.pairings {
            let right = right_faces.get(&pairing.right.key()).copied();
            let left = left_faces.get(&pairing.left.key()).copied();
            if right.is_none() {
                errors.push(PartitionError::UnresolvedPairingFace {
                    chirality: Chirality::Right,
                    face: pairing.right.indices.clone(),
                });
            }
            if left.is_none() {
                errors.push(PartitionError::UnresolvedPairingFace {
                    chirality: Chirality::Left,
                    face: pairing.left.indices.clone(),
                });
            }
            let (Some((rg, rf)), Some((lg, lf))) = (right, left) else {
                continue;
            };

            for (gi, fi) in [(rg, rf), (lg, lf)] {
                let count = uses.entry((gi, fi)).or_insert(0);
                *count += 1;
                if *count == 2 {
                    errors.push(PartitionError::FacePairedTwice {
                        group: table.groups[gi].name.clone(),
                        face: fi,
                    });
                }
            }

            let right_plane = face_plane(&pairing.right, vertices);
            let left_plane = face_plane(&pairing.left, vertices);
            match (right_plane, left_plane) {
                (Some(rp), Some(lp)) if rp.is_coplanar_with(&lp, GEOMETRY_TOLERANCE, tolerance) => {
                    resolved.push(ResolvedPairing {
                        right_group: rg,
                        right_face: rf,
                        left_group: lg,
                        left_face: lf,
                        plane: rp,
                    });
                }
                _ => errors.push(PartitionError::NonCoplanarPairing {
                    right_group: table.groups[rg].name.clone(),
                    left_group: table.groups[lg].name.clone(),
                    right: pairing.right.indices.clone(),
                    left: pairing.left.indices.clone(),
                }),
            }
        }

        let mut chiral_faces = 0;
        for (gi, group) in table.groups.iter().enumerate() {
            if group.chirality == Chirality::Achiral {
                continue;
            }
            for fi in 0..group.faces.len() {
                if group.chirality == Chirality::Right {
                    chiral_faces += 1;
                }
                if !uses.contains_key(&(gi, fi)) {
                    errors.push(PartitionError::FaceNotPaired {
                        group: group.name.clone(),
                        face: fi,
                    });
                }
            }
        }

        if table.pairings.len() != chiral_faces {
            errors.push(PartitionError::PairingCount {
                expected: chiral_faces,
                actual: table.pairings.len(),
            });
        }

        (resolved, errors)
    }

    /// Distance tolerance, proportional to the set's size
    fn tolerance(vertices: &VertexSet) -> f64 {
        GEOMETRY_TOLERANCE * vertices.scale().abs()
    }

    fn check_names_and_colors(table: &CompoundTable, errors: &mut Vec<PartitionError>) {
        let mut seen_names = BTreeSet::new();
        let mut seen_colors = HashMap::new();
        for group in &table.groups {
            if !seen_names.insert(group.name.as_str()) {
                errors.push(PartitionError::DuplicateGroupName(group.name.clone()));
            }
            if let Some(first) = seen_colors.insert(group.color, group.name.as_str()) {
                errors.push(PartitionError::DuplicateColor {
                    first: first.to_string(),
                    second: group.name.clone(),
                });
            }
        }
    }

    fn check_group(
        table: &CompoundTable,
        group_index: usize,
        classifier: &DistanceClassifier<'_>,
        tolerance: f64,
        errors: &mut Vec<PartitionError>,
    ) {
        let group = &table.groups[group_index];
        let vertices = classifier.vertices();
        let arity = group.kind.face_arity();
        let allowed = group.kind.edge_classes();
        let mut in_range = true;
        let mut reported_edges = BTreeSet::new();

        for (fi, face) in group.faces.iter().enumerate() {
            if face.arity() != arity {
                errors.push(PartitionError::FaceArity {
                    group: group.name.clone(),
                    face: fi,
                    expected: arity,
                    actual: face.arity(),
                });
                continue;
            }

            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertices.len()) {
                errors.push(PartitionError::IndexOutOfRange {
                    group: group.name.clone(),
                    face: fi,
                    index,
                    vertex_count: vertices.len(),
                });
                in_range = false;
                continue;
            }

            if face.has_repeated_vertex() {
                errors.push(PartitionError::DegenerateFace {
                    group: group.name.clone(),
                    face: fi,
                });
                continue;
            }

            for edge in face.edges() {
                let class = classifier.classify_pair(edge.0, edge.1);
                if !allowed.contains(&class) && reported_edges.insert(edge) {
                    errors.push(PartitionError::EdgeClassMismatch {
                        group: group.name.clone(),
                        edge,
                        class,
                    });
                }
            }

            if arity > 3 && !is_planar(face, vertices, tolerance) {
                errors.push(PartitionError::FaceNotPlanar {
                    group: group.name.clone(),
                    face: fi,
                });
            }
        }

        if let Some(expected) = group.kind.faces_per_group() {
            if group.faces.len() != expected {
                errors.push(PartitionError::FaceCount {
                    group: group.name.clone(),
                    expected,
                    actual: group.faces.len(),
                });
            }
        }

        if let (Some(expected), true) = (group.kind.vertex_count(), in_range) {
            let actual = group.vertex_indices().len();
            if actual != expected {
                errors.push(PartitionError::VertexCount {
                    group: group.name.clone(),
                    expected,
                    actual,
                });
            }
        }
    }

    fn check_duplicates(
        table: &CompoundTable,
        vertices: &VertexSet,
        errors: &mut Vec<PartitionError>,
    ) {
        let mut faces = HashSet::new();
        for group in &table.groups {
            for (fi, face) in group.faces.iter().enumerate() {
                if !faces.insert(face.key()) {
                    errors.push(PartitionError::DuplicateFace {
                        group: group.name.clone(),
                        face: fi,
                    });
                }
            }
        }

        let mut solids: HashMap<BTreeSet<usize>, &str> = HashMap::new();
        for group in table.groups.iter().filter(|g| g.kind.is_closed()) {
            let span = group.vertex_indices();
            if span.iter().any(|&i| i >= vertices.len()) {
                continue;
            }
            if let Some(first) = solids.insert(span, group.name.as_str()) {
                errors.push(PartitionError::DuplicateSolid {
                    first: first.to_string(),
                    second: group.name.clone(),
                });
            }
        }
    }

    fn check_hull(
        table: &CompoundTable,
        classifier: &DistanceClassifier<'_>,
        errors: &mut Vec<PartitionError>,
    ) {
        let n = classifier.vertices().len();
        let mut seen = BTreeSet::new();
        for &edge in &table.hull_edges {
            let edge = Edge::new(edge.0, edge.1);
            if edge.1 >= n || edge.is_degenerate() {
                errors.push(PartitionError::HullEdgeMismatch { edge, class: None });
                continue;
            }
            if !seen.insert(edge) {
                errors.push(PartitionError::DuplicateEdge(edge));
                continue;
            }
            if let Some(expected) = table.hull_class {
                let class = classifier.classify_pair(edge.0, edge.1);
                if class != expected {
                    errors.push(PartitionError::HullEdgeMismatch {
                        edge,
                        class: Some(class),
                    });
                }
            }
        }
    }
}

/// Supporting plane of a face from its first three vertices
///
/// `None` if an index is out of range or the points are collinear.
pub fn face_plane(face: &Face, vertices: &VertexSet) -> Option<Plane3> {
    let [a, b, c] = match face.indices.as_slice() {
        [a, b, c, ..] => [*a, *b, *c],
        _ => return None,
    };
    Plane3::from_points(
        vertices.get(a)?,
        vertices.get(b)?,
        vertices.get(c)?,
        GEOMETRY_TOLERANCE,
    )
}

/// Every vertex of the face lies within `tolerance` of the plane of its
/// first three
pub fn is_planar(face: &Face, vertices: &VertexSet, tolerance: f64) -> bool {
    let Some(plane) = face_plane(face, vertices) else {
        return false;
    };
    face.indices.iter().all(|&i| {
        vertices
            .get(i)
            .is_some_and(|p| plane.signed_distance(p).abs() <= tolerance)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::CompoundKind;
    use crate::color::Rgba8;
    use crate::distance::DistanceClass;
    use crate::solid::SolidFamily;
    use crate::subsolid::{SubSolid, SubSolidKind};
    use crate::table::FacePairing;

    fn setup(kind: CompoundKind) -> (CompoundTable, VertexSet) {
        (kind.table(), kind.family().generate())
    }

    #[test]
    fn test_catalogue_is_valid() {
        for kind in CompoundKind::ALL {
            let (table, vertices) = setup(kind);
            let errors = CompoundValidator::validate(&table, &vertices);
            assert!(errors.is_empty(), "{}: {:?}", kind.name(), errors);
        }
    }

    #[test]
    fn test_catalogue_is_valid_when_scaled() {
        for kind in CompoundKind::ALL {
            for factor in [100.0, 1e-5, -1.0, -250.0] {
                let (table, vertices) = setup(kind);
                let vertices = vertices.scaled(factor);
                let errors = CompoundValidator::validate(&table, &vertices);
                assert!(errors.is_empty(), "{} at {}: {:?}", kind.name(), factor, errors);
            }
        }
    }

    #[test]
    fn test_small_scale_still_catches_bent_face() {
        let vertices = SolidFamily::Dodecahedron.generate().scaled(1e-5);
        let tolerance = GEOMETRY_TOLERANCE * 1e-5;
        assert!(is_planar(&Face::from([0usize, 8, 9, 4, 12]), &vertices, tolerance));
        assert!(!is_planar(&Face::from([0usize, 8, 9, 4, 6]), &vertices, tolerance));
    }

    #[test]
    fn test_all_pairings_resolve_coplanar() {
        let (table, vertices) = setup(CompoundKind::TenTetrahedra);
        let (resolved, errors) = CompoundValidator::resolve_pairings(&table, &vertices);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(resolved.len(), 20);

        // Every face plane of the inscribed tetrahedra is tangent to the
        // same sphere
        let offset = resolved[0].plane.offset;
        for p in &resolved {
            assert!((p.plane.offset - offset).abs() < 1e-9);
            assert_eq!(table.groups[p.right_group].chirality, Chirality::Right);
            assert_eq!(table.groups[p.left_group].chirality, Chirality::Left);
        }
    }

    #[test]
    fn test_empty_table() {
        let table = CompoundTable::new("empty", SolidFamily::Dodecahedron, 0);
        let vertices = SolidFamily::Dodecahedron.generate();
        assert_eq!(
            CompoundValidator::validate(&table, &vertices),
            vec![PartitionError::EmptyTable]
        );
    }

    #[test]
    fn test_family_mismatch() {
        let table = CompoundKind::Octahedron.table();
        let vertices = SolidFamily::Dodecahedron.generate();
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(matches!(errors.as_slice(), [PartitionError::FamilyMismatch { .. }]));
    }

    #[test]
    fn test_out_of_range_index() {
        let (mut table, vertices) = setup(CompoundKind::FiveTetrahedra);
        table.groups[0].faces[0].indices[2] = 20;
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors.contains(&PartitionError::IndexOutOfRange {
            group: "red".to_string(),
            face: 0,
            index: 20,
            vertex_count: 20,
        }));
    }

    #[test]
    fn test_missing_face_is_reported() {
        let (mut table, vertices) = setup(CompoundKind::FiveTetrahedra);
        table.groups[1].faces.pop();
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors.contains(&PartitionError::FaceCount {
            group: "blue".to_string(),
            expected: 4,
            actual: 3,
        }));
        assert!(errors.contains(&PartitionError::TotalFaceCount { expected: 20, actual: 19 }));
    }

    #[test]
    fn test_wrong_edge_class() {
        // A cube edge is not a tetrahedron edge
        let table = CompoundTable::new("bad", SolidFamily::Dodecahedron, 1).with_group(
            SubSolid::new("bad", SubSolidKind::TrianglePatch, Rgba8::RED).with_face([0usize, 1, 8]),
        );
        let vertices = SolidFamily::Dodecahedron.generate();
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors.contains(&PartitionError::EdgeClassMismatch {
            group: "bad".to_string(),
            edge: Edge(0, 8),
            class: DistanceClass::Minor,
        }));
    }

    #[test]
    fn test_non_planar_pentagon() {
        let (mut table, vertices) = setup(CompoundKind::Dodecahedron);
        // Swap in a vertex from the opposite pentagon
        table.groups[0].faces[0].indices[4] = 6;
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors.contains(&PartitionError::FaceNotPlanar {
            group: "blue".to_string(),
            face: 0,
        }));
    }

    #[test]
    fn test_duplicate_solid_and_color() {
        let (mut table, vertices) = setup(CompoundKind::FiveCubes);
        let mut copy = table.groups[0].clone();
        copy.name = "red again".to_string();
        table.groups.push(copy);
        table.expected_faces += 6;
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors.contains(&PartitionError::DuplicateSolid {
            first: "red".to_string(),
            second: "red again".to_string(),
        }));
        assert!(errors.contains(&PartitionError::DuplicateColor {
            first: "red".to_string(),
            second: "red again".to_string(),
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, PartitionError::DuplicateFace { .. })));
    }

    #[test]
    fn test_duplicate_group_name() {
        let (mut table, vertices) = setup(CompoundKind::Octahedron);
        table.groups[1].name = "blue".to_string();
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors.contains(&PartitionError::DuplicateGroupName("blue".to_string())));
    }

    #[test]
    fn test_non_coplanar_pairing() {
        let (mut table, vertices) = setup(CompoundKind::TenTetrahedra);
        // Point the first two pairings at each other's partner
        let left0 = table.pairings[0].left.clone();
        table.pairings[0].left = table.pairings[1].left.clone();
        table.pairings[1].left = left0;
        let errors = CompoundValidator::validate(&table, &vertices);
        let non_coplanar = errors
            .iter()
            .filter(|e| matches!(e, PartitionError::NonCoplanarPairing { .. }))
            .count();
        assert_eq!(non_coplanar, 2, "{:?}", errors);
    }

    #[test]
    fn test_missing_pairing() {
        let (mut table, vertices) = setup(CompoundKind::TenTetrahedra);
        table.pairings.pop();
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors.contains(&PartitionError::PairingCount { expected: 20, actual: 19 }));
        let unpaired = errors
            .iter()
            .filter(|e| matches!(e, PartitionError::FaceNotPaired { .. }))
            .count();
        assert_eq!(unpaired, 2);
    }

    #[test]
    fn test_face_paired_twice() {
        let (mut table, vertices) = setup(CompoundKind::TenTetrahedra);
        let first = table.pairings[0].clone();
        table.pairings[1] = first;
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors
            .iter()
            .any(|e| matches!(e, PartitionError::FacePairedTwice { .. })));
    }

    #[test]
    fn test_unresolved_pairing_face() {
        let (mut table, vertices) = setup(CompoundKind::TenTetrahedra);
        table.pairings[0] = FacePairing::new([0usize, 1, 2], [11usize, 18, 1]);
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors.contains(&PartitionError::UnresolvedPairingFace {
            chirality: Chirality::Right,
            face: vec![0, 1, 2],
        }));
    }

    #[test]
    fn test_pairing_winding_is_irrelevant() {
        let (mut table, vertices) = setup(CompoundKind::TenTetrahedra);
        table.pairings[0].right.indices.reverse();
        table.pairings[0].left.indices.rotate_left(1);
        assert!(CompoundValidator::validate(&table, &vertices).is_empty());
    }

    #[test]
    fn test_bad_hull_edge() {
        let (mut table, vertices) = setup(CompoundKind::GoldenRectangles);
        table.hull_edges[0] = Edge(0, 2);
        table.hull_edges[1] = Edge(0, 12);
        let errors = CompoundValidator::validate(&table, &vertices);
        assert!(errors.contains(&PartitionError::HullEdgeMismatch {
            edge: Edge(0, 2),
            class: Some(DistanceClass::Antipodal),
        }));
        assert!(errors.contains(&PartitionError::HullEdgeMismatch {
            edge: Edge(0, 12),
            class: None,
        }));
    }

    #[test]
    fn test_planarity_helpers() {
        let vertices = SolidFamily::Dodecahedron.generate();
        assert!(is_planar(&Face::from([0usize, 8, 9, 4, 12]), &vertices, GEOMETRY_TOLERANCE));
        assert!(!is_planar(&Face::from([0usize, 8, 9, 4, 6]), &vertices, GEOMETRY_TOLERANCE));
        assert!(face_plane(&Face::new(vec![0, 1]), &vertices).is_none());
        assert!(face_plane(&Face::triangle(0, 1, 99), &vertices).is_none());
    }
}
