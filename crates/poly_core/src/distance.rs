//! Pairwise distance classification
//!
//! Distances are normalized so the host cube's edge is 1, then matched
//! against a small set of closed-form class centers. A distance that lands in
//! no class window means the vertex set is broken.

use std::collections::BTreeMap;

use poly_math::{golden_ratio, inverse_golden_ratio};
use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;
use crate::solid::{SolidFamily, VertexSet};

/// Absolute tolerance around each class center
pub const CLASS_TOLERANCE: f64 = 1e-3;

/// Relative tolerance for the circumsphere check
pub const SPHERE_TOLERANCE: f64 = 1e-6;

/// Named normalized-distance classes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceClass {
    /// Zero distance (a vertex against itself)
    Coincident,
    /// Normalized distance 1: cube edges, icosahedron edges
    Adjacent,
    /// √2: cube face diagonals, tetrahedron edges
    Square,
    /// h ≈ 0.618: dodecahedron edges
    Minor,
    /// g ≈ 1.618: golden-rectangle long sides
    Golden,
    /// The circumdiameter
    Antipodal,
    /// Outside every class window
    Other,
}

impl DistanceClass {
    /// Classes in the order they are tried
    ///
    /// On the octahedron the circumdiameter equals √2, so its antipodes
    /// classify as `Square`.
    pub const PRIORITY: [DistanceClass; 6] = [
        DistanceClass::Coincident,
        DistanceClass::Adjacent,
        DistanceClass::Square,
        DistanceClass::Minor,
        DistanceClass::Golden,
        DistanceClass::Antipodal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DistanceClass::Coincident => "coincident",
            DistanceClass::Adjacent => "adjacent",
            DistanceClass::Square => "square",
            DistanceClass::Minor => "minor",
            DistanceClass::Golden => "golden",
            DistanceClass::Antipodal => "antipodal",
            DistanceClass::Other => "other",
        }
    }

    /// Normalized class center for a family, `None` for [`DistanceClass::Other`]
    pub fn center(self, family: SolidFamily) -> Option<f64> {
        match self {
            DistanceClass::Coincident => Some(0.0),
            DistanceClass::Adjacent => Some(1.0),
            DistanceClass::Square => Some(std::f64::consts::SQRT_2),
            DistanceClass::Minor => Some(inverse_golden_ratio()),
            DistanceClass::Golden => Some(golden_ratio()),
            DistanceClass::Antipodal => {
                Some(2.0 * family.circumradius() / family.distance_scale())
            }
            DistanceClass::Other => None,
        }
    }
}

/// One row of a neighbourhood table
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifiedDistance {
    pub index: usize,
    pub distance: f64,
    pub class: DistanceClass,
}

/// Per-vertex neighbour counts by class, excluding the vertex itself
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymmetryProfile {
    counts: BTreeMap<DistanceClass, usize>,
}

impl SymmetryProfile {
    pub fn from_counts(counts: &[(DistanceClass, usize)]) -> Self {
        Self {
            counts: counts.iter().copied().filter(|&(_, n)| n > 0).collect(),
        }
    }

    /// The profile every vertex of a well-formed set must have
    pub fn expected(family: SolidFamily) -> Self {
        use DistanceClass::*;
        match family {
            SolidFamily::Dodecahedron => Self::from_counts(&[
                (Minor, 3),
                (Adjacent, 6),
                (Square, 6),
                (Golden, 3),
                (Antipodal, 1),
            ]),
            SolidFamily::Icosahedron => {
                Self::from_counts(&[(Adjacent, 5), (Golden, 5), (Antipodal, 1)])
            }
            SolidFamily::Cube => {
                Self::from_counts(&[(Adjacent, 3), (Square, 3), (Antipodal, 1)])
            }
            SolidFamily::Octahedron => Self::from_counts(&[(Adjacent, 4), (Square, 1)]),
        }
    }

    pub fn add(&mut self, class: DistanceClass) {
        *self.counts.entry(class).or_insert(0) += 1;
    }

    pub fn count(&self, class: DistanceClass) -> usize {
        self.counts.get(&class).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DistanceClass, usize)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }
}

/// Classifies vertex-pair distances of one vertex set
pub struct DistanceClassifier<'a> {
    vertices: &'a VertexSet,
    tolerance: f64,
}

impl<'a> DistanceClassifier<'a> {
    pub fn new(vertices: &'a VertexSet) -> Self {
        Self {
            vertices,
            tolerance: CLASS_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub fn vertices(&self) -> &VertexSet {
        self.vertices
    }

    /// Euclidean distance divided by the family's normalization and the
    /// set's scale
    pub fn normalized_distance(&self, a: usize, b: usize) -> f64 {
        let raw = self.vertices[a].distance(self.vertices[b]);
        raw / (self.vertices.family().distance_scale() * self.vertices.scale().abs())
    }

    /// Match a normalized distance against the class windows
    pub fn classify_value(&self, distance: f64) -> DistanceClass {
        let family = self.vertices.family();
        DistanceClass::PRIORITY
            .iter()
            .copied()
            .find(|class| {
                class
                    .center(family)
                    .is_some_and(|center| (distance - center).abs() < self.tolerance)
            })
            .unwrap_or(DistanceClass::Other)
    }

    /// Class of the pair `(a, b)`
    ///
    /// Panics if either index is outside the set.
    pub fn classify_pair(&self, a: usize, b: usize) -> DistanceClass {
        self.classify_value(self.normalized_distance(a, b))
    }

    /// Distances and classes from one reference vertex to every vertex,
    /// itself included
    pub fn classify_from(&self, reference: usize) -> Result<Vec<ClassifiedDistance>, ConstructionError> {
        self.check_reference(reference)?;
        Ok((0..self.vertices.len())
            .map(|index| {
                let distance = self.normalized_distance(reference, index);
                ClassifiedDistance {
                    index,
                    distance,
                    class: self.classify_value(distance),
                }
            })
            .collect())
    }

    /// Symmetric table of classes, `table[a][b] == table[b][a]`
    pub fn classify_all(&self) -> Vec<Vec<DistanceClass>> {
        let n = self.vertices.len();
        (0..n)
            .map(|a| (0..n).map(|b| self.classify_pair(a, b)).collect())
            .collect()
    }

    /// Neighbour counts of one vertex
    pub fn profile_of(&self, reference: usize) -> Result<SymmetryProfile, ConstructionError> {
        let mut profile = SymmetryProfile::default();
        for row in self.classify_from(reference)? {
            if row.index != reference {
                profile.add(row.class);
            }
        }
        Ok(profile)
    }

    /// All unordered pairs `(a, b)` with `a < b` in the given class
    pub fn pairs_of(&self, class: DistanceClass) -> Vec<(usize, usize)> {
        let n = self.vertices.len();
        let mut pairs = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                if self.classify_pair(a, b) == class {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    /// Number of unordered pairs in each class
    pub fn class_counts(&self) -> BTreeMap<DistanceClass, usize> {
        let n = self.vertices.len();
        let mut counts = BTreeMap::new();
        for a in 0..n {
            for b in (a + 1)..n {
                *counts.entry(self.classify_pair(a, b)).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Every symmetry violation in the set
    ///
    /// Checks the vertex count, the circumsphere, that every pair lands in a
    /// class window and that each vertex has the family's profile.
    pub fn diagnose(&self) -> Vec<ConstructionError> {
        let family = self.vertices.family();
        let mut errors = Vec::new();

        if self.vertices.len() != family.vertex_count() {
            errors.push(ConstructionError::VertexCount {
                family,
                expected: family.vertex_count(),
                actual: self.vertices.len(),
            });
            return errors;
        }

        let radius = self.vertices.circumradius();
        for (i, v) in self.vertices.vertices().iter().enumerate() {
            let r = v.length();
            if ((r - radius) / radius).abs() > SPHERE_TOLERANCE {
                errors.push(ConstructionError::OffSphere {
                    vertex: i,
                    radius: r,
                    expected: radius,
                });
            }
        }

        let n = self.vertices.len();
        for a in 0..n {
            for b in (a + 1)..n {
                let distance = self.normalized_distance(a, b);
                if self.classify_value(distance) == DistanceClass::Other {
                    errors.push(ConstructionError::UnclassifiedPair { a, b, distance });
                }
            }
        }

        let expected = SymmetryProfile::expected(family);
        for vertex in 0..n {
            // Reference is always in range here
            let Ok(actual) = self.profile_of(vertex) else {
                continue;
            };
            if actual == expected {
                continue;
            }
            for class in DistanceClass::PRIORITY.iter().chain(&[DistanceClass::Other]) {
                let (want, got) = (expected.count(*class), actual.count(*class));
                if want != got {
                    errors.push(ConstructionError::ProfileMismatch {
                        vertex,
                        class: *class,
                        expected: want,
                        actual: got,
                    });
                }
            }
        }

        errors
    }

    /// Fail on the first symmetry violation
    pub fn validate(&self) -> Result<(), ConstructionError> {
        match self.diagnose().into_iter().next() {
            Some(err) => Err(err),
            None => {
                log::debug!(
                    "{} vertex set passed symmetry validation",
                    self.vertices.family().name()
                );
                Ok(())
            }
        }
    }

    /// Dump one vertex's neighbourhood table at debug level
    pub fn log_neighbourhood(&self, reference: usize) -> Result<(), ConstructionError> {
        let rows = self.classify_from(reference)?;
        log::debug!(
            "Distances from {} vertex {}:",
            self.vertices.family().name(),
            reference
        );
        for row in rows {
            log::debug!("  {:2} -> {:.6} ({})", row.index, row.distance, row.class.name());
        }
        Ok(())
    }

    fn check_reference(&self, reference: usize) -> Result<(), ConstructionError> {
        if reference >= self.vertices.len() {
            return Err(ConstructionError::ReferenceOutOfRange {
                index: reference,
                vertex_count: self.vertices.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_math::Vec3;

    #[test]
    fn test_every_family_validates() {
        for family in SolidFamily::ALL {
            let set = family.generate();
            let classifier = DistanceClassifier::new(&set);
            assert_eq!(classifier.diagnose(), vec![], "{}", family.name());
        }
    }

    #[test]
    fn test_dodecahedron_vertex_zero_profile() {
        let set = SolidFamily::Dodecahedron.generate();
        let classifier = DistanceClassifier::new(&set);
        let profile = classifier.profile_of(0).unwrap();
        assert_eq!(profile.count(DistanceClass::Minor), 3);
        assert_eq!(profile.count(DistanceClass::Adjacent), 6);
        assert_eq!(profile.count(DistanceClass::Square), 6);
        assert_eq!(profile.count(DistanceClass::Golden), 3);
        assert_eq!(profile.count(DistanceClass::Antipodal), 1);
        assert_eq!(profile.total(), 19);
    }

    #[test]
    fn test_cube_edge_is_adjacent() {
        let set = SolidFamily::Dodecahedron.generate();
        let classifier = DistanceClassifier::new(&set);
        assert!((classifier.normalized_distance(0, 1) - 1.0).abs() < 1e-12);
        assert_eq!(classifier.classify_pair(0, 1), DistanceClass::Adjacent);
    }

    #[test]
    fn test_dodecahedron_edge_is_minor() {
        let set = SolidFamily::Dodecahedron.generate();
        let classifier = DistanceClassifier::new(&set);
        // Vertices 8 and 9 differ only in the sign of z = ±h, so they are
        // 2h apart before normalization
        let d = classifier.normalized_distance(8, 9);
        assert!((d - inverse_golden_ratio()).abs() < 1e-12, "got {}", d);
        assert_eq!(classifier.classify_pair(8, 9), DistanceClass::Minor);

        let minor: Vec<usize> = classifier
            .classify_from(8)
            .unwrap()
            .into_iter()
            .filter(|row| row.class == DistanceClass::Minor)
            .map(|row| row.index)
            .collect();
        assert_eq!(minor, vec![0, 1, 9]);
    }

    #[test]
    fn test_antipodes() {
        let set = SolidFamily::Dodecahedron.generate();
        let classifier = DistanceClassifier::new(&set);
        assert_eq!(classifier.classify_pair(0, 6), DistanceClass::Antipodal);
        assert!((classifier.normalized_distance(0, 6) - 3.0f64.sqrt()).abs() < 1e-12);

        // Octahedron antipodes share the square window
        let octa = SolidFamily::Octahedron.generate();
        let classifier = DistanceClassifier::new(&octa);
        assert_eq!(classifier.classify_pair(0, 3), DistanceClass::Square);
        assert_eq!(classifier.classify_pair(0, 1), DistanceClass::Adjacent);
    }

    #[test]
    fn test_classify_all_is_symmetric() {
        let set = SolidFamily::Icosahedron.generate();
        let table = DistanceClassifier::new(&set).classify_all();
        assert_eq!(table.len(), 12);
        for a in 0..12 {
            assert_eq!(table[a][a], DistanceClass::Coincident);
            for b in 0..12 {
                assert_eq!(table[a][b], table[b][a]);
                assert_ne!(table[a][b], DistanceClass::Other);
            }
        }
    }

    #[test]
    fn test_pair_counts() {
        let set = SolidFamily::Dodecahedron.generate();
        let counts = DistanceClassifier::new(&set).class_counts();
        assert_eq!(counts[&DistanceClass::Minor], 30);
        assert_eq!(counts[&DistanceClass::Adjacent], 60);
        assert_eq!(counts[&DistanceClass::Square], 60);
        assert_eq!(counts[&DistanceClass::Golden], 30);
        assert_eq!(counts[&DistanceClass::Antipodal], 10);
        assert!(!counts.contains_key(&DistanceClass::Other));

        let ico = SolidFamily::Icosahedron.generate();
        let classifier = DistanceClassifier::new(&ico);
        assert_eq!(classifier.pairs_of(DistanceClass::Adjacent).len(), 30);
        assert_eq!(classifier.pairs_of(DistanceClass::Golden).len(), 30);
        assert_eq!(classifier.pairs_of(DistanceClass::Antipodal).len(), 6);
    }

    #[test]
    fn test_classification_is_scale_invariant() {
        let set = SolidFamily::Icosahedron.generate().scaled(100.0);
        let classifier = DistanceClassifier::new(&set);
        assert!(classifier.validate().is_ok());
        assert_eq!(classifier.classify_pair(0, 3), DistanceClass::Adjacent);
    }

    #[test]
    fn test_mirrored_set_validates() {
        for family in SolidFamily::ALL {
            let set = family.generate().scaled(-3.0);
            let classifier = DistanceClassifier::new(&set);
            assert_eq!(classifier.diagnose(), vec![], "{}", family.name());
            let unit = family.generate();
            let expected = DistanceClassifier::new(&unit).normalized_distance(0, 1);
            assert!((classifier.normalized_distance(0, 1) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_classify_value_windows() {
        let set = SolidFamily::Dodecahedron.generate();
        let classifier = DistanceClassifier::new(&set);
        assert_eq!(classifier.classify_value(1.0005), DistanceClass::Adjacent);
        assert_eq!(classifier.classify_value(1.002), DistanceClass::Other);
        assert_eq!(classifier.classify_value(0.0), DistanceClass::Coincident);
        assert_eq!(classifier.classify_value(0.9), DistanceClass::Other);

        let loose = DistanceClassifier::new(&set).with_tolerance(0.01);
        assert_eq!(loose.classify_value(1.002), DistanceClass::Adjacent);
    }

    #[test]
    fn test_perturbed_vertex_is_reported() {
        let mut vertices = SolidFamily::Dodecahedron.generate().vertices().to_vec();
        vertices[5] = vertices[5] + Vec3::new(0.05, 0.0, 0.0);
        let set = VertexSet::from_vertices(SolidFamily::Dodecahedron, vertices, 1.0);
        let classifier = DistanceClassifier::new(&set);

        let errors = classifier.diagnose();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConstructionError::OffSphere { vertex: 5, .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConstructionError::UnclassifiedPair { b: 5, .. })));
        assert!(classifier.validate().is_err());
    }

    #[test]
    fn test_swapped_family_fails_profile() {
        // Cube vertices labelled as an octahedron fail on count alone
        let cube = SolidFamily::Cube.generate();
        let set = VertexSet::from_vertices(SolidFamily::Octahedron, cube.vertices().to_vec(), 1.0);
        let err = DistanceClassifier::new(&set).validate().unwrap_err();
        assert_eq!(
            err,
            ConstructionError::VertexCount {
                family: SolidFamily::Octahedron,
                expected: 6,
                actual: 8,
            }
        );
    }

    #[test]
    fn test_reference_out_of_range() {
        let set = SolidFamily::Cube.generate();
        let classifier = DistanceClassifier::new(&set);
        assert!(matches!(
            classifier.classify_from(8),
            Err(ConstructionError::ReferenceOutOfRange { index: 8, vertex_count: 8 })
        ));
        assert!(classifier.log_neighbourhood(8).is_err());
        assert!(classifier.log_neighbourhood(0).is_ok());
    }

    #[test]
    fn test_expected_profiles_sum_to_neighbour_count() {
        for family in SolidFamily::ALL {
            assert_eq!(
                SymmetryProfile::expected(family).total(),
                family.vertex_count() - 1,
                "{}",
                family.name()
            );
        }
    }
}
