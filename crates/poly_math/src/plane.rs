//! Oriented planes through three points
//!
//! Used to compare the supporting planes of polygon faces. A plane is kept in
//! a canonical orientation (offset non-negative) so two coplanar faces with
//! opposite winding compare equal.

use crate::Vec3;

/// A plane `normal · p = offset` with unit normal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane3 {
    /// Unit normal
    pub normal: Vec3,
    /// Signed distance from the origin along `normal`
    pub offset: f64,
}

impl Plane3 {
    /// Build the supporting plane of three points
    ///
    /// Returns `None` when the points are collinear (or coincident):
    /// `epsilon` bounds the sine of the angle at `a`, so the check does not
    /// depend on how large the triangle is.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3, epsilon: f64) -> Option<Self> {
        let (ab, ac) = (b - a, c - a);
        let n = ab.cross(ac);
        let len = n.length();
        if len <= epsilon * ab.length() * ac.length() {
            return None;
        }
        let normal = n / len;
        Some(Self { normal, offset: normal.dot(a) }.canonical())
    }

    /// Flip the plane so the offset is non-negative
    ///
    /// Planes through the origin are oriented so the first non-zero normal
    /// component is positive.
    pub fn canonical(self) -> Self {
        let flip = if self.offset.abs() > 1e-12 {
            self.offset < 0.0
        } else {
            let n = self.normal;
            let lead = if n.x.abs() > 1e-12 {
                n.x
            } else if n.y.abs() > 1e-12 {
                n.y
            } else {
                n.z
            };
            lead < 0.0
        };
        if flip {
            Self { normal: -self.normal, offset: -self.offset }
        } else {
            self
        }
    }

    /// Signed distance of a point from the plane
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f64 {
        self.normal.dot(p) - self.offset
    }

    /// Normals are collinear within `epsilon` (either direction)
    pub fn is_parallel_to(&self, other: &Plane3, epsilon: f64) -> bool {
        1.0 - self.normal.dot(other.normal).abs() <= epsilon
    }

    /// Same supporting plane: collinear normals within `angular` and
    /// offsets within `distance`
    pub fn is_coplanar_with(&self, other: &Plane3, angular: f64, distance: f64) -> bool {
        if !self.is_parallel_to(other, angular) {
            return false;
        }
        // Align the other plane's orientation before comparing offsets
        let sign = self.normal.dot(other.normal).signum();
        (self.offset - sign * other.offset).abs() <= distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_plane_from_points() {
        let p = Plane3::from_points(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
            EPSILON,
        )
        .unwrap();
        assert!(p.normal.approx_eq(Vec3::Z, EPSILON));
        assert!((p.offset - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_winding_does_not_change_canonical_plane() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 1.0);
        let p1 = Plane3::from_points(a, b, c, EPSILON).unwrap();
        let p2 = Plane3::from_points(a, c, b, EPSILON).unwrap();
        assert!(p1.offset > 0.0);
        assert!(p1.normal.approx_eq(p2.normal, EPSILON));
        assert!(p1.is_coplanar_with(&p2, EPSILON, EPSILON));
    }

    #[test]
    fn test_collinear_points_have_no_plane() {
        let p = Plane3::from_points(
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
            EPSILON,
        );
        assert!(p.is_none());
    }

    #[test]
    fn test_tiny_triangle_has_a_plane() {
        let s = 1e-6;
        let p = Plane3::from_points(
            Vec3::new(0.0, 0.0, 2.0 * s),
            Vec3::new(s, 0.0, 2.0 * s),
            Vec3::new(0.0, s, 2.0 * s),
            EPSILON,
        )
        .unwrap();
        assert!(p.normal.approx_eq(Vec3::Z, EPSILON));
        assert!((p.offset - 2.0 * s).abs() < 1e-18);

        let flat = Plane3::from_points(
            Vec3::ZERO,
            Vec3::new(s, s, s),
            Vec3::new(2.0 * s, 2.0 * s, 2.0 * s),
            EPSILON,
        );
        assert!(flat.is_none());
    }

    #[test]
    fn test_offset_tolerance_is_separate_from_angle() {
        let p1 = Plane3 { normal: Vec3::Z, offset: 1.0 };
        let p2 = Plane3 { normal: Vec3::Z, offset: 1.0 + 1e-6 };
        assert!(!p1.is_coplanar_with(&p2, EPSILON, EPSILON));
        assert!(p1.is_coplanar_with(&p2, EPSILON, 1e-5));
    }

    #[test]
    fn test_parallel_but_offset_planes_are_not_coplanar() {
        let p1 = Plane3 { normal: Vec3::Z, offset: 1.0 };
        let p2 = Plane3 { normal: Vec3::Z, offset: 1.5 };
        assert!(p1.is_parallel_to(&p2, EPSILON));
        assert!(!p1.is_coplanar_with(&p2, EPSILON, EPSILON));
    }

    #[test]
    fn test_opposite_planes_are_not_coplanar() {
        // z = 1 and z = -1 share a normal direction but not a plane
        let p1 = Plane3 { normal: Vec3::Z, offset: 1.0 };
        let p2 = Plane3 { normal: Vec3::Z, offset: -1.0 }.canonical();
        assert!(!p1.is_coplanar_with(&p2, EPSILON, EPSILON));
    }

    #[test]
    fn test_signed_distance() {
        let p = Plane3 { normal: Vec3::Y, offset: 3.0 };
        assert!((p.signed_distance(Vec3::new(5.0, 4.0, -2.0)) - 1.0).abs() < EPSILON);
    }
}
