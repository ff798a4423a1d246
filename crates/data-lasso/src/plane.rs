//! Plane representation and signed-distance queries.

use nalgebra::{Point3, Vector3};

use crate::Ray;

/// A plane in 3D space, represented as `normal · point = offset`.
///
/// A plane built from collinear points is *degenerate*: its normal is the
/// zero vector and every point reports a signed distance of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane3D {
    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Self {
            normal: unit_normal,
            offset,
        }
    }

    /// Creates a plane from three points, taken in the order given.
    ///
    /// The normal is `normalize((b - a) × (c - a))`, so swapping `a` and `c`
    /// flips it. Collinear input yields a degenerate plane instead of
    /// panicking; see [`Plane3D::is_degenerate`].
    pub fn from_three_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let ab = b - a;
        let ac = c - a;
        let normal = ab.cross(&ac);
        let norm = normal.norm();
        if norm <= f32::EPSILON {
            return Self {
                normal: Vector3::zeros(),
                offset: 0.0,
            };
        }
        let unit_normal = normal / norm;
        Self {
            normal: unit_normal,
            offset: unit_normal.dot(&a.coords),
        }
    }

    /// Returns the unit normal vector of the plane (zero when degenerate).
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Returns `true` if the plane was built from collinear points.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::zeros()
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Intersects a ray with the plane.
    ///
    /// Returns `Some((t, point))` with `point = ray.origin + ray.direction * t`
    /// and `t >= 0`. Returns `None` if the ray is parallel to the plane or the
    /// plane lies behind the ray origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Point3<f32>)> {
        let denom = self.normal.dot(&ray.direction());

        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(&ray.origin().coords)) / denom;
        if t < 0.0 {
            return None;
        }

        Some((t, ray.at(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32, z: f32) -> Point3<f32> {
        Point3::new(x, y, z)
    }

    #[test]
    fn three_points_follow_right_hand_rule() {
        let plane =
            Plane3D::from_three_points(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        assert!((plane.normal() - Vector3::z()).norm() < 1e-6);
        assert_eq!(plane.offset(), 0.0);
    }

    #[test]
    fn normal_offsets_land_on_expected_sides() {
        let triples = [
            (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)),
            (p(3.0, -2.0, 5.0), p(-1.0, 4.0, 2.0), p(7.0, 1.0, -3.0)),
            (p(-1.0, -1.0, 0.0), p(0.0, 0.0, 10.0), p(1.0, -1.0, 0.0)),
        ];

        for (a, b, c) in triples {
            let plane = Plane3D::from_three_points(a, b, c);
            let n = plane.normal();
            assert!(plane.signed_distance(a + n) > 0.0);
            assert!(plane.signed_distance(a - n) < 0.0);
        }
    }

    #[test]
    fn swapping_outer_points_flips_normal() {
        let a = p(3.0, -2.0, 5.0);
        let b = p(-1.0, 4.0, 2.0);
        let c = p(7.0, 1.0, -3.0);
        let forward = Plane3D::from_three_points(a, b, c);
        let reversed = Plane3D::from_three_points(c, b, a);
        assert!((forward.normal() + reversed.normal()).norm() < 1e-5);
        assert!((forward.offset() + reversed.offset()).abs() < 1e-4);
    }

    #[test]
    fn collinear_points_make_degenerate_plane() {
        let plane =
            Plane3D::from_three_points(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), p(2.0, 2.0, 2.0));
        assert!(plane.is_degenerate());
        assert_eq!(plane.signed_distance(p(100.0, -4.0, 7.0)), 0.0);
    }

    #[test]
    fn ray_hits_plane_in_front() {
        let plane = Plane3D::from_point_and_normal(p(0.0, 0.0, -5.0), Vector3::z());
        let ray = Ray::new(p(1.0, 2.0, 0.0), -Vector3::z());
        let (t, hit) = plane.intersect_ray(&ray).unwrap();
        assert!((t - 5.0).abs() < 1e-6);
        assert!((hit - p(1.0, 2.0, -5.0)).norm() < 1e-6);
    }

    #[test]
    fn ray_misses_parallel_and_behind() {
        let plane = Plane3D::from_point_and_normal(p(0.0, 0.0, -5.0), Vector3::z());
        let parallel = Ray::new(p(0.0, 0.0, 0.0), Vector3::x());
        let away = Ray::new(p(0.0, 0.0, 0.0), Vector3::z());
        assert!(plane.intersect_ray(&parallel).is_none());
        assert!(plane.intersect_ray(&away).is_none());
    }
}
