//! Selection volume spanned by the camera apex and the lasso polygon.
//!
//! This is not a camera view frustum: it is an open cone with one side plane
//! per lasso edge, every plane passing through the camera position.
//!
//! ```text
//!                 apex
//!                 /|\
//!                / | \
//!               /  |  \
//!              /   |   \
//!           p0 ----|---- p1
//!              \   |   /
//!               \  |  /
//!                  p2 ...
//! ```

use nalgebra::Point3;

use crate::Plane3D;

/// Order in which the lasso points of each side plane are taken.
///
/// The winding decides which half-space of every plane counts as inside.
/// Whether a lasso drawn on screen ends up with inward- or outward-facing
/// normals depends on click order, so callers try [`Winding::Normal`] first
/// and fall back to [`Winding::Inverted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Plane `i` passes through `points[i]`, `apex`, `points[i + 1]`.
    Normal,
    /// Plane `i` passes through `points[i + 1]`, `apex`, `points[i]`.
    Inverted,
}

/// Cone-like selection volume with one plane per lasso edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    apex: Point3<f32>,
    planes: Vec<Plane3D>,
    winding: Winding,
}

impl Frustum {
    /// Builds the side planes for a closed lasso.
    ///
    /// Produces exactly `points.len()` planes; the last one joins the final
    /// point back to the first. Degenerate edges (a lasso point repeated or
    /// in line with the apex) produce degenerate planes that never exclude
    /// anything.
    pub fn build(apex: Point3<f32>, points: &[Point3<f32>], winding: Winding) -> Self {
        let n = points.len();
        let planes = (0..n)
            .map(|i| {
                let current = points[i];
                let next = points[(i + 1) % n];
                match winding {
                    Winding::Normal => Plane3D::from_three_points(current, apex, next),
                    Winding::Inverted => Plane3D::from_three_points(next, apex, current),
                }
            })
            .collect();

        Self {
            apex,
            planes,
            winding,
        }
    }

    /// Returns the camera position every side plane passes through.
    #[inline]
    pub fn apex(&self) -> Point3<f32> {
        self.apex
    }

    /// Returns the side planes, one per lasso edge in lasso order.
    #[inline]
    pub fn planes(&self) -> &[Plane3D] {
        &self.planes
    }

    /// Returns the winding the planes were built with.
    #[inline]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Returns `true` if the point is on the non-positive side of every plane.
    pub fn contains(&self, point: Point3<f32>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) <= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apex() -> Point3<f32> {
        Point3::new(0.0, 0.0, 10.0)
    }

    fn square() -> Vec<Point3<f32>> {
        vec![
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn one_plane_per_edge_through_apex() {
        let points = square();
        let frustum = Frustum::build(apex(), &points, Winding::Normal);
        assert_eq!(frustum.planes().len(), 4);

        for (i, plane) in frustum.planes().iter().enumerate() {
            assert!(plane.signed_distance(apex()).abs() < 1e-4);
            assert!(plane.signed_distance(points[i]).abs() < 1e-4);
            assert!(plane.signed_distance(points[(i + 1) % 4]).abs() < 1e-4);
        }
    }

    #[test]
    fn inverted_normals_are_negated() {
        let points = [
            Point3::new(-3.0, -1.5, 0.5),
            Point3::new(2.0, -2.0, -0.5),
            Point3::new(1.5, 2.5, 0.0),
            Point3::new(-2.0, 1.0, 1.0),
        ];
        let apex = Point3::new(0.5, -0.5, 12.0);
        let normal = Frustum::build(apex, &points, Winding::Normal);
        let inverted = Frustum::build(apex, &points, Winding::Inverted);

        for (a, b) in normal.planes().iter().zip(inverted.planes()) {
            assert!((a.normal() + b.normal()).norm() < 1e-5);
        }
        assert_eq!(inverted.winding(), Winding::Inverted);
    }

    #[test]
    fn counter_clockwise_lasso_faces_inward_under_normal_winding() {
        // Seen from the apex the square runs counter-clockwise, so the normal
        // winding points every plane into the cone and the inverted winding
        // is the one that contains the interior.
        let frustum = Frustum::build(apex(), &square(), Winding::Inverted);
        assert!(frustum.contains(Point3::new(0.0, 0.0, 5.0)));
        // Beyond the lasso polygon the cone keeps widening.
        assert!(frustum.contains(Point3::new(1.2, 1.2, -5.0)));
        assert!(!frustum.contains(Point3::new(5.0, 5.0, 5.0)));

        let normal = Frustum::build(apex(), &square(), Winding::Normal);
        assert!(!normal.contains(Point3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn containment_is_pure() {
        let frustum = Frustum::build(apex(), &square(), Winding::Normal);
        let point = Point3::new(0.2, -0.3, 2.0);
        let first = frustum.contains(point);
        for _ in 0..10 {
            assert_eq!(frustum.contains(point), first);
        }
    }

    #[test]
    fn windings_disagree_on_strict_interior() {
        let points = square();
        let normal = Frustum::build(apex(), &points, Winding::Normal);
        let inverted = Frustum::build(apex(), &points, Winding::Inverted);

        let inside = Point3::new(0.1, 0.2, 4.0);
        assert!(inverted.contains(inside));
        assert!(!normal.contains(inside));

        let mut reversed = points.clone();
        reversed.reverse();
        let normal = Frustum::build(apex(), &reversed, Winding::Normal);
        let inverted = Frustum::build(apex(), &reversed, Winding::Inverted);
        assert!(normal.contains(inside));
        assert!(!inverted.contains(inside));
    }

    #[test]
    fn collinear_lasso_never_panics() {
        let line = [
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let frustum = Frustum::build(apex(), &line, Winding::Normal);
        assert_eq!(frustum.planes().len(), 4);
        // Whatever the answer, it is stable.
        let point = Point3::new(0.0, 0.0, 5.0);
        assert_eq!(frustum.contains(point), frustum.contains(point));
    }
}
