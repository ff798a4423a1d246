//! Half-infinite rays used for cursor picking.

use nalgebra::{Point3, Vector3};

/// A ray starting at `origin` and extending along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3<f32>,
    direction: Vector3<f32>,
}

impl Ray {
    /// Creates a ray. The direction is normalized automatically.
    ///
    /// # Panics
    /// Panics if the direction has zero length.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        let norm = direction.norm();
        assert!(norm > f32::EPSILON, "Ray direction cannot be zero");
        Self {
            origin,
            direction: direction / norm,
        }
    }

    /// Creates a ray, or returns `None` if the origin is not finite or the
    /// direction is zero or not finite.
    pub fn try_new(origin: Point3<f32>, direction: Vector3<f32>) -> Option<Self> {
        let norm = direction.norm();
        let finite_origin = origin.coords.iter().all(|c| c.is_finite());
        if !finite_origin || !norm.is_finite() || norm <= f32::EPSILON {
            return None;
        }
        Some(Self {
            origin,
            direction: direction / norm,
        })
    }

    /// Returns the start point.
    #[inline]
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    /// Returns the unit direction.
    #[inline]
    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// Returns the point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Returns `(t, distance)` for the closest approach of `point` to the ray:
    /// `t` is the parameter of the foot of the perpendicular (may be negative),
    /// `distance` the perpendicular distance.
    pub fn closest_approach(&self, point: Point3<f32>) -> (f32, f32) {
        let to_point = point - self.origin;
        let t = to_point.dot(&self.direction);
        let distance = (to_point - self.direction * t).norm();
        (t, distance)
    }
}
