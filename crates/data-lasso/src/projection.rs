//! Projection plane kept at a fixed distance in front of the camera.
//!
//! Cursor rays are intersected with this plane to turn 2D clicks into 3D
//! lasso points. The plane has to be re-placed after every camera movement;
//! raycasting against a stale placement silently yields wrong points.

use nalgebra::{Point3, Vector3};

use crate::{CameraState, LassoConfig, Plane3D, Ray};

/// Current placement of the projection plane.
#[derive(Debug, Clone, PartialEq)]
struct Placement {
    plane: Plane3D,
    center: Point3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
}

/// Finite square plane facing the camera.
#[derive(Debug, Clone)]
pub struct ProjectionPlane {
    distance: f32,
    extent: f32,
    placement: Option<Placement>,
}

impl ProjectionPlane {
    /// Creates an unplaced projection plane. [`ProjectionPlane::update`] must
    /// run before any cursor can be projected.
    pub fn new(distance: f32, extent: f32) -> Self {
        Self {
            distance,
            extent,
            placement: None,
        }
    }

    pub fn from_config(config: &LassoConfig) -> Self {
        Self::new(config.plane_distance, config.plane_extent)
    }

    /// Re-places the plane `distance` units along the camera's forward vector,
    /// oriented like the camera, and returns it.
    pub fn update(&mut self, camera: &CameraState) -> &Plane3D {
        let forward = camera.forward();
        let center = camera.position + forward * self.distance;
        let placement = self.placement.insert(Placement {
            plane: Plane3D::from_point_and_normal(center, forward),
            center,
            right: camera.right(),
            up: camera.up(),
        });
        &placement.plane
    }

    /// Returns the current plane, if it has been placed.
    pub fn plane(&self) -> Option<&Plane3D> {
        self.placement.as_ref().map(|p| &p.plane)
    }

    /// Returns the center of the current plane, if it has been placed.
    pub fn center(&self) -> Option<Point3<f32>> {
        self.placement.as_ref().map(|p| p.center)
    }

    /// Intersects a cursor ray with the plane.
    ///
    /// Returns `None` if the plane has not been placed, the ray is parallel to
    /// it or points away from it, or the hit falls outside the plane's extent.
    pub fn project_cursor(&self, ray: &Ray) -> Option<Point3<f32>> {
        let placement = self.placement.as_ref()?;
        let (_, hit) = placement.plane.intersect_ray(ray)?;

        let half = self.extent * 0.5;
        let local = hit - placement.center;
        if local.dot(&placement.right).abs() > half || local.dot(&placement.up).abs() > half {
            return None;
        }

        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> CameraState {
        CameraState::looking_at(
            Point3::new(0.0, 0.0, 10.0),
            Point3::origin(),
            Vector3::y(),
            FRAC_PI_2,
            1.0,
        )
    }

    fn cursor_ray(camera: &CameraState, x: f32, y: f32) -> Ray {
        camera.ray_through(Vector2::new(x, y)).unwrap()
    }

    #[test]
    fn unplaced_plane_projects_nothing() {
        let projection = ProjectionPlane::new(5.0, 10.0);
        let ray = cursor_ray(&camera(), 0.0, 0.0);
        assert!(projection.plane().is_none());
        assert!(projection.project_cursor(&ray).is_none());
    }

    #[test]
    fn update_places_plane_in_front_of_camera() {
        let mut projection = ProjectionPlane::new(5.0, 10.0);
        let cam = camera();
        let plane = projection.update(&cam).clone();

        assert!((plane.normal() - cam.forward()).norm() < 1e-6);
        let center = projection.center().unwrap();
        assert!((center - Point3::new(0.0, 0.0, 5.0)).norm() < 1e-6);
    }

    #[test]
    fn projects_center_and_offset_cursor() {
        let mut projection = ProjectionPlane::new(5.0, 20.0);
        let cam = camera();
        projection.update(&cam);

        let center = projection.project_cursor(&cursor_ray(&cam, 0.0, 0.0)).unwrap();
        assert!((center - Point3::new(0.0, 0.0, 5.0)).norm() < 1e-5);

        // 90 degree fov: the right edge of the screen lands at x = distance.
        let edge = projection.project_cursor(&cursor_ray(&cam, 1.0, 0.0)).unwrap();
        assert!((edge - Point3::new(5.0, 0.0, 5.0)).norm() < 1e-4);
    }

    #[test]
    fn hits_outside_extent_are_rejected() {
        let mut projection = ProjectionPlane::new(5.0, 4.0);
        let cam = camera();
        projection.update(&cam);

        let near = cursor_ray(&cam, 0.2, 0.2);
        let edge = cursor_ray(&cam, 1.0, 0.0);
        assert!(projection.project_cursor(&near).is_some());
        assert!(projection.project_cursor(&edge).is_none());
    }

    #[test]
    fn parallel_and_backward_rays_are_rejected() {
        let mut projection = ProjectionPlane::new(5.0, 10.0);
        projection.update(&camera());

        let parallel = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::x());
        let backward = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::z());
        assert!(projection.project_cursor(&parallel).is_none());
        assert!(projection.project_cursor(&backward).is_none());
    }

    #[test]
    fn stale_plane_keeps_old_placement_until_updated() {
        let mut projection = ProjectionPlane::new(5.0, 10.0);
        projection.update(&camera());

        let moved = CameraState::looking_at(
            Point3::new(10.0, 0.0, 0.0),
            Point3::origin(),
            Vector3::y(),
            FRAC_PI_2,
            1.0,
        );
        let ray = cursor_ray(&moved, 0.0, 0.0);
        let stale = projection.project_cursor(&ray);

        projection.update(&moved);
        let fresh = projection.project_cursor(&ray).unwrap();
        assert!((fresh - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-5);
        assert_ne!(stale, Some(fresh));
    }
}
