//! Camera state as seen by the selection engine.

use nalgebra::{Point3, UnitQuaternion, Vector2, Vector3};

use crate::Ray;

/// Snapshot of a perspective camera.
///
/// The camera looks along its local −Z axis with +Y up; `orientation` rotates
/// camera-local directions into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
}

impl CameraState {
    pub fn new(
        position: Point3<f32>,
        orientation: UnitQuaternion<f32>,
        fov_y: f32,
        aspect: f32,
    ) -> Self {
        Self {
            position,
            orientation,
            fov_y,
            aspect,
        }
    }

    /// Creates a camera at `position` looking towards `target`.
    pub fn looking_at(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y: f32,
        aspect: f32,
    ) -> Self {
        // look_at_rh is the world-to-view rotation; the camera orientation is its inverse.
        let orientation = UnitQuaternion::look_at_rh(&(target - position), &up).inverse();
        Self::new(position, orientation, fov_y, aspect)
    }

    /// Unit vector the camera is looking along.
    pub fn forward(&self) -> Vector3<f32> {
        self.orientation * -Vector3::z()
    }

    /// Unit vector pointing to the right of the view.
    pub fn right(&self) -> Vector3<f32> {
        self.orientation * Vector3::x()
    }

    /// Unit vector pointing up in the view.
    pub fn up(&self) -> Vector3<f32> {
        self.orientation * Vector3::y()
    }

    /// Builds the ray from the camera through a cursor position given in
    /// normalized device coordinates (both axes in `[-1, 1]`, +Y up).
    ///
    /// Returns `None` when the camera or cursor values are not finite, for
    /// example an aspect ratio computed from a zero-height viewport.
    pub fn ray_through(&self, ndc: Vector2<f32>) -> Option<Ray> {
        let half_height = (self.fov_y * 0.5).tan();
        let local = Vector3::new(
            ndc.x * half_height * self.aspect,
            ndc.y * half_height,
            -1.0,
        );
        Ray::try_new(self.position, self.orientation * local)
    }
}

/// Source of camera state, implemented by the host's camera controller.
pub trait CameraProvider {
    /// Returns the current camera state.
    fn camera(&self) -> CameraState;

    /// Enables or disables user camera controls (orbit, pan, zoom).
    fn set_controls_enabled(&mut self, enabled: bool);
}

/// A fixed camera with a controls flag; handy for tests and headless hosts.
#[derive(Debug, Clone)]
pub struct StaticCamera {
    pub state: CameraState,
    pub controls_enabled: bool,
}

impl StaticCamera {
    pub fn new(state: CameraState) -> Self {
        Self {
            state,
            controls_enabled: true,
        }
    }
}

impl CameraProvider for StaticCamera {
    fn camera(&self) -> CameraState {
        self.state
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }
}
