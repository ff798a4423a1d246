//! Rendering and input helpers for the lasso selection viewer.

use data_lasso::{
    CameraProvider, CameraState, Dataset, EntryId, EntryStore, LassoOverlay, Segment,
};
use macroquad::color::hsl_to_rgb;
use macroquad::prelude::*;
use nalgebra::{Point3, Vector2, Vector3};
use serde_json::{Map, Value};

/// Vertical field of view used for both rendering and cursor rays.
pub const FOV_Y_DEGREES: f32 = 45.0;

const SELECTED_COLOR: Color = Color::new(1.0, 0.55, 0.1, 1.0);
const HOVERED_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const LASSO_COLOR: Color = Color::new(1.0, 0.9, 0.2, 1.0);
const PREVIEW_COLOR: Color = Color::new(0.7, 0.7, 0.7, 1.0);

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
    /// Viewport width divided by height, refreshed every frame.
    pub aspect: f32,
    controls_enabled: bool,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 5.0,
            min_distance: 10.0,
            max_distance: 200.0,
            aspect: 1.0,
            controls_enabled: true,
        }
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Sets the camera target point.
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// Updates camera state from user input (mouse drag, scroll, arrow keys).
    /// Returns true if the camera moved.
    pub fn update(&mut self) -> bool {
        if !self.controls_enabled {
            return false;
        }
        let before = (self.yaw, self.pitch, self.distance);

        // Mouse drag for rotation
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        // Mouse wheel for zoom
        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;

        // Arrow keys for rotation
        if is_key_down(KeyCode::Left) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += 0.02;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= 0.02;
        }

        self.clamp();
        before != (self.yaw, self.pitch, self.distance)
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            fovy: FOV_Y_DEGREES.to_radians(),
            ..Default::default()
        }
    }

    /// Returns the eye point as a nalgebra Point3.
    pub fn eye_point(&self) -> Point3<f32> {
        to_point(self.position())
    }

    fn clamp(&mut self) {
        // Clamp pitch to avoid gimbal lock
        self.pitch = self.pitch.clamp(-1.5, 1.5);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }
}

impl CameraProvider for OrbitCamera {
    fn camera(&self) -> CameraState {
        CameraState::looking_at(
            self.eye_point(),
            to_point(self.target),
            Vector3::y(),
            FOV_Y_DEGREES.to_radians(),
            self.aspect,
        )
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }
}

/// Lasso overlay drawn as 3D lines.
#[derive(Debug, Default)]
pub struct LineOverlay {
    preview: Option<Segment>,
    segments: Vec<Segment>,
}

impl LineOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the lasso edges and the preview line. Call with the scene
    /// camera set.
    pub fn draw(&self) {
        for segment in &self.segments {
            draw_line_3d(to_vec3(segment.start), to_vec3(segment.end), LASSO_COLOR);
        }
        if let Some(segment) = &self.preview {
            draw_line_3d(to_vec3(segment.start), to_vec3(segment.end), PREVIEW_COLOR);
        }
    }
}

impl LassoOverlay for LineOverlay {
    fn set_preview(&mut self, segment: Option<Segment>) {
        self.preview = segment;
    }

    fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    fn clear_segments(&mut self) {
        self.segments.clear();
    }
}

/// Draws every entry as a small cube; selected and hovered entries are
/// enlarged.
pub fn draw_points(dataset: &Dataset, hovered: Option<EntryId>) {
    let size = dataset.point_size();

    for entry in dataset.entries() {
        let (scale, color) = if Some(entry.id) == hovered {
            (1.5, HOVERED_COLOR)
        } else if entry.is_selected {
            (2.0, SELECTED_COLOR)
        } else {
            (1.0, hue_color(dataset.hue(entry)))
        };
        let edge = size * scale;
        draw_cube(to_vec3(entry.position), vec3(edge, edge, edge), None, color);
    }
}

/// Draws the three graph axes from the origin.
pub fn draw_axes(length: f32) {
    draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(length, 0.0, 0.0), RED);
    draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, length, 0.0), GREEN);
    draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, length), BLUE);
}

/// Point color for a hue in `[0, 1]`.
pub fn hue_color(hue: f32) -> Color {
    hsl_to_rgb(hue, 0.8, 0.5)
}

/// Converts a mouse position in pixels to normalized device coordinates.
/// Returns `None` for an empty viewport, e.g. a minimized window.
pub fn to_ndc(mouse: (f32, f32), width: f32, height: f32) -> Option<Vector2<f32>> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    let x = mouse.0 / width * 2.0 - 1.0;
    let y = -(mouse.1 / height) * 2.0 + 1.0;
    Some(Vector2::new(x, y))
}

fn to_vec3(point: Point3<f32>) -> Vec3 {
    vec3(point.x, point.y, point.z)
}

fn to_point(v: Vec3) -> Point3<f32> {
    Point3::new(v.x, v.y, v.z)
}

/// Simple seeded random number generator (LCG).
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.state >> 33) as f32) / (u32::MAX as f32 / 2.0)
    }

    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

const DEMO_GROUPS: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

/// Generates `count` random records with numeric attributes `a`, `b`, `c`
/// and a categorical `group`, clustered per group.
pub fn demo_records(seed: u64, count: usize) -> Vec<Map<String, Value>> {
    let mut rng = Rng::new(seed);
    let centers: Vec<[f32; 3]> = DEMO_GROUPS
        .iter()
        .map(|_| {
            [
                rng.range(20.0, 80.0),
                rng.range(20.0, 80.0),
                rng.range(20.0, 80.0),
            ]
        })
        .collect();

    (0..count)
        .map(|i| {
            let group = i % DEMO_GROUPS.len();
            let [a, b, c] = centers[group];
            let mut record = Map::new();
            record.insert("a".to_string(), Value::from(a + rng.range(-15.0, 15.0)));
            record.insert("b".to_string(), Value::from(b + rng.range(-15.0, 15.0)));
            record.insert("c".to_string(), Value::from(c + rng.range(-15.0, 15.0)));
            record.insert("group".to_string(), Value::from(DEMO_GROUPS[group]));
            record
        })
        .collect()
}
