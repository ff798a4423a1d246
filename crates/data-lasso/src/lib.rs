//! Lasso selection over 3D point clouds.
//!
//! Clicks are projected onto a plane in front of the camera; the resulting
//! polygon, together with the camera position, spans a selection frustum
//! that is tested against every plotted entry.

mod camera;
mod config;
mod coordinator;
mod dataset;
mod entry;
mod error;
mod frustum;
mod hover;
mod lasso;
mod plane;
mod projection;
mod ray;
mod scale;
mod selection;

pub use camera::{CameraProvider, CameraState, StaticCamera};
pub use config::{
    DEFAULT_CLEANUP_DELAY_MS, DEFAULT_GRAPH_SIZE, DEFAULT_LASSO_POINTS, DEFAULT_PLANE_DISTANCE,
    DEFAULT_PLANE_EXTENT, LassoConfig,
};
pub use coordinator::{Mode, SelectionCoordinator, SelectionEvent};
pub use dataset::{AxisMappings, DEFAULT_HUE, Dataset, ID_FIELD};
pub use entry::{Entry, EntryId, EntryStore, mark_selected};
pub use error::LassoError;
pub use frustum::{Frustum, Winding};
pub use hover::pick_entry;
pub use lasso::{ClickOutcome, CollectingOverlay, LassoCollector, LassoOverlay, Segment};
pub use plane::Plane3D;
pub use projection::ProjectionPlane;
pub use ray::Ray;
pub use scale::{Scale, category_key};
pub use selection::{
    Lookup, SelectionModifier, apply_modifier, find_inside, find_with_fallback, resolve_selection,
};
