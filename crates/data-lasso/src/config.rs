//! Tunable constants for the selection engine.

use serde::Deserialize;

use crate::{AxisMappings, LassoError};

/// Distance from the camera to the projection plane.
pub const DEFAULT_PLANE_DISTANCE: f32 = 2000.0;

/// Side length of the square projection plane. Large enough to cover the
/// viewport at the default distance.
pub const DEFAULT_PLANE_EXTENT: f32 = 2000.0;

/// Number of clicks that make up one lasso.
pub const DEFAULT_LASSO_POINTS: usize = 4;

/// How long the finished lasso stays on screen after a selection completes.
pub const DEFAULT_CLEANUP_DELAY_MS: u64 = 100;

/// Extent of each axis of the graph; scales map onto `[0, graph_size]`.
pub const DEFAULT_GRAPH_SIZE: f32 = 2000.0;

/// Configuration for the selection engine and dataset scales.
///
/// Missing fields fall back to the defaults above, so an empty JSON object
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LassoConfig {
    pub plane_distance: f32,
    pub plane_extent: f32,
    pub lasso_points: usize,
    pub cleanup_delay_ms: u64,
    pub graph_size: f32,
    /// Attributes to plot on each axis. Hosts choose their own when absent.
    pub mappings: Option<AxisMappings>,
}

impl Default for LassoConfig {
    fn default() -> Self {
        Self {
            plane_distance: DEFAULT_PLANE_DISTANCE,
            plane_extent: DEFAULT_PLANE_EXTENT,
            lasso_points: DEFAULT_LASSO_POINTS,
            cleanup_delay_ms: DEFAULT_CLEANUP_DELAY_MS,
            graph_size: DEFAULT_GRAPH_SIZE,
            mappings: None,
        }
    }
}

impl LassoConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json_str(text: &str) -> Result<Self, LassoError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), LassoError> {
        check_positive("plane_distance", self.plane_distance)?;
        check_positive("plane_extent", self.plane_extent)?;
        check_positive("graph_size", self.graph_size)?;
        if self.lasso_points < 3 {
            return Err(LassoError::InvalidConfig(format!(
                "lasso_points must be at least 3, got {}",
                self.lasso_points
            )));
        }
        Ok(())
    }

    /// Cleanup delay in seconds.
    pub fn cleanup_delay(&self) -> f32 {
        self.cleanup_delay_ms as f32 / 1000.0
    }
}

fn check_positive(name: &str, value: f32) -> Result<(), LassoError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LassoError::InvalidConfig(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}
