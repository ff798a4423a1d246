//! Error type for the fallible edges of the crate.
//!
//! The geometric core (projection, frustum building, containment) never
//! fails; these errors cover configuration and dataset handling.

#[derive(Debug, thiserror::Error)]
pub enum LassoError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No attribute named {0:?} in the dataset")]
    UnknownAttribute(String),
    #[error("Cannot zoom in without a selection")]
    EmptySelection,
    #[error("No snapshot to zoom out to")]
    NoSnapshot,
}
