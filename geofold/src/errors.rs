//! Error types for geometry and aggregation failures.

use thiserror::Error;

/// Result alias for geometry kernel operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Result alias for aggregation operations.
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Errors surfaced by the geometry model and the geometry engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid WKT: {0}")]
    InvalidWkt(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Errors surfaced by the aggregation layer.
///
/// Engine failures are passed through unchanged, annotated with the group
/// key that was being reduced when the failure occurred (`None` for the
/// single implicit group of ungrouped execution).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    #[error("{aggregate} aggregate has no identity for an empty group ({})", group_label(.key))]
    EmptyGroup {
        aggregate: &'static str,
        key: Option<String>,
    },

    #[error("geometry engine failed ({}): {source}", group_label(.key))]
    Engine {
        key: Option<String>,
        #[source]
        source: GeometryError,
    },
}

impl AggregateError {
    /// The group key this error is annotated with, if grouping was in effect.
    pub fn group_key(&self) -> Option<&str> {
        match self {
            AggregateError::EmptyGroup { key, .. } | AggregateError::Engine { key, .. } => {
                key.as_deref()
            }
        }
    }
}

fn group_label(key: &Option<String>) -> String {
    match key {
        Some(key) => format!("group {key}"),
        None => "ungrouped".to_string(),
    }
}
