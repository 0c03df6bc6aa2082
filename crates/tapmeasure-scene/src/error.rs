//! Error types for scene-graph insertion.

use thiserror::Error;

/// Errors surfaced by a [`SceneSink`](crate::SceneSink).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The collaborator refused the insertion.
    #[error("scene insertion failed: {0}")]
    Insertion(String),

    /// A child was attached to an anchor the sink does not know.
    #[error("anchor not found in scene")]
    UnknownAnchor,

    /// The lock guarding the sink was poisoned by a panicking writer.
    #[error("scene lock poisoned")]
    Poisoned,
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
