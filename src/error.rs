// error.rs - Failure taxonomy for viewer startup and scene building
use thiserror::Error;

/// Fatal startup failures. All of these funnel into the single top-level
/// handler which shows the overlay error state and stops the startup
/// sequence; none of them are retried.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The drawing surface (window or GPU device) could not be acquired.
    /// This aborts before any overlay state change, since there is nothing
    /// to draw the overlay on.
    #[error("drawing surface unavailable: {0}")]
    SurfaceMissing(String),

    /// The scene document could not be fetched from its source.
    #[error("failed to fetch {name}: {source}")]
    Fetch {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The document body is not valid JSON.
    #[error("scene document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but does not have the required shape.
    #[error("invalid scene document: {0}")]
    Validation(String),
}

/// Per-node failures. These are collected into the build report, logged,
/// and never abort the rest of the node sequence.
#[derive(Debug, Error)]
pub enum NodeError {
    /// A descriptor could not be turned into a scene object.
    #[error("{0}")]
    Instantiation(String),

    /// A model asset could not be loaded or decoded.
    #[error("failed to load asset {path}: {message}")]
    AssetLoad { path: String, message: String },
}
