use thiserror::Error;

/// All possible errors raised by the graph store, sorter and loader
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Vertex '{0}' not found")]
    VertexNotFound(String),

    #[error("Edge '{from}' -> '{to}' not found")]
    EdgeNotFound { from: String, to: String },

    /// The store rejected a vertex the sorter had just enumerated from it.
    #[error("Graph invariant violated: vertex '{0}' disappeared during traversal")]
    InvariantViolation(String),

    #[error("Graph '{0}' is not defined in the document")]
    GraphNotDefined(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GraphError>;
