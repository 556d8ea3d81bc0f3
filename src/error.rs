use thiserror::Error;

/// Top-level error type for the planar CAG kernel.
#[derive(Debug, Error)]
pub enum CagError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while constructing geometric values.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("ring needs at least 3 distinct points, got {0}")]
    TooFewPoints(usize),

    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by planar graph lookups.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("{0} not found in graph")]
    EntityNotFound(&'static str),

    #[error("edge {0:?} is missing from its vertex rotation")]
    BrokenRotation(String),
}

/// Errors related to CAG operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`CagError`].
pub type Result<T> = std::result::Result<T, CagError>;
