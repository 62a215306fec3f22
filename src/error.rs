use thiserror::Error;

/// Top-level error type for the polyhedra engine.
#[derive(Debug, Error)]
pub enum PolyhedraError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Forme(#[from] FormeError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors raised while constructing or querying a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("face {face} references vertex {index}, but the mesh has {count} vertices")]
    VertexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },

    #[error("face {face} has {sides} sides")]
    DegenerateFace { face: usize, sides: usize },

    #[error("{0} does not belong to this polyhedron")]
    ForeignElement(&'static str),
}

/// Errors raised by the solid catalog.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("unknown solid: {0}")]
    UnknownSolid(String),

    #[error("{0} has no Conway notation")]
    NotConwayNotation(String),

    #[error("no canonical geometry for {0}")]
    NoGeometry(String),
}

/// Errors raised while binding specs to a mesh.
#[derive(Debug, Error)]
pub enum FormeError {
    #[error("cannot classify {0}")]
    Unclassified(String),
}

/// Errors raised by polyhedron operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{operation} cannot be applied to {solid}")]
    NotApplicable {
        operation: &'static str,
        solid: String,
    },

    #[error("{operation} does not accept option {option}")]
    InvalidOption {
        operation: &'static str,
        option: String,
    },

    #[error("{operation} on {solid} produced no known solid")]
    NoResult {
        operation: &'static str,
        solid: String,
    },
}

/// Convenience type alias for results using [`PolyhedraError`].
pub type Result<T> = std::result::Result<T, PolyhedraError>;
