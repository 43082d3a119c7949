/// Error types for mesh evaluation, rendering and import

/// Errors raised while evaluating or drawing a mesh.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfBounds {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("face {face} does not exist, the mesh has {face_count} faces")]
    FaceOutOfBounds { face: usize, face_count: usize },
}

/// Errors raised while reading STL data.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StlError {
    #[error("file too small to be a valid STL ({0} bytes)")]
    TooShort(usize),

    #[error("unexpected end of file in facet {facet} of {expected}")]
    Truncated { facet: usize, expected: usize },

    #[error("failed to parse ASCII STL: {0}")]
    Ascii(String),
}

/// Result type alias for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
