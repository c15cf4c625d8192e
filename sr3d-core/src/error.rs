/// Error type shared by every SR3D core module
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Size mismatch: expected {expected} components, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("Index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("OBJ parse error on line {line}: {message}")]
    ObjParse { line: usize, message: String },

    #[error("Face {face} of shape '{shape}' references vertex {index}, but the shape has {vertex_count} vertices")]
    InvalidFaceIndex {
        shape: String,
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("Unknown shape handle: {0}")]
    UnknownShape(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Surface error: {0}")]
    Surface(String),
}
