//! Error types

use thiserror::Error;

/// Reasons the geometry code produces less output than it was given input for.
/// None of these abort a conversion; they are reported and the offending part skipped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Plane points are collinear")]
    DegeneratePlane,

    #[error("Planes don't meet in a single point")]
    NoIntersection,

    #[error("Face has fewer than 3 vertices")]
    DegenerateFace,

    #[error("Brush has fewer than 4 valid faces")]
    InvalidBrush,

    #[error("Patch grid is {found_rows}x{found_columns}, expected {rows}x{columns}")]
    MalformedPatchGrid {
        rows: usize,
        columns: usize,
        found_rows: usize,
        found_columns: usize,
    },
}

/// An error encountered while parsing a map file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Line {line}: couldn't read `{token}` as a number")]
    InvalidNumber { line: usize, token: String },

    #[error("Line {line}: brush face is malformed")]
    InvalidFace { line: usize },

    #[error("Line {line}: patch definition is malformed")]
    InvalidPatch { line: usize },

    #[error("Unexpected end of file inside a block")]
    UnexpectedEof,
}

/// An error encountered while writing the output map.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Error writing map")]
    Io(#[from] std::io::Error),
}

/// Standard result type.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;
