//! Error types for fjstatplot operations.
use std::fmt;
use thiserror::Error;

/// Which annotation vector a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    /// Sample labels, tiled across the rows
    Labels,
    /// Group assignments, repeated in contiguous blocks
    Groups,
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationKind::Labels => f.write_str("labels"),
            AnnotationKind::Groups => f.write_str("groups"),
        }
    }
}

/// Main error type for fjstatplot operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input table
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Annotation vector length does not divide the row count
    #[error("The number of {kind} ({count}) does not divide evenly into the number of samples ({rows})")]
    UnevenAnnotation {
        kind: AnnotationKind,
        count: usize,
        rows: usize,
    },

    /// Annotation vector is empty
    #[error("No {0} were provided")]
    EmptyAnnotation(AnnotationKind),

    /// A column with this name already exists
    #[error("Column '{0}' already exists")]
    DuplicateColumn(String),

    /// Inserted column does not match the table height
    #[error("Column '{name}' has {got} cells, table has {expected} rows")]
    ColumnLength {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Invalid gate path pattern
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Chart drawing failed
    #[error("Render error: {0}")]
    Render(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// The table has no numeric column to chart
    #[error("No numeric columns to plot")]
    NothingToPlot,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for fjstatplot operations.
pub type Result<T> = std::result::Result<T, Error>;
