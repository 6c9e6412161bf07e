//! Common types and utilities shared across the pipeline stages.

// Submodule declarations
pub mod encoding;
pub mod error;

// Re-exports for convenience
pub use error::{AnnotationKind, Error, Result};
