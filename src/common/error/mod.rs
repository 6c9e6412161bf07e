//! Unified error type for fjstatplot.
//!
//! Every pipeline stage (loading, annotation, renaming, charting, export)
//! reports failures through the same [`Error`] so the binary has one place
//! to print them.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{AnnotationKind, Error, Result};
