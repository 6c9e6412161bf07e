//! Minimal PDF writer used as the paginated chart document.
//!
//! [`PdfDocument`] owns the pages; [`PdfPage`] is a plotters drawing backend
//! that records one page's drawing operations as a PDF content stream. Text
//! uses the standard Helvetica fonts, which every PDF reader provides, so
//! nothing is embedded.
//!
//! # Example
//!
//! ```rust,no_run
//! use fjstatplot::pdf::{PdfDocument, PdfPage};
//! use plotters::prelude::*;
//!
//! let mut document = PdfDocument::new((792.0, 612.0));
//! {
//!     let root = PdfPage::new(&mut document, (1100, 850)).into_drawing_area();
//!     root.fill(&WHITE)?;
//!     root.present()?;
//! }
//! document.save("out.pdf")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
pub mod document;
pub mod metrics;

pub use backend::PdfPage;
pub use document::PdfDocument;

use thiserror::Error;

/// Errors raised while producing a PDF.
#[derive(Error, Debug)]
pub enum PdfError {
    /// IO error while saving
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content stream formatting failed
    #[error("Content stream write error: {0}")]
    Format(#[from] std::fmt::Error),
}
