//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! errors of the crates fjstatplot builds on to the unified Error type.

use super::types::Error;
use crate::pdf::PdfError;
use plotters::drawing::DrawingAreaErrorKind;

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Other(format!("Write error: {}", err))
    }
}

impl From<PdfError> for Error {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Io(e) => Error::Io(e),
            other => Error::Render(other.to_string()),
        }
    }
}

impl From<DrawingAreaErrorKind<PdfError>> for Error {
    fn from(err: DrawingAreaErrorKind<PdfError>) -> Self {
        Error::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AnnotationKind;

    #[test]
    fn test_uneven_annotation_message() {
        let err = Error::UnevenAnnotation {
            kind: AnnotationKind::Labels,
            count: 3,
            rows: 8,
        };
        assert_eq!(
            err.to_string(),
            "The number of labels (3) does not divide evenly into the number of samples (8)"
        );
    }

    #[test]
    fn test_regex_conversion() {
        let err: Error = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, Error::Pattern(_)));
    }
}
