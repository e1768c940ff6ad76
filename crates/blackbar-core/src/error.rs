// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Blackbar.

use thiserror::Error;

use crate::types::ErrorClass;

/// Top-level error type for all Blackbar operations.
#[derive(Debug, Error)]
pub enum BlackbarError {
    // -- Configuration errors (fatal, raised before any page is touched) --
    #[error("input file does not exist: {0}")]
    InputNotFound(String),

    #[error("unsupported file type: {0} (supported: png, jpg, jpeg, tif, tiff, bmp, pdf)")]
    UnsupportedFileKind(String),

    #[error("invalid synthetic locale: {0}")]
    InvalidLocale(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("unsupported output image format: {0}")]
    UnsupportedOutputFormat(String),

    #[error("invalid DPI {0}: must be between 1 and 1200")]
    InvalidDpi(u32),

    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[error("PDF renderer unavailable: {0}")]
    RendererUnavailable(String),

    // -- Document / page errors --
    #[error("PDF could not be opened: {0}")]
    PdfOpen(String),

    #[error("page rasterisation failed: {0}")]
    Rasterize(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("OCR failed: {0}")]
    Recognition(String),

    #[error("failed to write output: {0}")]
    Persist(String),

    // -- Plumbing --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BlackbarError {
    /// Whether this error aborts the run or only the page it happened on.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InputNotFound(_)
            | Self::UnsupportedFileKind(_)
            | Self::InvalidLocale(_)
            | Self::InvalidPattern(_)
            | Self::UnsupportedOutputFormat(_)
            | Self::InvalidDpi(_)
            | Self::OcrUnavailable(_)
            | Self::RendererUnavailable(_) => ErrorClass::Configuration,
            Self::PdfOpen(_) => ErrorClass::Document,
            Self::Rasterize(_)
            | Self::ImageError(_)
            | Self::Recognition(_)
            | Self::Persist(_)
            | Self::Io(_)
            | Self::Serialization(_) => ErrorClass::Page,
        }
    }

    /// Shorthand for `class() == ErrorClass::Configuration`.
    pub fn is_configuration(&self) -> bool {
        self.class() == ErrorClass::Configuration
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BlackbarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_error_is_configuration() {
        let err = BlackbarError::InvalidLocale("xx_YY".into());
        assert!(err.is_configuration());
    }

    #[test]
    fn recognition_error_is_page_scoped() {
        let err = BlackbarError::Recognition("engine crashed".into());
        assert_eq!(err.class(), ErrorClass::Page);
        assert!(!err.is_configuration());
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: BlackbarError = io.into();
        assert_eq!(err.class(), ErrorClass::Page);
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn pdf_open_is_document_scoped() {
        let err = BlackbarError::PdfOpen("truncated xref".into());
        assert_eq!(err.class(), ErrorClass::Document);
    }
}
