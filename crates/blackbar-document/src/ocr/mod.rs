// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text recognition: the OCR engine seen as a black box from page + language
// to text. Two backends:
//
// - Tesseract, driven through its command-line interface (default).
// - `ocrs`, a pure-Rust engine (behind the `ocrs` feature gate).

pub mod tesseract;

#[cfg(feature = "ocrs")]
pub mod ocrs_backend;

use blackbar_core::error::Result;
use serde::Serialize;

use crate::page::Page;

pub use tesseract::{TesseractConfig, TesseractRecognizer};

#[cfg(feature = "ocrs")]
pub use ocrs_backend::{OcrsConfig, OcrsRecognizer};

/// Text extracted from one page. Carries no positional information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecognitionResult {
    pub text: String,
    /// Language code the engine was asked to use.
    pub language: String,
}

/// An OCR engine.
///
/// Implementations must be shareable across threads so pages can be handed
/// out in parallel; the pipeline itself drives them sequentially.
pub trait TextRecognizer: Send + Sync {
    /// Extract the text on `page` using the language model `language`.
    ///
    /// Engine failures (corrupt image, unknown language) come back as
    /// [`BlackbarError::Recognition`](blackbar_core::BlackbarError::Recognition).
    fn recognize(&self, page: &Page, language: &str) -> Result<RecognitionResult>;

    /// Short engine name for logs and reports.
    fn engine_name(&self) -> &str;

    /// Languages the engine reports as installed, when it can tell.
    fn available_languages(&self) -> Option<Vec<String>> {
        None
    }
}
