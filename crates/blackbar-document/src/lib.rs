// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// blackbar-document: The redaction pipeline.
//
// Provides text recognition (Tesseract CLI, optional `ocrs`), PDF
// rasterisation (PDFium), replacement text computation (literal, pattern,
// synthetic), full-frame redaction rendering, and the per-page processor and
// document driver that tie them together.

pub mod integrity;
pub mod ocr;
pub mod page;
pub mod pipeline;
pub mod processor;
pub mod raster;
pub mod render;
pub mod replace;
pub mod synth;

// Re-export the primary types so callers can use `blackbar_document::PipelineDriver` etc.
pub use ocr::{RecognitionResult, TesseractConfig, TesseractRecognizer, TextRecognizer};
pub use page::Page;
pub use pipeline::{Capabilities, PipelineDriver, page_output_path};
pub use processor::DocumentProcessor;
pub use raster::{PageLoad, PageSink, PdfRasterizer, PdfiumRasterizer};
pub use render::{RedactedOutput, RedactionRenderer, Region};
pub use replace::ReplacementPolicy;
pub use synth::{FakerGenerator, SyntheticGenerator};

#[cfg(feature = "ocrs")]
pub use ocr::{OcrsConfig, OcrsRecognizer};
