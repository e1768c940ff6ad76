// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline driver: validates a run, classifies the input, expands it into
// pages and feeds each page to the document processor.

use std::path::{Path, PathBuf};

use blackbar_core::error::{BlackbarError, Result};
use blackbar_core::{FileKind, PipelineConfig, RunReport};
use image::ImageFormat;
use tracing::{info, instrument, warn};

use crate::integrity;
use crate::ocr::TextRecognizer;
use crate::page::{self, Page};
use crate::processor::DocumentProcessor;
use crate::raster::{PageLoad, PdfRasterizer};
use crate::replace::ReplacementPolicy;
use crate::synth::SyntheticGenerator;

/// Extension of every rasterised PDF page artifact.
pub const PAGE_EXTENSION: &str = "png";

/// The external engines a run depends on, built by the caller.
pub struct Capabilities {
    pub recognizer: Box<dyn TextRecognizer>,
    pub rasterizer: Box<dyn PdfRasterizer>,
    pub generator: Box<dyn SyntheticGenerator>,
}

/// A validated, ready-to-run pipeline.
pub struct PipelineDriver {
    config: PipelineConfig,
    kind: FileKind,
    policy: ReplacementPolicy,
    recognizer: Box<dyn TextRecognizer>,
    rasterizer: Box<dyn PdfRasterizer>,
}

impl std::fmt::Debug for PipelineDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineDriver")
            .field("config", &self.config)
            .field("kind", &self.kind)
            .field("policy", &self.policy)
            .field("engine", &self.recognizer.engine_name())
            .finish_non_exhaustive()
    }
}

impl PipelineDriver {
    /// Check every setting and compile the replacement policy.
    ///
    /// All configuration errors surface here, before any page is touched:
    /// missing input, unsupported kind, bad DPI, unwritable output format
    /// and an uncompilable pattern.
    #[instrument(skip_all, fields(input = %config.input.display()))]
    pub fn new(config: PipelineConfig, capabilities: Capabilities) -> Result<Self> {
        if !config.input.is_file() {
            return Err(BlackbarError::InputNotFound(config.input.display().to_string()));
        }

        let kind = FileKind::from_path(&config.input)
            .ok_or_else(|| BlackbarError::UnsupportedFileKind(config.input.display().to_string()))?;

        config.validate_dpi()?;

        if !kind.is_pdf() {
            page::output_format(&config.output)?;
        }

        let policy = ReplacementPolicy::new(&config.replacement, capabilities.generator)?;

        warn_on_missing_language(capabilities.recognizer.as_ref(), &config.language);

        info!(
            kind = ?kind,
            engine = capabilities.recognizer.engine_name(),
            strategy = %policy.strategy(),
            "Pipeline configured"
        );

        Ok(Self {
            config,
            kind,
            policy,
            recognizer: capabilities.recognizer,
            rasterizer: capabilities.rasterizer,
        })
    }

    /// Process the whole document.
    ///
    /// Page-level failures are recorded in the returned report. An `Err`
    /// means the document as a whole could not be processed (input cannot be
    /// read, or the PDF cannot be opened).
    #[instrument(skip(self), fields(input = %self.config.input.display()))]
    pub fn run(&self) -> Result<RunReport> {
        let config = &self.config;
        let input_hash = integrity::hash_file(&config.input)?;
        let mut report = RunReport::new(
            config.input.clone(),
            input_hash,
            self.kind,
            config.language.clone(),
            self.policy.strategy(),
        );

        let processor = DocumentProcessor::new(
            self.recognizer.as_ref(),
            &self.policy,
            &config.language,
            &config.input,
        )
        .skip_unrecognized(config.skip_unrecognized);

        if self.kind.is_pdf() {
            report.dpi = Some(config.dpi);
            let processor = processor.with_format(ImageFormat::Png);
            let pages = &mut report.pages;
            // Each page is processed and dropped before the next is drawn.
            let mut sink = |index: usize, load: PageLoad| {
                let output = page_output_path(&config.output, index);
                pages.push(processor.process(index, load, output));
            };
            self.rasterizer.rasterize(&config.input, config.dpi, &mut sink)?;
        } else {
            let load = Page::open(&config.input);
            report.pages.push(processor.process(1, load, config.output.clone()));
        }

        report.finish();
        info!(
            run_id = %report.run_id,
            pages = report.pages.len(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            unrecognized = report.unrecognized(),
            "Run finished"
        );
        Ok(report)
    }
}

/// Destination of page `index` (1-based) of a PDF whose output base is
/// `base`: `<dir>/<stem>_page_<index>.png`. The base's own extension is
/// dropped.
pub fn page_output_path(base: &Path, index: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("output"));
    let name = format!("{stem}_page_{index}.{PAGE_EXTENSION}");
    match base.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Warn when the engine lists its languages and `language` (possibly a
/// `+`-joined combination) is not among them. The engine still decides.
fn warn_on_missing_language(recognizer: &dyn TextRecognizer, language: &str) {
    let Some(installed) = recognizer.available_languages() else {
        return;
    };
    for code in language.split('+').filter(|c| !c.is_empty()) {
        if !installed.iter().any(|l| l == code) {
            warn!(
                language = code,
                engine = recognizer.engine_name(),
                "Language not reported as installed"
            );
        }
    }
}
