// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document processor: carries one page through
//
//   Loaded → Recognized → Replaced → Rendered → Persisted
//
// and turns every page-level error into a `PageReport` instead of an `Err`.
// Nothing here can abort sibling pages.

use std::path::{Path, PathBuf};

use blackbar_core::{BlackbarError, PageOutcome, PageReport, PageState};
use image::ImageFormat;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::ocr::TextRecognizer;
use crate::page::Page;
use crate::raster::PageLoad;
use crate::render::{RedactedOutput, RedactionRenderer};
use crate::replace::ReplacementPolicy;

/// Per-run settings and collaborators shared by every page.
pub struct DocumentProcessor<'a> {
    recognizer: &'a dyn TextRecognizer,
    policy: &'a ReplacementPolicy,
    renderer: RedactionRenderer,
    language: &'a str,
    source: &'a Path,
    /// Fixed encoding for artifacts; `None` means "follow the extension".
    format: Option<ImageFormat>,
    skip_unrecognized: bool,
}

impl<'a> DocumentProcessor<'a> {
    pub fn new(
        recognizer: &'a dyn TextRecognizer,
        policy: &'a ReplacementPolicy,
        language: &'a str,
        source: &'a Path,
    ) -> Self {
        Self {
            recognizer,
            policy,
            renderer: RedactionRenderer::default(),
            language,
            source,
            format: None,
            skip_unrecognized: false,
        }
    }

    /// Encode every artifact as `format` regardless of its extension.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Drop pages whose recognition failed instead of redacting them anyway.
    pub fn skip_unrecognized(mut self, skip: bool) -> Self {
        self.skip_unrecognized = skip;
        self
    }

    /// Run one page to completion. Never fails; the report says what happened.
    #[instrument(skip(self, load), fields(output = %output_path.display()))]
    pub fn process(&self, index: usize, load: PageLoad, output_path: PathBuf) -> PageReport {
        let mut report = PageReport::pending(index, output_path);

        let page = match load {
            Ok(page) => page,
            Err(err) => {
                error!(index, %err, "Page could not be loaded");
                return fail(report, err);
            }
        };
        report.width = Some(page.width());
        report.height = Some(page.height());

        let recognized = match self.recognize(&page) {
            Ok(text) => {
                report.last_state = PageState::Recognized;
                Some(text)
            }
            Err(err) if self.skip_unrecognized => {
                warn!(index, %err, "Recognition failed; page skipped");
                return fail(report, err);
            }
            Err(err) => {
                warn!(index, %err, "Recognition failed; redacting page anyway");
                report.error = Some(err.to_string());
                None
            }
        };

        if let Some(text) = recognized {
            let replacement = self.policy.compute(&text);
            debug!(index, replacement = %replacement, "Replacement text");
            report.replacement_chars = Some(replacement.chars().count());
            report.last_state = PageState::Replaced;
        }

        let output = RedactedOutput::new(self.renderer.render(&page), report.output_path.clone());
        report.last_state = PageState::Rendered;
        // The decoded page is no longer needed once its redaction exists.
        drop(page);

        let persisted = match self.format {
            Some(format) => output.persist_as(format),
            None => output.persist(),
        };

        match persisted {
            Ok(hash) => {
                report.output_hash = Some(hash);
                report.last_state = PageState::Persisted;
                report.outcome = if recognized_ok(&report) {
                    PageOutcome::Persisted
                } else {
                    PageOutcome::RecognitionFailed
                };
                info!(
                    index,
                    source = %self.source.display(),
                    destination = %report.output_path.display(),
                    "Page redacted"
                );
                report
            }
            Err(err) => {
                error!(index, %err, "Redacted page could not be written");
                fail(report, err)
            }
        }
    }

    fn recognize(&self, page: &Page) -> Result<String, BlackbarError> {
        let result = self.recognizer.recognize(page, self.language)?;
        trace!(index = page.index(), text = %result.text, "Recognised text");
        Ok(result.text)
    }
}

/// Recognition succeeded iff no error was recorded before persisting.
fn recognized_ok(report: &PageReport) -> bool {
    report.error.is_none()
}

/// Record `err` and leave the page in `Failed`, keeping `last_state` as the
/// stage the page had reached.
fn fail(mut report: PageReport, err: BlackbarError) -> PageReport {
    report.outcome = PageOutcome::Failed;
    report.error = Some(match report.error.take() {
        Some(earlier) => format!("{earlier}; {err}"),
        None => err.to_string(),
    });
    report
}
