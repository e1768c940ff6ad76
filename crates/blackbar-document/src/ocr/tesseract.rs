// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tesseract backend: runs the `tesseract` executable on a temporary PNG of
// the page and reads plain text from stdout.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use blackbar_core::error::{BlackbarError, Result};
use tracing::{debug, info, instrument};

use super::{RecognitionResult, TextRecognizer};
use crate::page::Page;

/// Where to find Tesseract and its trained data.
#[derive(Debug, Clone)]
pub struct TesseractConfig {
    /// Executable name or path.
    pub binary: PathBuf,
    /// Overrides `TESSDATA_PREFIX` for the child process.
    pub tessdata: Option<PathBuf>,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            tessdata: None,
        }
    }
}

/// OCR through the Tesseract command-line interface.
#[derive(Debug)]
pub struct TesseractRecognizer {
    config: TesseractConfig,
}

impl TesseractRecognizer {
    /// Check the executable runs and build a recogniser around it.
    ///
    /// # Errors
    ///
    /// Returns [`BlackbarError::OcrUnavailable`] when the binary cannot be run.
    #[instrument(skip_all, fields(binary = %config.binary.display()))]
    pub fn new(config: TesseractConfig) -> Result<Self> {
        let output = Command::new(&config.binary)
            .arg("--version")
            .output()
            .map_err(|err| {
                BlackbarError::OcrUnavailable(format!(
                    "cannot run {}: {}",
                    config.binary.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            return Err(BlackbarError::OcrUnavailable(format!(
                "{} --version exited with {}",
                config.binary.display(),
                output.status
            )));
        }

        // Older releases print the banner on stderr.
        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        let version = parse_version(&combined).unwrap_or_else(|| "unknown".to_owned());

        info!(%version, "Tesseract engine ready");
        Ok(Self { config })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        if let Some(tessdata) = &self.config.tessdata {
            cmd.env("TESSDATA_PREFIX", tessdata);
        }
        cmd
    }
}

impl TextRecognizer for TesseractRecognizer {
    #[instrument(skip_all, fields(page = page.index(), language))]
    fn recognize(&self, page: &Page, language: &str) -> Result<RecognitionResult> {
        let start = Instant::now();

        let png = page.to_png_bytes()?;
        let mut input = tempfile::Builder::new()
            .prefix("blackbar-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|err| BlackbarError::Recognition(format!("temporary file: {err}")))?;
        input
            .write_all(&png)
            .and_then(|()| input.flush())
            .map_err(|err| BlackbarError::Recognition(format!("temporary file: {err}")))?;

        let output = self
            .command()
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .map_err(|err| {
                BlackbarError::Recognition(format!(
                    "failed to run {}: {}",
                    self.config.binary.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BlackbarError::Recognition(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(
            chars = text.chars().count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Tesseract recognition complete"
        );

        Ok(RecognitionResult {
            text,
            language: language.to_owned(),
        })
    }

    fn engine_name(&self) -> &str {
        "tesseract"
    }

    fn available_languages(&self) -> Option<Vec<String>> {
        let output = self.command().arg("--list-langs").output().ok()?;
        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        Some(parse_lang_list(&combined))
    }
}

/// Pull the version number out of `tesseract --version` output
/// (`tesseract 5.3.0` or `tesseract v5.3.0`).
fn parse_version(banner: &str) -> Option<String> {
    banner
        .lines()
        .filter(|line| line.starts_with("tesseract"))
        .find_map(|line| line.split_whitespace().nth(1))
        .map(|v| v.trim_start_matches('v').to_owned())
}

/// Parse the output of `tesseract --list-langs`.
fn parse_lang_list(listing: &str) -> Vec<String> {
    let mut langs = Vec::new();
    let mut in_list = false;

    for line in listing.lines().map(str::trim) {
        if line.contains("List of available languages") {
            in_list = true;
            continue;
        }
        if in_list && !line.is_empty() && !line.contains(':') {
            langs.push(line.to_owned());
        }
    }

    langs
}
