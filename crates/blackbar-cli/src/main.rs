// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blackbar: command-line entry point.
//
// Parses arguments, builds the OCR / PDF / synthetic-text engines, runs the
// pipeline once and maps the outcome to an exit status:
//
//   0  at least one page was written
//   1  configuration error, unreadable document, or no page written

mod args;

use std::process::ExitCode;

use blackbar_core::error::Result;
use blackbar_core::{FileKind, PipelineConfig, RunReport};
use blackbar_document::{
    Capabilities, FakerGenerator, PdfRasterizer, PdfiumRasterizer, PipelineDriver,
    TesseractConfig, TesseractRecognizer, TextRecognizer,
};
use clap::Parser;

use crate::args::{Args, Engine};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help / --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            err.print().ok();
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let outcome = run(&args);
    match &outcome {
        Ok(report) if report.all_failed() => {
            tracing::error!(pages = report.pages.len(), "No page could be redacted");
        }
        Ok(_) => {}
        Err(err) => {
            tracing::error!(error = %err, class = ?err.class(), "Redaction aborted");
        }
    }
    ExitCode::from(exit_status(&outcome))
}

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/// Process status for a finished run: success as long as one page was
/// written, whatever happened to the others.
fn exit_status(outcome: &Result<RunReport>) -> u8 {
    match outcome {
        Ok(report) if !report.all_failed() => EXIT_SUCCESS,
        _ => EXIT_FAILURE,
    }
}

fn run(args: &Args) -> Result<RunReport> {
    let config = args.to_config()?;
    tracing::info!(
        input = %config.input.display(),
        output = %config.output.display(),
        "Blackbar starting"
    );

    let capabilities = build_capabilities(args, &config)?;
    let driver = PipelineDriver::new(config, capabilities)?;
    let report = driver.run()?;

    if let Some(path) = &args.report {
        match report.write_json(path) {
            Ok(()) => tracing::info!(path = %path.display(), "Run report written"),
            Err(err) => tracing::warn!(
                path = %path.display(),
                error = %err,
                "Run report could not be written"
            ),
        }
    }
    Ok(report)
}

fn build_capabilities(args: &Args, config: &PipelineConfig) -> Result<Capabilities> {
    let recognizer = build_recognizer(args)?;

    // PDFium is only bound when there is a PDF to rasterise.
    let is_pdf = FileKind::from_path(&config.input).is_some_and(|kind| kind.is_pdf());
    let rasterizer: Box<dyn PdfRasterizer> = if is_pdf {
        Box::new(PdfiumRasterizer::new(args.pdfium.clone())?)
    } else {
        Box::new(PdfiumRasterizer::default())
    };

    Ok(Capabilities {
        recognizer,
        rasterizer,
        generator: Box::new(FakerGenerator::new(config.replacement.synthetic_locale)),
    })
}

fn build_recognizer(args: &Args) -> Result<Box<dyn TextRecognizer>> {
    match args.engine {
        Engine::Tesseract => {
            let config = TesseractConfig {
                binary: args.tesseract.clone(),
                tessdata: args.tessdata.clone(),
            };
            Ok(Box::new(TesseractRecognizer::new(config)?))
        }
        Engine::Ocrs => build_ocrs(args),
    }
}

#[cfg(feature = "ocrs")]
fn build_ocrs(args: &Args) -> Result<Box<dyn TextRecognizer>> {
    use blackbar_document::{OcrsConfig, OcrsRecognizer};

    let config = match &args.ocrs_models {
        Some(dir) => OcrsConfig::new(dir),
        None => OcrsConfig::default(),
    };
    Ok(Box::new(OcrsRecognizer::new(config)?))
}

#[cfg(not(feature = "ocrs"))]
fn build_ocrs(_args: &Args) -> Result<Box<dyn TextRecognizer>> {
    Err(blackbar_core::BlackbarError::OcrUnavailable(
        "this build does not include the ocrs engine (rebuild with --features ocrs)".into(),
    ))
}
