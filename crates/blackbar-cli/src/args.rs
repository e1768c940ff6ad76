// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use blackbar_core::config::{DEFAULT_DPI, DEFAULT_LANGUAGE, DEFAULT_REPLACEMENT_TEXT};
use blackbar_core::error::Result;
use blackbar_core::{PipelineConfig, ReplacementConfig, SyntheticLocale};
use clap::{Parser, ValueEnum};

/// OCR engine to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// The `tesseract` command-line program.
    Tesseract,
    /// Built-in pure-Rust engine (English only; needs the `ocrs` feature).
    Ocrs,
}

/// Redact images and PDF documents: recognise the text on every page, work
/// out its replacement, and black out the page.
#[derive(Debug, Parser)]
#[command(name = "blackbar", version, about)]
pub struct Args {
    /// Image (png, jpg, jpeg, tif, tiff, bmp) or PDF to redact
    pub input: PathBuf,

    /// Destination; defaults to overwriting the input. For PDFs, pages are
    /// written as `<base>_page_<n>.png` next to it
    #[arg(short = 'o', long = "output_file", alias = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Text that replaces recognised content
    #[arg(
        short = 'r',
        long = "replacement_text",
        alias = "replacement-text",
        default_value = DEFAULT_REPLACEMENT_TEXT
    )]
    pub replacement_text: String,

    /// OCR language code, passed to the engine as is (e.g. eng, deu+fra)
    #[arg(short = 'l', long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// PDF rasterisation resolution
    #[arg(short = 'd', long, default_value_t = DEFAULT_DPI)]
    pub dpi: u32,

    /// Regular expression; only matching spans are replaced
    #[arg(short = 'p', long)]
    pub pattern: Option<String>,

    /// Replace with realistic synthetic text instead of the replacement text
    #[arg(short = 'f', long)]
    pub fake: bool,

    /// Locale for synthetic text (en_US, en_GB, fr_FR, zh_CN, zh_TW, ja_JP,
    /// pt_BR, ar_SA, or a bare language such as `fr`)
    #[arg(long = "faker_locale", alias = "faker-locale", default_value = "en_US")]
    pub faker_locale: String,

    #[arg(long, value_enum, default_value_t = Engine::Tesseract)]
    pub engine: Engine,

    /// Tesseract executable
    #[arg(long, env = "BLACKBAR_TESSERACT", default_value = "tesseract")]
    pub tesseract: PathBuf,

    /// Tesseract language data directory
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata: Option<PathBuf>,

    /// Directory holding the ocrs detection and recognition models
    #[cfg_attr(not(feature = "ocrs"), allow(dead_code))]
    #[arg(long = "ocrs-models")]
    pub ocrs_models: Option<PathBuf>,

    /// PDFium shared library; searched for when omitted
    #[arg(long, env = "PDFIUM_DYNAMIC_LIB_PATH")]
    pub pdfium: Option<PathBuf>,

    /// Write a JSON run report here
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write nothing for pages whose text could not be recognised
    #[arg(long = "skip-unrecognized", alias = "skip_unrecognized")]
    pub skip_unrecognized: bool,
}

impl Args {
    /// Resolve into a pipeline configuration.
    ///
    /// The locale is checked here whether or not `--fake` is set.
    pub fn to_config(&self) -> Result<PipelineConfig> {
        let synthetic_locale: SyntheticLocale = self.faker_locale.parse()?;

        let mut config = PipelineConfig::new(&self.input);
        if let Some(output) = &self.output_file {
            config.output = output.clone();
        }
        config.language = self.language.clone();
        config.dpi = self.dpi;
        config.skip_unrecognized = self.skip_unrecognized;
        config.replacement = ReplacementConfig {
            literal_text: self.replacement_text.clone(),
            pattern: self.pattern.clone(),
            use_synthetic: self.fake,
            synthetic_locale,
        };
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackbar_core::{BlackbarError, Strategy};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("blackbar").chain(argv.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn defaults() {
        let args = parse(&["photo.png"]);
        let config = args.to_config().unwrap();
        assert_eq!(config.output, PathBuf::from("photo.png"));
        assert_eq!(config.replacement.literal_text, "REDACTED");
        assert_eq!(config.language, "eng");
        assert_eq!(config.dpi, 200);
        assert_eq!(config.replacement.strategy(), Strategy::Literal);
        assert_eq!(config.replacement.synthetic_locale, SyntheticLocale::EnUs);
        assert_eq!(args.engine, Engine::Tesseract);
        assert!(args.report.is_none());
    }

    #[test]
    fn short_flags() {
        let args = parse(&[
            "doc.pdf", "-o", "out/doc.pdf", "-r", "X", "-l", "fra", "-d", "150", "-p", r"\d+", "-f",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!(config.output, PathBuf::from("out/doc.pdf"));
        assert_eq!(config.replacement.literal_text, "X");
        assert_eq!(config.language, "fra");
        assert_eq!(config.dpi, 150);
        assert_eq!(config.replacement.pattern.as_deref(), Some(r"\d+"));
        assert!(config.replacement.use_synthetic);
    }

    #[test]
    fn underscore_and_kebab_long_flags() {
        let a = parse(&[
            "a.png", "--output_file", "b.png", "--replacement_text", "Z", "--faker_locale", "fr_FR",
        ]);
        let b = parse(&[
            "a.png", "--output-file", "b.png", "--replacement-text", "Z", "--faker-locale", "fr_FR",
        ]);
        for args in [a, b] {
            let config = args.to_config().unwrap();
            assert_eq!(config.output, PathBuf::from("b.png"));
            assert_eq!(config.replacement.literal_text, "Z");
            assert_eq!(config.replacement.synthetic_locale, SyntheticLocale::FrFr);
        }
    }

    #[test]
    fn invalid_locale_fails_without_fake() {
        let args = parse(&["a.png", "--faker_locale", "tlh_KL"]);
        let err = args.to_config().unwrap_err();
        assert!(matches!(err, BlackbarError::InvalidLocale(_)));
    }

    #[test]
    fn engine_and_report_flags() {
        let args = parse(&[
            "a.pdf",
            "--engine",
            "ocrs",
            "--report",
            "run.json",
            "--skip-unrecognized",
        ]);
        assert_eq!(args.engine, Engine::Ocrs);
        assert_eq!(args.report, Some(PathBuf::from("run.json")));
        assert!(args.to_config().unwrap().skip_unrecognized);
    }

    #[test]
    fn non_numeric_dpi_is_a_parse_error() {
        let result = Args::try_parse_from(["blackbar", "a.pdf", "-d", "high"]);
        assert!(result.is_err());
    }

    #[test]
    fn input_is_required() {
        assert!(Args::try_parse_from(["blackbar"]).is_err());
    }
}
