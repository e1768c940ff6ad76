// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run configuration: replacement settings, synthetic locale, and pipeline
// settings. All of it is read-only once a run has started.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BlackbarError, Result};
use crate::types::Strategy;

/// Default literal used when no replacement text is given.
pub const DEFAULT_REPLACEMENT_TEXT: &str = "REDACTED";

/// Default OCR language code (Tesseract naming).
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Default PDF rasterisation resolution.
pub const DEFAULT_DPI: u32 = 200;

/// Upper bound on the rasterisation resolution.
pub const MAX_DPI: u32 = 1200;

/// Locales the synthetic generator can produce text for.
///
/// Parsed from Faker-style tags such as `en_US` or `fr-FR`. A bare language
/// (`en`, `fr`, ...) selects that language's default region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SyntheticLocale {
    #[default]
    EnUs,
    EnGb,
    FrFr,
    ZhCn,
    ZhTw,
    JaJp,
    PtBr,
    ArSa,
}

impl SyntheticLocale {
    /// Every supported locale, in display order.
    pub const ALL: [SyntheticLocale; 8] = [
        Self::EnUs,
        Self::EnGb,
        Self::FrFr,
        Self::ZhCn,
        Self::ZhTw,
        Self::JaJp,
        Self::PtBr,
        Self::ArSa,
    ];

    /// Canonical tag, e.g. `en_US`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::EnGb => "en_GB",
            Self::FrFr => "fr_FR",
            Self::ZhCn => "zh_CN",
            Self::ZhTw => "zh_TW",
            Self::JaJp => "ja_JP",
            Self::PtBr => "pt_BR",
            Self::ArSa => "ar_SA",
        }
    }

    /// Default region for a bare language code.
    fn for_language(language: &str) -> Option<Self> {
        match language.to_ascii_lowercase().as_str() {
            "en" => Some(Self::EnUs),
            "fr" => Some(Self::FrFr),
            "zh" => Some(Self::ZhCn),
            "ja" => Some(Self::JaJp),
            "pt" => Some(Self::PtBr),
            "ar" => Some(Self::ArSa),
            _ => None,
        }
    }
}

impl FromStr for SyntheticLocale {
    type Err = BlackbarError;

    fn from_str(s: &str) -> Result<Self> {
        let normalised = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&normalised))
            .or_else(|| Self::for_language(&normalised))
            .ok_or_else(|| {
                let supported: Vec<&str> = Self::ALL.iter().map(|l| l.tag()).collect();
                BlackbarError::InvalidLocale(format!(
                    "{s} (supported: {})",
                    supported.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for SyntheticLocale {
    type Error = BlackbarError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SyntheticLocale> for String {
    fn from(locale: SyntheticLocale) -> Self {
        locale.tag().to_owned()
    }
}

impl std::fmt::Display for SyntheticLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// How recognised text is turned into replacement text.
///
/// Exactly one strategy is active per run, chosen by priority:
/// synthetic beats pattern beats literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementConfig {
    /// Fixed replacement text.
    pub literal_text: String,
    /// Regular expression selecting the spans to replace.
    pub pattern: Option<String>,
    /// Generate realistic fake values instead of using the literal.
    pub use_synthetic: bool,
    /// Locale for the synthetic generator.
    pub synthetic_locale: SyntheticLocale,
}

impl Default for ReplacementConfig {
    fn default() -> Self {
        Self {
            literal_text: DEFAULT_REPLACEMENT_TEXT.to_owned(),
            pattern: None,
            use_synthetic: false,
            synthetic_locale: SyntheticLocale::default(),
        }
    }
}

impl ReplacementConfig {
    /// The strategy these settings resolve to.
    pub fn strategy(&self) -> Strategy {
        match (self.use_synthetic, self.pattern.is_some()) {
            (true, true) => Strategy::SyntheticPattern,
            (true, false) => Strategy::Synthetic,
            (false, true) => Strategy::Pattern,
            (false, false) => Strategy::Literal,
        }
    }
}

/// Everything one pipeline run needs besides its capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Source image or PDF.
    pub input: PathBuf,
    /// Destination; for PDFs, the base from which page names are derived.
    pub output: PathBuf,
    /// OCR language code, passed through to the engine untouched.
    pub language: String,
    /// PDF rasterisation resolution.
    pub dpi: u32,
    pub replacement: ReplacementConfig,
    /// Drop pages whose recognition failed instead of redacting them anyway.
    pub skip_unrecognized: bool,
}

impl PipelineConfig {
    /// Settings with every default applied; output overwrites the input.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        Self {
            output: input.clone(),
            input,
            language: DEFAULT_LANGUAGE.to_owned(),
            dpi: DEFAULT_DPI,
            replacement: ReplacementConfig::default(),
            skip_unrecognized: false,
        }
    }

    /// Reject resolutions the rasteriser cannot sensibly honour.
    pub fn validate_dpi(&self) -> Result<()> {
        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(BlackbarError::InvalidDpi(self.dpi));
        }
        Ok(())
    }
}
