// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process recogniser backed by the `ocrs` models (feature `ocrs`). The
// published models read Latin script only, so `eng` is the sole language.

use std::path::{Path, PathBuf};

use blackbar_core::error::{BlackbarError, Result};
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use super::{RecognitionResult, TextRecognizer};
use crate::page::Page;

/// The one language the models recognise.
pub const OCRS_LANGUAGE: &str = "eng";

/// The two networks a recogniser is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelKind {
    Detection,
    Recognition,
}

impl ModelKind {
    fn file_name(self) -> &'static str {
        match self {
            Self::Detection => "text-detection.rten",
            Self::Recognition => "text-recognition.rten",
        }
    }
}

/// Where the ocrs tooling caches its downloads.
fn cache_dir() -> PathBuf {
    std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
        .map(|cache| cache.join("ocrs"))
        .unwrap_or_else(|| PathBuf::from("ocrs-models"))
}

/// Directory holding both model files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrsConfig {
    pub model_dir: PathBuf,
}

impl Default for OcrsConfig {
    fn default() -> Self {
        Self::new(cache_dir())
    }
}

impl OcrsConfig {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
        }
    }

    fn model_path(&self, kind: ModelKind) -> PathBuf {
        self.model_dir.join(kind.file_name())
    }
}

fn load_model(path: &Path) -> Result<Model> {
    if !path.is_file() {
        return Err(BlackbarError::OcrUnavailable(format!(
            "no model at {}; fetch the ocrs models into that directory",
            path.display()
        )));
    }
    debug!(path = %path.display(), "Loading model");
    Model::load_file(path)
        .map_err(|err| BlackbarError::OcrUnavailable(format!("{}: {err}", path.display())))
}

/// Recogniser owning a loaded `ocrs` engine, reused for every page.
pub struct OcrsRecognizer {
    engine: OcrEngine,
}

impl OcrsRecognizer {
    /// # Errors
    ///
    /// [`BlackbarError::OcrUnavailable`] if either model is missing or cannot
    /// be loaded.
    #[instrument(skip_all, fields(models = %config.model_dir.display()))]
    pub fn new(config: OcrsConfig) -> Result<Self> {
        let detection = load_model(&config.model_path(ModelKind::Detection))?;
        let recognition = load_model(&config.model_path(ModelKind::Recognition))?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection),
            recognition_model: Some(recognition),
            ..Default::default()
        })
        .map_err(|err| BlackbarError::OcrUnavailable(err.to_string()))?;

        info!("ocrs engine ready");
        Ok(Self { engine })
    }

    fn read(&self, page: &Page) -> std::result::Result<String, String> {
        let rgb = page.as_dynamic().to_rgb8();
        let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions())
            .map_err(|err| format!("unusable page buffer: {err}"))?;
        let input = self.engine.prepare_input(source).map_err(|err| err.to_string())?;
        self.engine.get_text(&input).map_err(|err| err.to_string())
    }
}

impl TextRecognizer for OcrsRecognizer {
    #[instrument(skip_all, fields(page = page.index()))]
    fn recognize(&self, page: &Page, language: &str) -> Result<RecognitionResult> {
        if language != OCRS_LANGUAGE {
            return Err(BlackbarError::Recognition(format!(
                "ocrs reads only {OCRS_LANGUAGE:?}, not {language:?}"
            )));
        }

        let text = self
            .read(page)
            .map_err(|err| BlackbarError::Recognition(format!("page {}: {err}", page.index())))?;
        debug!(chars = text.chars().count(), "Text recognised");

        Ok(RecognitionResult {
            text,
            language: language.to_owned(),
        })
    }

    fn engine_name(&self) -> &str {
        "ocrs"
    }

    fn available_languages(&self) -> Option<Vec<String>> {
        Some(vec![OCRS_LANGUAGE.to_owned()])
    }
}
