// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Blackbar redaction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one invocation of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported input file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Png,
    Jpeg,
    Tiff,
    Bmp,
    Pdf,
}

impl FileKind {
    /// Infer the file kind from a bare extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "tif" | "tiff" => Some(Self::Tiff),
            "bmp" => Some(Self::Bmp),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Infer the file kind from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// PDFs expand into many pages; everything else is a single page.
    pub fn is_pdf(&self) -> bool {
        matches!(self, Self::Pdf)
    }
}

/// Classification of errors for the failure policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Bad input or settings: the run stops before any page is processed.
    Configuration,
    /// The whole document is unusable (e.g. a PDF that cannot be opened).
    Document,
    /// Confined to one page; sibling pages carry on.
    Page,
}

/// Lifecycle states of one page as it moves through the processor.
///
/// `Loaded → Recognized → Replaced → Rendered → Persisted`. `Failed` is
/// terminal; a page report keeps the last state reached before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    Loaded,
    Recognized,
    Replaced,
    Rendered,
    Persisted,
    Failed,
}

/// Which replacement strategy was active for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Whole text replaced by the literal.
    Literal,
    /// Each pattern match replaced by the literal.
    Pattern,
    /// Whole text replaced by one synthetic sentence.
    Synthetic,
    /// Each pattern match replaced by its own synthetic value.
    SyntheticPattern,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Literal => "literal",
            Self::Pattern => "pattern",
            Self::Synthetic => "synthetic",
            Self::SyntheticPattern => "synthetic_pattern",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(FileKind::from_extension("PNG"), Some(FileKind::Png));
        assert_eq!(FileKind::from_extension("JpEg"), Some(FileKind::Jpeg));
        assert_eq!(FileKind::from_extension("Pdf"), Some(FileKind::Pdf));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert_eq!(FileKind::from_extension("docx"), None);
        assert_eq!(FileKind::from_path(Path::new("notes")), None);
    }

    #[test]
    fn from_path_uses_last_extension() {
        let kind = FileKind::from_path(Path::new("/scans/archive.v2/doc.TIFF"));
        assert_eq!(kind, Some(FileKind::Tiff));
        assert!(FileKind::from_path(Path::new("doc.pdf")).unwrap().is_pdf());
    }

    #[test]
    fn strategy_display_matches_serde() {
        let json = serde_json::to_string(&Strategy::SyntheticPattern).unwrap();
        assert_eq!(json, format!("\"{}\"", Strategy::SyntheticPattern));
    }
}
