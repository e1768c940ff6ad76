// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run report: one record per page, plus enough about the run to tell which
// input produced which outputs.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{FileKind, PageState, RunId, Strategy};

/// Final disposition of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOutcome {
    /// Redacted and written.
    Persisted,
    /// OCR failed, but the page was redacted and written anyway.
    RecognitionFailed,
    /// Nothing was written for this page.
    Failed,
}

impl PageOutcome {
    /// Whether an artifact exists on disk for the page.
    pub fn wrote_output(&self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// What happened to one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    /// 1-based page index.
    pub index: usize,
    pub output_path: PathBuf,
    pub outcome: PageOutcome,
    /// Last state reached before the page finished or failed.
    pub last_state: PageState,
    /// Error message, if any stage failed.
    pub error: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Length in characters of the computed replacement text.
    pub replacement_chars: Option<usize>,
    /// SHA-256 of the written artifact.
    pub output_hash: Option<String>,
}

impl PageReport {
    /// Blank record for a page that has not been processed yet.
    pub fn pending(index: usize, output_path: PathBuf) -> Self {
        Self {
            index,
            output_path,
            outcome: PageOutcome::Failed,
            last_state: PageState::Loaded,
            error: None,
            width: None,
            height: None,
            replacement_chars: None,
            output_hash: None,
        }
    }
}

/// Summary of a complete pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub input: PathBuf,
    /// SHA-256 of the input file bytes.
    pub input_hash: String,
    pub file_kind: FileKind,
    pub dpi: Option<u32>,
    pub language: String,
    pub strategy: Strategy,
    pub pages: Vec<PageReport>,
}

impl RunReport {
    pub fn new(
        input: PathBuf,
        input_hash: String,
        file_kind: FileKind,
        language: String,
        strategy: Strategy,
    ) -> Self {
        Self {
            run_id: RunId::new(),
            started_at: Utc::now(),
            finished_at: None,
            input,
            input_hash,
            file_kind,
            dpi: None,
            language,
            strategy,
            pages: Vec::new(),
        }
    }

    /// Stamp the finish time.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Pages with an artifact on disk.
    pub fn succeeded(&self) -> usize {
        self.pages.iter().filter(|p| p.outcome.wrote_output()).count()
    }

    /// Pages with nothing written.
    pub fn failed(&self) -> usize {
        self.pages.len() - self.succeeded()
    }

    /// Pages whose OCR failed but which were still redacted.
    pub fn unrecognized(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.outcome == PageOutcome::RecognitionFailed)
            .count()
    }

    /// True when nothing was written, including for a document with no pages.
    pub fn all_failed(&self) -> bool {
        self.succeeded() == 0
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(outcomes: &[PageOutcome]) -> RunReport {
        let mut report = RunReport::new(
            PathBuf::from("doc.pdf"),
            "00".into(),
            FileKind::Pdf,
            "eng".into(),
            Strategy::Literal,
        );
        for (i, outcome) in outcomes.iter().enumerate() {
            let output = PathBuf::from(format!("doc_page_{}.png", i + 1));
            let mut page = PageReport::pending(i + 1, output);
            page.outcome = *outcome;
            report.pages.push(page);
        }
        report
    }

    #[test]
    fn counts_split_by_outcome() {
        let report = report_with(&[
            PageOutcome::Persisted,
            PageOutcome::RecognitionFailed,
            PageOutcome::Failed,
        ]);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.unrecognized(), 1);
        assert!(!report.all_failed());
    }

    #[test]
    fn all_failed_when_nothing_written() {
        let report = report_with(&[PageOutcome::Failed, PageOutcome::Failed]);
        assert!(report.all_failed());
    }

    #[test]
    fn pending_page_has_no_output() {
        let page = PageReport::pending(3, PathBuf::from("x_page_3.png"));
        assert_eq!(page.index, 3);
        assert_eq!(page.outcome, PageOutcome::Failed);
        assert_eq!(page.last_state, PageState::Loaded);
    }

    #[test]
    fn serialises_outcome_in_snake_case() {
        let report = report_with(&[PageOutcome::RecognitionFailed]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pages"][0]["outcome"], "recognition_failed");
        assert_eq!(json["file_kind"], "pdf");
    }
}
