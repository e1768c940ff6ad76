// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blackbar: Core types, configuration and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod report;
pub mod types;

pub use config::{PipelineConfig, ReplacementConfig, SyntheticLocale};
pub use error::BlackbarError;
pub use report::{PageOutcome, PageReport, RunReport};
pub use types::*;
