// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Replacement policy: decides what recognised text becomes.
//
// Four branches, first match wins:
//
//   synthetic + pattern  each match gets its own freshly generated name
//   synthetic            whole text becomes one generated sentence
//   pattern              each match becomes the literal, rest kept verbatim
//   (neither)            whole text becomes the literal

use blackbar_core::error::{BlackbarError, Result};
use blackbar_core::{ReplacementConfig, Strategy};
use regex::{Captures, NoExpand, Regex};
use tracing::{debug, instrument};

use crate::synth::{FakerGenerator, SyntheticGenerator};

/// Compiled, immutable replacement settings for a whole run.
pub struct ReplacementPolicy {
    strategy: Strategy,
    literal: String,
    pattern: Option<Regex>,
    generator: Box<dyn SyntheticGenerator>,
}

impl std::fmt::Debug for ReplacementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplacementPolicy")
            .field("strategy", &self.strategy)
            .field("literal", &self.literal)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .finish_non_exhaustive()
    }
}

impl ReplacementPolicy {
    /// Compile `config` with an explicit synthetic generator.
    ///
    /// # Errors
    ///
    /// Returns [`BlackbarError::InvalidPattern`] when the pattern does not
    /// compile. This is the only way the policy can fail, and it happens
    /// here, before any page is processed.
    pub fn new(config: &ReplacementConfig, generator: Box<dyn SyntheticGenerator>) -> Result<Self> {
        let pattern = config
            .pattern
            .as_deref()
            .map(|raw| {
                Regex::new(raw).map_err(|err| BlackbarError::InvalidPattern(err.to_string()))
            })
            .transpose()?;

        Ok(Self {
            strategy: config.strategy(),
            literal: config.literal_text.clone(),
            pattern,
            generator,
        })
    }

    /// Compile `config` with a `fake`-backed generator for its locale.
    pub fn from_config(config: &ReplacementConfig) -> Result<Self> {
        Self::new(config, Box::new(FakerGenerator::new(config.synthetic_locale)))
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Replacement text for `source`.
    ///
    /// Deterministic except in the synthetic strategies, where the generator
    /// is consulted once per match (or once per call without a pattern).
    #[instrument(
        skip_all,
        fields(strategy = %self.strategy, source_chars = source.chars().count())
    )]
    pub fn compute(&self, source: &str) -> String {
        let replaced = match (self.strategy, &self.pattern) {
            (Strategy::SyntheticPattern, Some(re)) => re
                .replace_all(source, |_: &Captures<'_>| self.generator.name())
                .into_owned(),
            (Strategy::Pattern, Some(re)) => {
                re.replace_all(source, NoExpand(&self.literal)).into_owned()
            }
            (Strategy::Synthetic, _) => self.generator.sentence(),
            _ => self.literal.clone(),
        };

        debug!(replacement_chars = replaced.chars().count(), "Replacement computed");
        replaced
    }
}
