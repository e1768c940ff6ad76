// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic replacement text: realistic-looking names and sentences drawn
// from the `fake` crate. This is the only non-deterministic collaborator in
// the pipeline; every call must produce a fresh draw.

use blackbar_core::SyntheticLocale;
use fake::Fake;
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::Name;
use fake::locales::{AR_SA, EN, FR_FR, JA_JP, PT_BR, ZH_CN, ZH_TW};

/// Word count range for generated sentences.
const SENTENCE_WORDS: std::ops::Range<usize> = 4..10;

/// Source of realistic placeholder text.
pub trait SyntheticGenerator: Send + Sync {
    /// A person's name, e.g. to stand in for one matched span.
    fn name(&self) -> String;

    /// A sentence, to stand in for a whole page of text.
    fn sentence(&self) -> String;
}

/// [`SyntheticGenerator`] backed by the `fake` crate for one locale.
#[derive(Debug, Clone, Copy)]
pub struct FakerGenerator {
    locale: SyntheticLocale,
}

impl FakerGenerator {
    pub fn new(locale: SyntheticLocale) -> Self {
        Self { locale }
    }
}

impl SyntheticGenerator for FakerGenerator {
    fn name(&self) -> String {
        match self.locale {
            SyntheticLocale::EnUs | SyntheticLocale::EnGb => Name(EN).fake(),
            SyntheticLocale::FrFr => Name(FR_FR).fake(),
            SyntheticLocale::ZhCn => Name(ZH_CN).fake(),
            SyntheticLocale::ZhTw => Name(ZH_TW).fake(),
            SyntheticLocale::JaJp => Name(JA_JP).fake(),
            SyntheticLocale::PtBr => Name(PT_BR).fake(),
            SyntheticLocale::ArSa => Name(AR_SA).fake(),
        }
    }

    fn sentence(&self) -> String {
        match self.locale {
            SyntheticLocale::EnUs | SyntheticLocale::EnGb => Sentence(EN, SENTENCE_WORDS).fake(),
            SyntheticLocale::FrFr => Sentence(FR_FR, SENTENCE_WORDS).fake(),
            SyntheticLocale::ZhCn => Sentence(ZH_CN, SENTENCE_WORDS).fake(),
            SyntheticLocale::ZhTw => Sentence(ZH_TW, SENTENCE_WORDS).fake(),
            SyntheticLocale::JaJp => Sentence(JA_JP, SENTENCE_WORDS).fake(),
            SyntheticLocale::PtBr => Sentence(PT_BR, SENTENCE_WORDS).fake(),
            SyntheticLocale::ArSa => Sentence(AR_SA, SENTENCE_WORDS).fake(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locale_produces_text() {
        for locale in SyntheticLocale::ALL {
            let generator = FakerGenerator::new(locale);
            assert!(!generator.name().trim().is_empty(), "empty name for {locale}");
            assert!(!generator.sentence().trim().is_empty(), "empty sentence for {locale}");
        }
    }

    #[test]
    fn draws_are_not_memoised() {
        let generator = FakerGenerator::new(SyntheticLocale::EnUs);
        let names: std::collections::HashSet<String> = (0..50).map(|_| generator.name()).collect();
        assert!(names.len() > 1, "50 draws produced a single name");
    }
}
