//! Heuristic detector for sensationalist and clickbait headlines.
//!
//! A text is tokenized once, a fixed set of signal metrics is extracted from
//! it and an additive rule policy turns those metrics into a 0-100 score, a
//! coarse [`Label`] and the list of reasons that fired.
//!
//! ```
//! let result = hype_guard::analyze("URGENTE: esto es una BOMBA que nadie vio venir!!!");
//! assert_eq!(result.label, hype_guard::Label::High);
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod metrics;
pub mod scoring;
pub mod vocabulary;

pub use error::{InputError, VocabularyError};
pub use scoring::{add_points, label_from_score, score_metrics, Scorecard};
pub use vocabulary::{CompiledVocabulary, Vocabulary};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Low,
    Medium,
    High,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Label::Low => "LOW",
            Label::Medium => "MEDIUM",
            Label::High => "HIGH",
        })
    }
}

/// Per-signal measurements for one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub caps_ratio: f64,
    pub exclamation_count: usize,
    pub alarm_count: usize,
    pub absolute_count: usize,
    pub clickbait_hits: usize,
    pub hiding_count: usize,
    pub intensifier_count: usize,
    pub suspicious_quotes: usize,
    pub length_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u32,
    pub label: Label,
    pub reasons: Vec<String>,
    pub metrics: Metrics,
    pub tips: Vec<String>,
}

/// Advice attached to every result, independent of the input.
pub const TIPS: [&str; 3] = [
    "¿Qué fuente lo publica? ¿Es confiable?",
    "¿Hay otra fuente independiente que lo confirme?",
    "¿El titular coincide con el contenido completo?",
];

/// Longest text, in characters, accepted by [`validate_input`].
pub const MAX_INPUT_CHARS: usize = 5000;

// ---------------------------------------------------------------------------
// Input checks
// ---------------------------------------------------------------------------

/// Trim `text` and reject it when empty or longer than [`MAX_INPUT_CHARS`].
///
/// The analyzer itself accepts anything; this is for callers that take text
/// from users.
pub fn validate_input(text: &str) -> Result<&str, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let len = trimmed.chars().count();
    if len > MAX_INPUT_CHARS {
        return Err(InputError::TooLong {
            len,
            max: MAX_INPUT_CHARS,
        });
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

// Formatting rounds the exact binary value, so 3/80 (stored just under
// 0.0375) becomes 0.037. Scaling by 1000 first would land on 37.5 and round up.
fn round3(x: f64) -> f64 {
    format!("{x:.3}").parse().unwrap_or(x)
}

/// Scores texts against one compiled vocabulary.
#[derive(Debug, Clone)]
pub struct Analyzer {
    vocabulary: CompiledVocabulary,
}

impl Analyzer {
    pub fn new(vocabulary: Vocabulary) -> Result<Self, VocabularyError> {
        Ok(Self {
            vocabulary: vocabulary.compile()?,
        })
    }

    pub fn vocabulary(&self) -> &CompiledVocabulary {
        &self.vocabulary
    }

    /// Extract every metric from `text` (trimmed first).
    ///
    /// `caps_ratio` is returned unrounded.
    #[tracing::instrument(skip_all)]
    pub fn metrics(&self, text: &str) -> Metrics {
        let raw = text.trim();
        let lower = raw.to_lowercase();
        let tokens = metrics::tokenize(raw);
        let vocab = &self.vocabulary;

        Metrics {
            caps_ratio: metrics::caps_ratio(raw),
            exclamation_count: metrics::count_exclamations(raw),
            alarm_count: metrics::count_phrases_or_words(&lower, &tokens, &vocab.alarm_words),
            absolute_count: metrics::count_phrases_or_words(
                &lower,
                &tokens,
                &vocab.absolute_words,
            ),
            clickbait_hits: metrics::count_patterns(&lower, &vocab.clickbait),
            hiding_count: metrics::count_hiding_words(&tokens, &vocab.hiding_words),
            intensifier_count: metrics::count_intensifiers(
                &lower,
                &tokens,
                &vocab.intensifier_patterns,
                &vocab.intensifier_prefixes,
            ),
            suspicious_quotes: metrics::count_suspicious_quotes(
                raw,
                &lower,
                &vocab.quote_attribution_words,
            ),
            length_words: tokens.len(),
        }
    }

    #[tracing::instrument(skip_all, fields(chars = text.len()))]
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let mut metrics = self.metrics(text);
        let Scorecard { score, mut reasons } = score_metrics(&metrics);
        let label = label_from_score(score);

        if reasons.is_empty() {
            reasons.push(scoring::DEFAULT_REASON.to_string());
        }
        metrics.caps_ratio = round3(metrics.caps_ratio);

        tracing::debug!(score, %label, reasons = reasons.len(), "analysis complete");

        AnalysisResult {
            score,
            label,
            reasons,
            metrics,
            tips: TIPS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

static DEFAULT_ANALYZER: Lazy<Analyzer> = Lazy::new(|| {
    Analyzer::new(Vocabulary::spanish()).expect("built-in vocabulary compiles")
});

impl Default for Analyzer {
    /// The built-in Spanish vocabulary.
    fn default() -> Self {
        DEFAULT_ANALYZER.clone()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyze `text` with the built-in Spanish vocabulary.
pub fn analyze(text: &str) -> AnalysisResult {
    DEFAULT_ANALYZER.analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_text() {
        assert_eq!(validate_input(""), Err(InputError::Empty));
        assert_eq!(validate_input("  \n\t "), Err(InputError::Empty));
    }

    #[test]
    fn validate_trims_and_counts_chars() {
        assert_eq!(validate_input("  hola  "), Ok("hola"));
        let at_limit = "ñ".repeat(MAX_INPUT_CHARS);
        assert!(validate_input(&at_limit).is_ok());
        let over = "a".repeat(MAX_INPUT_CHARS + 1);
        assert_eq!(
            validate_input(&over),
            Err(InputError::TooLong {
                len: MAX_INPUT_CHARS + 1,
                max: MAX_INPUT_CHARS
            })
        );
    }

    #[test]
    fn label_displays_uppercase() {
        assert_eq!(Label::Medium.to_string(), "MEDIUM");
        assert_eq!(
            serde_json::to_string(&Label::High).unwrap(),
            "\"HIGH\""
        );
    }

    #[test]
    fn metrics_are_extracted_from_trimmed_text() {
        let m = DEFAULT_ANALYZER.metrics("   Todo \"colapsó\" en segundos!   ");
        assert_eq!(m.exclamation_count, 1);
        assert_eq!(m.suspicious_quotes, 1);
        assert_eq!(m.length_words, 4);
    }

    #[test]
    fn caps_ratio_is_rounded_in_result() {
        // 1 of 3 letters uppercase.
        let result = analyze("Abc");
        assert_eq!(result.metrics.caps_ratio, 0.333);
    }

    #[test]
    fn caps_ratio_rounds_from_exact_value() {
        // 3 of 80 letters uppercase: 0.0375 is stored as 0.03749999...
        let result = analyze(&format!("ABC {}", "a".repeat(77)));
        assert_eq!(result.metrics.caps_ratio, 0.037);
        assert_eq!(round3(0.0375), 0.037);
        assert_eq!(round3(2.0 / 3.0), 0.667);
        assert_eq!(round3(0.0), 0.0);
    }

    #[test]
    fn empty_text_does_not_panic() {
        let result = analyze("");
        assert_eq!(result.metrics, Metrics::default());
        // Zero words is 15 away from the ideal length.
        assert_eq!(result.score, 75);
        assert_eq!(result.label, Label::High);
    }

    #[test]
    fn default_reason_when_nothing_fires() {
        let text = "El gobierno aprobó ayer en el congreso la ley de presupuestos para el año próximo";
        let result = analyze(text);
        assert_eq!(result.metrics.length_words, 15);
        assert_eq!(result.score, 0);
        assert_eq!(result.reasons, vec![scoring::DEFAULT_REASON.to_string()]);
    }
}
