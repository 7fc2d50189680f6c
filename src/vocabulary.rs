//! Word lists and phrase patterns that drive the metric extractors.
//!
//! The built-in tables target Spanish headlines. A [`Vocabulary`] can also be
//! loaded from JSON, which swaps the language or domain without touching the
//! scoring engine.

use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::VocabularyError;

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

const ALARM_WORDS: &[&str] = &[
    "urgente",
    "escándalo",
    "impactante",
    "increíble",
    "bomba",
    "última hora",
    "terror",
    "pánico",
    "secreto",
    "revelado",
    "exclusiva",
    "terrible",
    "horrible",
    "alarmante",
    "dramático",
    "drama",
    "catástrofe",
    "posible",
    "polémico",
    "explosivo",
    "indignante",
    "alternativa",
    "sorprendente",
    "brutal",
    "devastador",
    "alerta",
    "sabotaje",
    "advertencia",
    "destacado",
    "destacados",
    "riesgo",
    "amenaza",
    "peligroso",
    "grave",
    "crítico",
    "inesperado",
    "verdad",
    "potencia",
];

const ABSOLUTE_WORDS: &[&str] = &[
    "siempre",
    "nunca",
    "jamás",
    "100%",
    "nadie",
    "todos",
    "ningún",
    "sin",
    "innumerados",
    "extremo",
    "extrema",
    "correcto",
    "único",
    "única",
];

const CLICKBAIT_PATTERNS: &[&str] = &[
    r"no vas a creer",
    r"lo que pasó",
    r"te va a (sorprender|impactar)",
    r"testigo directo",
    r"grave error",
    r"en estos momentos",
    r"los expertos alertan",
    r"el giro inesperado",
    r"acaba de",
    r"lo que nadie te contó",
    r"el motivo oculto",
    r"el detalle clave",
    r"la razón por la que",
    r"esto lo cambia todo",
    r"esto podría afectar",
    r"sin hacer nada",
    r"sin esfuerzo",
    r"cuando veas",
    r"el final",
    r"graves consecuencias",
    r"no te lo vas a creer",
];

const HIDING_WORDS: &[&str] = &[
    // Demonstratives
    "esto", "esta", "este", "estos", "estas", "eso", "esa", "ese", "esos", "esas", "aquello",
    "aquella", "aquel", "aquellos", "aquellas",
    // Indefinites
    "algo", "alguien", "cosa", "cosas", "tal", "tales", "cierto", "cierta", "ciertos", "ciertas",
    "supuesto", "supuesta", "supuestos", "supuestas", "alguna", "alguno", "algunas", "algunos",
];

const QUOTE_ATTRIBUTION_WORDS: &[&str] = &[
    "dijo", "dice", "afirmó", "afirma", "aseguró", "asegura", "declaró", "declara", "explicó",
    "explica", "según", "comentó", "comenta", "señaló", "señala", "escribió", "escribe",
    "publicó", "publica", "añadió", "añade",
];

const INTENSIFIER_PREFIXES: &[&str] = &["ultra", "mega", "hiper", "super", "súper", "archi"];

fn word_set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn word_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Raw, uncompiled vocabulary tables.
///
/// Word sets hold single words or multi-word phrases. `clickbait_patterns` are
/// regex sources matched against the lowercased text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vocabulary {
    pub alarm_words: BTreeSet<String>,
    pub absolute_words: BTreeSet<String>,
    pub clickbait_patterns: Vec<String>,
    pub hiding_words: BTreeSet<String>,
    pub quote_attribution_words: BTreeSet<String>,
    pub intensifier_prefixes: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::spanish()
    }
}

impl Vocabulary {
    /// The built-in Spanish tables.
    pub fn spanish() -> Self {
        Self {
            alarm_words: word_set(ALARM_WORDS),
            absolute_words: word_set(ABSOLUTE_WORDS),
            clickbait_patterns: word_list(CLICKBAIT_PATTERNS),
            hiding_words: word_set(HIDING_WORDS),
            quote_attribution_words: word_set(QUOTE_ATTRIBUTION_WORDS),
            intensifier_prefixes: word_list(INTENSIFIER_PREFIXES),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, VocabularyError> {
        let json = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Lowercase every word entry and compile the regex tables.
    pub fn compile(self) -> Result<CompiledVocabulary, VocabularyError> {
        let clickbait = self
            .clickbait_patterns
            .iter()
            .enumerate()
            .map(|(index, pattern)| {
                Regex::new(pattern).map_err(|source| VocabularyError::InvalidPattern {
                    index,
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let prefixes: Vec<String> = self
            .intensifier_prefixes
            .iter()
            .map(|p| p.to_lowercase())
            .collect();
        if prefixes.iter().any(|p| p.is_empty()) {
            return Err(VocabularyError::EmptyPrefix);
        }
        let prefix_patterns = prefixes
            .iter()
            .map(|p| {
                Regex::new(&format!(r"\b{}-?[a-záéíóúüñ]", regex::escape(p))).map_err(|source| {
                    VocabularyError::InvalidPrefix {
                        prefix: p.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            alarm = self.alarm_words.len(),
            absolute = self.absolute_words.len(),
            clickbait = clickbait.len(),
            hiding = self.hiding_words.len(),
            attribution = self.quote_attribution_words.len(),
            intensifiers = prefixes.len(),
            "compiled vocabulary"
        );

        Ok(CompiledVocabulary {
            alarm_words: lowercase_set(self.alarm_words),
            absolute_words: lowercase_set(self.absolute_words),
            clickbait,
            hiding_words: lowercase_set(self.hiding_words),
            quote_attribution_words: lowercase_set(self.quote_attribution_words),
            intensifier_prefixes: prefixes,
            intensifier_patterns: prefix_patterns,
        })
    }
}

fn lowercase_set(words: BTreeSet<String>) -> BTreeSet<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

/// Read-only, ready-to-match vocabulary shared by every analysis.
#[derive(Debug, Clone)]
pub struct CompiledVocabulary {
    pub(crate) alarm_words: BTreeSet<String>,
    pub(crate) absolute_words: BTreeSet<String>,
    pub(crate) clickbait: Vec<Regex>,
    pub(crate) hiding_words: BTreeSet<String>,
    pub(crate) quote_attribution_words: BTreeSet<String>,
    pub(crate) intensifier_prefixes: Vec<String>,
    pub(crate) intensifier_patterns: Vec<Regex>,
}

impl CompiledVocabulary {
    pub fn clickbait_pattern_count(&self) -> usize {
        self.clickbait.len()
    }
}
