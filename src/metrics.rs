//! Tokenizer and per-signal metric extractors.
//!
//! Every function here is pure and total: the empty string yields an empty
//! token list and zero-valued metrics.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-zÁÉÍÓÚÜÑáéíóúüñ0-9%]+").unwrap());

// Content may not contain either quote character, so the first quote after
// the opener closes the span and must be the same character.
static QUOTED_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"']{1,40})"|'([^"']{1,40})'"#).unwrap());

/// Lowercase word tokens. Accented letters, digits and `%` stay inside a token.
#[tracing::instrument(skip_all)]
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Letters only: `char::is_alphabetic` also accepts letter-numbers such as
/// Roman numerals, which are not counted as letters here.
fn is_letter(c: char) -> bool {
    c.is_alphabetic()
        && !matches!(
            c,
            '\u{16EE}'..='\u{16F0}'
                | '\u{2160}'..='\u{2188}'
                | '\u{3007}'
                | '\u{3021}'..='\u{3029}'
                | '\u{3038}'..='\u{303A}'
        )
}

/// Share of letters that are uppercase, in `[0, 1]`.
///
/// Digits, punctuation, whitespace and letter-numbers are ignored. Text
/// without letters yields `0.0`.
#[tracing::instrument(skip_all)]
pub fn caps_ratio(text: &str) -> f64 {
    let (letters, upper) = text
        .chars()
        .filter(|&c| is_letter(c))
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        });
    if letters == 0 {
        return 0.0;
    }
    upper as f64 / letters as f64
}

#[tracing::instrument(skip_all)]
pub fn count_exclamations(text: &str) -> usize {
    text.matches('!').count()
}

/// Count vocabulary hits.
///
/// Multi-word entries count once when present anywhere in `lower`; single
/// words count every exact token occurrence.
#[tracing::instrument(skip_all)]
pub fn count_phrases_or_words<I, S>(lower: &str, tokens: &[String], vocab: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    vocab
        .into_iter()
        .map(|entry| {
            let entry = entry.as_ref();
            if entry.contains(' ') {
                usize::from(lower.contains(entry))
            } else {
                tokens.iter().filter(|t| t.as_str() == entry).count()
            }
        })
        .sum()
}

/// Number of distinct patterns matching `lower` at least once.
#[tracing::instrument(skip_all)]
pub fn count_patterns(lower: &str, patterns: &[Regex]) -> usize {
    patterns.iter().filter(|p| p.is_match(lower)).count()
}

/// Occurrences of vague-reference words. Repeats count.
#[tracing::instrument(skip_all)]
pub fn count_hiding_words(tokens: &[String], hiding_words: &BTreeSet<String>) -> usize {
    tokens.iter().filter(|t| hiding_words.contains(*t)).count()
}

/// Intensifier prefixes glued or hyphenated to a word ("megacaro",
/// "ultra-rápido") plus prefixes used as standalone tokens.
///
/// "ultra-rápido" counts twice: once for the hyphenated match and once for the
/// `ultra` token the tokenizer splits off.
#[tracing::instrument(skip_all)]
pub fn count_intensifiers(
    lower: &str,
    tokens: &[String],
    prefix_patterns: &[Regex],
    prefixes: &[String],
) -> usize {
    let glued: usize = prefix_patterns
        .iter()
        .map(|p| p.find_iter(lower).count())
        .sum();
    let standalone = tokens.iter().filter(|t| prefixes.contains(t)).count();
    glued + standalone
}

/// Short quoted spans (one to three tokens) in text with no attribution.
///
/// Any attribution marker found as a substring of `lower` disables the check,
/// so "dice" also fires on "dicen".
#[tracing::instrument(skip_all)]
pub fn count_suspicious_quotes(
    raw: &str,
    lower: &str,
    attribution_words: &BTreeSet<String>,
) -> usize {
    if attribution_words
        .iter()
        .any(|marker| lower.contains(marker.as_str()))
    {
        return 0;
    }

    QUOTED_SPAN_RE
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .filter(|content| (1..=3).contains(&tokenize(content.as_str()).len()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{CompiledVocabulary, Vocabulary};

    fn spanish() -> CompiledVocabulary {
        Vocabulary::spanish().compile().unwrap()
    }

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    // -- tokenize --

    #[test]
    fn tokenize_keeps_accents_digits_and_percent() {
        assert_eq!(
            tokenize("¡Ñandú AL 100% en Cádiz, 2024!"),
            toks(&["ñandú", "al", "100%", "en", "cádiz", "2024"])
        );
    }

    #[test]
    fn tokenize_splits_on_hyphen_and_quotes() {
        assert_eq!(
            tokenize("ultra-rápido \"colapsó\""),
            toks(&["ultra", "rápido", "colapsó"])
        );
    }

    #[test]
    fn tokenize_empty_and_symbol_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("!!! ... ???").is_empty());
    }

    // -- caps_ratio --

    #[test]
    fn caps_ratio_without_letters_is_zero() {
        assert_eq!(caps_ratio(""), 0.0);
        assert_eq!(caps_ratio("1234"), 0.0);
        assert_eq!(caps_ratio("!!!"), 0.0);
    }

    #[test]
    fn caps_ratio_ignores_non_letters() {
        assert_eq!(caps_ratio("AB cd 12!!"), 0.5);
        assert_eq!(caps_ratio("ÁÉ"), 1.0);
        assert_eq!(caps_ratio("hola"), 0.0);
    }

    #[test]
    fn caps_ratio_skips_roman_numerals() {
        assert_eq!(caps_ratio("Ⅻ capítulos ª"), 0.0);
        assert_eq!(caps_ratio("ⅫⅣ"), 0.0);
        assert_eq!(caps_ratio("Ⅻ Ab"), 0.5);
    }

    #[test]
    fn caps_ratio_stays_in_unit_interval() {
        for text in ["URGENTE", "Mixed Case Text", "ñ", "123 ABC def ÑÑ"] {
            let r = caps_ratio(text);
            assert!((0.0..=1.0).contains(&r), "{text}: {r}");
        }
    }

    #[test]
    fn exclamations_count_bang_only() {
        assert_eq!(count_exclamations("¡Hola! ¡¡Ya!!"), 3);
        assert_eq!(count_exclamations("sin nada"), 0);
    }

    // -- count_phrases_or_words --

    #[test]
    fn phrase_counts_once_word_counts_each() {
        let text = "última hora: bomba, bomba, bomba. última hora. última hora";
        let tokens = tokenize(text);
        assert_eq!(count_phrases_or_words(text, &tokens, ["última hora"]), 1);
        assert_eq!(count_phrases_or_words(text, &tokens, ["bomba"]), 3);
        assert_eq!(
            count_phrases_or_words(text, &tokens, ["última hora", "bomba"]),
            4
        );
    }

    #[test]
    fn single_words_must_match_whole_tokens() {
        let text = "bombardeo en la ciudad";
        let tokens = tokenize(text);
        assert_eq!(count_phrases_or_words(text, &tokens, ["bomba"]), 0);
    }

    #[test]
    fn alarm_vocabulary_on_sample_headline() {
        let vocab = spanish();
        let text = "urgente: esto es una bomba que nadie vio venir!!!";
        let tokens = tokenize(text);
        assert_eq!(count_phrases_or_words(text, &tokens, &vocab.alarm_words), 2);
        assert_eq!(
            count_phrases_or_words(text, &tokens, &vocab.absolute_words),
            1
        );
    }

    // -- count_patterns --

    #[test]
    fn patterns_count_presence_not_occurrences() {
        let vocab = spanish();
        let text = "no vas a creer lo que pasó. no vas a creer lo que pasó";
        assert_eq!(count_patterns(text, &vocab.clickbait), 2);
    }

    #[test]
    fn near_miss_phrasings_do_not_match() {
        let vocab = spanish();
        // "no te lo vas a creer" does not contain "no vas a creer".
        assert_eq!(count_patterns("no te lo vas a creer", &vocab.clickbait), 1);
        assert_eq!(count_patterns("te va a impactar", &vocab.clickbait), 1);
        assert_eq!(count_patterns("nada que ver", &vocab.clickbait), 0);
    }

    // -- count_hiding_words --

    #[test]
    fn hiding_words_count_repeats() {
        let vocab = spanish();
        let tokens = tokenize("esto, esto y esto: algo pasa con aquello");
        assert_eq!(count_hiding_words(&tokens, &vocab.hiding_words), 5);
        assert_eq!(count_hiding_words(&[], &vocab.hiding_words), 0);
    }

    // -- count_intensifiers --

    #[test]
    fn intensifier_glued_prefix() {
        let vocab = spanish();
        let text = "un precio megacaro";
        let tokens = tokenize(text);
        assert_eq!(
            count_intensifiers(
                text,
                &tokens,
                &vocab.intensifier_patterns,
                &vocab.intensifier_prefixes
            ),
            1
        );
    }

    #[test]
    fn intensifier_hyphenated_counts_match_and_token() {
        let vocab = spanish();
        let text = "un tren ultra-rápido";
        let tokens = tokenize(text);
        assert_eq!(
            count_intensifiers(
                text,
                &tokens,
                &vocab.intensifier_patterns,
                &vocab.intensifier_prefixes
            ),
            2
        );
    }

    #[test]
    fn intensifier_repeated_prefix_counts_every_occurrence() {
        let vocab = spanish();
        let text = "megacaro y megafiesta, mega";
        let tokens = tokenize(text);
        assert_eq!(
            count_intensifiers(
                text,
                &tokens,
                &vocab.intensifier_patterns,
                &vocab.intensifier_prefixes
            ),
            3
        );
    }

    #[test]
    fn intensifier_standalone_word() {
        let vocab = spanish();
        let text = "fue mega";
        let tokens = tokenize(text);
        assert_eq!(
            count_intensifiers(
                text,
                &tokens,
                &vocab.intensifier_patterns,
                &vocab.intensifier_prefixes
            ),
            1
        );
    }

    #[test]
    fn intensifier_requires_word_boundary() {
        let vocab = spanish();
        let text = "la omega final";
        let tokens = tokenize(text);
        assert_eq!(
            count_intensifiers(
                text,
                &tokens,
                &vocab.intensifier_patterns,
                &vocab.intensifier_prefixes
            ),
            0
        );
    }

    #[test]
    fn intensifier_accented_prefix() {
        let vocab = spanish();
        let text = "un súperhéroe y un superhéroe";
        let tokens = tokenize(text);
        assert_eq!(
            count_intensifiers(
                text,
                &tokens,
                &vocab.intensifier_patterns,
                &vocab.intensifier_prefixes
            ),
            2
        );
    }

    // -- count_suspicious_quotes --

    #[test]
    fn short_unattributed_quote_is_suspicious() {
        let vocab = spanish();
        let raw = "Todo \"colapsó\" en segundos";
        let lower = raw.to_lowercase();
        assert_eq!(
            count_suspicious_quotes(raw, &lower, &vocab.quote_attribution_words),
            1
        );
    }

    #[test]
    fn attribution_suppresses_quotes() {
        let vocab = spanish();
        for raw in [
            "Fuentes dicen que todo \"colapsó\" en segundos",
            "El ministro dijo que fue 'un error'",
            "Según el informe, \"nada\" cambió",
        ] {
            let lower = raw.to_lowercase();
            assert_eq!(
                count_suspicious_quotes(raw, &lower, &vocab.quote_attribution_words),
                0,
                "{raw}"
            );
        }
    }

    #[test]
    fn three_tokens_suspicious_four_not() {
        let vocab = spanish();
        let three = "Todo es \"una gran mentira\" hoy";
        let four = "Todo es \"una gran mentira total\" hoy";
        assert_eq!(
            count_suspicious_quotes(three, &three.to_lowercase(), &vocab.quote_attribution_words),
            1
        );
        assert_eq!(
            count_suspicious_quotes(four, &four.to_lowercase(), &vocab.quote_attribution_words),
            0
        );
    }

    #[test]
    fn mismatched_or_symbol_only_quotes_are_ignored() {
        let vocab = spanish();
        let attribution = &vocab.quote_attribution_words;
        let mixed = "un \"caso' raro";
        assert_eq!(count_suspicious_quotes(mixed, &mixed.to_lowercase(), attribution), 0);
        let symbols = "un \"...\" raro";
        assert_eq!(
            count_suspicious_quotes(symbols, &symbols.to_lowercase(), attribution),
            0
        );
    }

    #[test]
    fn long_quoted_content_is_skipped() {
        let vocab = spanish();
        let raw = format!("x \"{}\" y", "a".repeat(41));
        assert_eq!(
            count_suspicious_quotes(&raw, &raw.to_lowercase(), &vocab.quote_attribution_words),
            0
        );
    }

    #[test]
    fn multiple_single_quoted_spans() {
        let vocab = spanish();
        let raw = "El 'plan' y la 'reforma' fracasan";
        assert_eq!(
            count_suspicious_quotes(raw, &raw.to_lowercase(), &vocab.quote_attribution_words),
            2
        );
    }
}
