//! Additive scoring policy and label derivation.
//!
//! Rules are evaluated in a fixed order and each fired rule appends its reason,
//! so the reason list always reads in rule order.

use crate::{Label, Metrics};

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

struct Hyperparameters {
    caps_heavy_threshold: f64,
    caps_heavy_scale: f64,
    caps_moderate_threshold: f64,
    caps_moderate_points: f64,
    exclamation_floor: f64,
    exclamation_step: f64,
    alarm_floor: f64,
    alarm_step: f64,
    absolute_floor: f64,
    absolute_step: f64,
    clickbait_step: f64,
    hiding_floor: f64,
    hiding_step: f64,
    intensifier_floor: f64,
    intensifier_step: f64,
    quote_floor: f64,
    quote_step: f64,
    ideal_length_words: usize,
    length_tolerance: usize,
    length_step: f64,
    score_max: f64,
    label_medium_min: u32,
    label_high_min: u32,
}

static HP: Hyperparameters = Hyperparameters {
    caps_heavy_threshold: 0.25,
    caps_heavy_scale: 100.0,
    caps_moderate_threshold: 0.15,
    caps_moderate_points: 15.0,
    exclamation_floor: 20.0,
    exclamation_step: 4.0,
    alarm_floor: 30.0,
    alarm_step: 20.0,
    absolute_floor: 20.0,
    absolute_step: 15.0,
    clickbait_step: 30.0,
    hiding_floor: 10.0,
    hiding_step: 4.0,
    intensifier_floor: 15.0,
    intensifier_step: 6.0,
    quote_floor: 15.0,
    quote_step: 8.0,
    ideal_length_words: 15,
    length_tolerance: 4,
    length_step: 5.0,
    score_max: 100.0,
    label_medium_min: 34,
    label_high_min: 75,
};

pub const DEFAULT_REASON: &str =
    "No se detectaron señales fuertes de sensacionalismo (según reglas simples).";

pub const LENGTH_REASON: &str = "Largor sospechozo.";

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Final score and the reasons of every rule that fired, in rule order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub score: u32,
    pub reasons: Vec<String>,
}

struct Rule {
    fired: bool,
    points: f64,
    reason: String,
}

/// `max(floor, step * count)`
fn floored(count: usize, floor: f64, step: f64) -> f64 {
    (step * count as f64).max(floor)
}

/// Add `points` and record `reason` when `condition` holds.
///
/// Non-positive points leave both the score and the reasons untouched.
pub fn add_points(
    score: f64,
    reasons: &mut Vec<String>,
    condition: bool,
    points: f64,
    reason: impl Into<String>,
) -> f64 {
    if condition && points > 0.0 {
        reasons.push(reason.into());
        score + points
    } else {
        score
    }
}

fn rules(m: &Metrics) -> [Rule; 9] {
    let caps = m.caps_ratio;
    [
        Rule {
            fired: caps > HP.caps_heavy_threshold,
            points: HP.caps_heavy_scale * caps,
            reason: "Muchas mayúsculas (tono agresivo/sensacionalista).".to_string(),
        },
        // Both caps rules are always evaluated; their ranges never overlap.
        Rule {
            fired: caps > HP.caps_moderate_threshold && caps <= HP.caps_heavy_threshold,
            points: HP.caps_moderate_points,
            reason: "Bastantes mayúsculas (posible tono sensacionalista).".to_string(),
        },
        Rule {
            fired: m.exclamation_count > 0,
            points: floored(
                m.exclamation_count,
                HP.exclamation_floor,
                HP.exclamation_step,
            ),
            reason: format!("Muchas exclamaciones ({}).", m.exclamation_count),
        },
        Rule {
            fired: m.alarm_count > 0,
            points: floored(m.alarm_count, HP.alarm_floor, HP.alarm_step),
            reason: format!("Palabras/frases alarmistas detectadas: {}.", m.alarm_count),
        },
        Rule {
            fired: m.absolute_count > 0,
            points: floored(m.absolute_count, HP.absolute_floor, HP.absolute_step),
            reason: format!("Afirmaciones absolutas detectadas: {}.", m.absolute_count),
        },
        Rule {
            fired: m.clickbait_hits > 0,
            points: HP.clickbait_step * m.clickbait_hits as f64,
            reason: "Frases típicas de clickbait detectadas.".to_string(),
        },
        Rule {
            fired: m.hiding_count > 0,
            points: floored(m.hiding_count, HP.hiding_floor, HP.hiding_step),
            reason: format!(
                "Lenguaje vago/comodín (esto/eso/aquello/algo…): {}.",
                m.hiding_count
            ),
        },
        Rule {
            fired: m.intensifier_count > 0,
            points: floored(
                m.intensifier_count,
                HP.intensifier_floor,
                HP.intensifier_step,
            ),
            reason: format!(
                "Intensificadores/exageración (ultra/mega/hiper/súper…): {}.",
                m.intensifier_count
            ),
        },
        Rule {
            fired: m.suspicious_quotes > 0,
            points: floored(m.suspicious_quotes, HP.quote_floor, HP.quote_step),
            reason: format!(
                "Comillas potencialmente irónicas/no textuales: {}.",
                m.suspicious_quotes
            ),
        },
    ]
}

/// Points from the length rule alone: zero within the tolerance band around
/// the ideal headline length, `length_step` per word of deviation outside it.
pub fn length_points(length_words: usize) -> f64 {
    let delta = length_words.abs_diff(HP.ideal_length_words);
    if delta > HP.length_tolerance {
        HP.length_step * delta as f64
    } else {
        0.0
    }
}

/// Run every rule against `metrics`.
///
/// `metrics.caps_ratio` must be the unrounded ratio.
pub fn score_metrics(metrics: &Metrics) -> Scorecard {
    let mut reasons = Vec::new();
    let mut score = rules(metrics).into_iter().fold(0.0, |score, rule| {
        add_points(score, &mut reasons, rule.fired, rule.points, rule.reason)
    });

    // The length rule bypasses the points guard.
    let length = length_points(metrics.length_words);
    if length > 0.0 {
        score += length;
        reasons.push(LENGTH_REASON.to_string());
    }

    let score = score.min(HP.score_max).round() as u32;
    Scorecard { score, reasons }
}

pub fn label_from_score(score: u32) -> Label {
    if score >= HP.label_high_min {
        Label::High
    } else if score >= HP.label_medium_min {
        Label::Medium
    } else {
        Label::Low
    }
}
