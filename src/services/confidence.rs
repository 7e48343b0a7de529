use crate::models::analysis::{AlternativePrediction, ConfidenceAssessment, ConfidenceLevel};

pub const HIGH_THRESHOLD: f64 = 0.90;
pub const MEDIUM_THRESHOLD: f64 = 0.70;
/// A runner-up above this share raises the multi-disease warning.
pub const ALTERNATIVE_WARNING_THRESHOLD: f64 = 0.15;

/// Buckets the primary confidence and decides whether to warn about a
/// possible co-infection.
///
/// The warning is a heuristic placeholder (low confidence, or a runner-up
/// holding more than 15%), not a calibrated statistical test.
pub fn classify(confidence: f64, alternatives: &[AlternativePrediction]) -> ConfidenceAssessment {
    let level = if confidence >= HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if confidence >= MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    let top_alternative = alternatives
        .iter()
        .map(|alternative| alternative.confidence)
        .fold(None, |best: Option<f64>, value| match best {
            Some(current) if current >= value => Some(current),
            _ => Some(value),
        });

    let multi_disease_warning = confidence < MEDIUM_THRESHOLD
        || top_alternative.map_or(false, |value| value > ALTERNATIVE_WARNING_THRESHOLD);

    ConfidenceAssessment {
        level,
        multi_disease_warning,
    }
}
