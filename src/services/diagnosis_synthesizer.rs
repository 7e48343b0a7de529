//! Derives the health score, alternative predictions and heatmap regions for
//! a primary diagnosis. Every random draw comes from the caller's `Rng`, so a
//! seeded generator reproduces the same output.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::analysis::{AlternativePrediction, HealthBreakdown, HealthScore, HeatmapRegion};
use crate::models::disease::Disease;
use crate::services::catalog::DiseaseCatalog;

pub const MIN_SCORE: f64 = 5.0;
pub const MAX_SCORE: f64 = 100.0;
/// Upper bound of the upward perturbation added to `100 - score`.
pub const INFECTION_JITTER_MAX: i32 = 15;
pub const LEAF_JITTER: i32 = 10;
pub const COLOR_JITTER: i32 = 8;
pub const MAX_ALTERNATIVES: usize = 2;
const HIGH_CONFIDENCE_CUTOFF: f64 = 0.9;
const LOW_CONFIDENCE_BOOST: f64 = 1.05;

#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosisSynthesizer {
    catalog: DiseaseCatalog,
}

impl DiagnosisSynthesizer {
    pub fn new(catalog: DiseaseCatalog) -> Self {
        Self { catalog }
    }

    /// Overall score from the disease's baseline impact, its severity and the
    /// primary confidence, plus three correlated sub-metrics.
    pub fn calculate_health_score<R: Rng + ?Sized>(
        &self,
        disease: &Disease,
        confidence: f64,
        rng: &mut R,
    ) -> HealthScore {
        let score = base_score(disease, confidence);

        let breakdown = if disease.is_healthy() {
            HealthBreakdown {
                leaf_condition: clamp_metric(95 + rng.gen_range(0..=5)),
                infection_severity: 0,
                color_analysis: clamp_metric(90 + rng.gen_range(0..=10)),
            }
        } else {
            let leaf = (score + rng.gen_range(-LEAF_JITTER..=LEAF_JITTER)).max(10);
            let infection = (100 - score + rng.gen_range(0..=INFECTION_JITTER_MAX)).min(100);
            let color = (score + rng.gen_range(-COLOR_JITTER..=COLOR_JITTER)).max(15);
            HealthBreakdown {
                leaf_condition: clamp_metric(leaf),
                infection_severity: clamp_metric(infection),
                color_analysis: clamp_metric(color),
            }
        };

        HealthScore {
            score: clamp_metric(score),
            breakdown,
        }
    }

    /// Up to two other non-healthy entries sharing the residual probability
    /// mass `1 - primary_confidence`.
    pub fn alternative_predictions<R: Rng + ?Sized>(
        &self,
        primary: &Disease,
        primary_confidence: f64,
        rng: &mut R,
    ) -> Vec<AlternativePrediction> {
        let candidates: Vec<&Disease> = self
            .catalog
            .all()
            .iter()
            .filter(|disease| disease.id != primary.id && !disease.is_healthy())
            .collect();

        let picked: Vec<&Disease> = candidates
            .choose_multiple(rng, MAX_ALTERNATIVES)
            .copied()
            .collect();

        let residual = (1.0 - primary_confidence).max(0.0);
        let shares = match picked.len() {
            0 => Vec::new(),
            1 => vec![residual],
            _ => {
                let first = residual * rng.gen_range(0.5..=0.8);
                vec![first, residual - first]
            }
        };

        picked
            .into_iter()
            .zip(shares)
            .map(|(disease, share)| AlternativePrediction {
                disease: disease.clone(),
                confidence: round2(share).max(0.0),
            })
            .collect()
    }

    /// 2 to 4 salient regions for a diseased leaf; none for a healthy one.
    pub fn heatmap_regions<R: Rng + ?Sized>(
        &self,
        disease: &Disease,
        rng: &mut R,
    ) -> Vec<HeatmapRegion> {
        if disease.is_healthy() {
            return Vec::new();
        }

        let count = rng.gen_range(2..=4);
        (0..count)
            .map(|_| HeatmapRegion {
                x: rng.gen_range(0.2..=0.8),
                y: rng.gen_range(0.2..=0.8),
                radius: rng.gen_range(0.08..=0.23),
                intensity: rng.gen_range(0.5..=1.0),
            })
            .collect()
    }
}

/// Score shown for history entries saved without one.
pub fn estimate_health_score(disease: &Disease) -> u8 {
    if disease.is_healthy() {
        95
    } else {
        clamp_metric((100 - i32::from(disease.health_score_impact)).max(15))
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn base_score(disease: &Disease, confidence: f64) -> i32 {
    let base = 100.0 - f64::from(disease.health_score_impact);
    let confidence_adjust = if confidence > HIGH_CONFIDENCE_CUTOFF {
        1.0
    } else {
        LOW_CONFIDENCE_BOOST
    };
    (base * disease.severity.health_multiplier() * confidence_adjust)
        .round()
        .clamp(MIN_SCORE, MAX_SCORE) as i32
}

fn clamp_metric(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}
