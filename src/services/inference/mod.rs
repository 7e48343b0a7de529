//! Prediction sources for the analysis pipeline. The concrete provider is
//! picked once at construction; there is no runtime fallback between them.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::analysis::{AlternativePrediction, HealthScore, HeatmapRegion};
use crate::models::disease::Disease;
use crate::utils::image::ImagePayload;

pub mod local;
pub mod remote;

pub use local::LocalSimulatedProvider;
pub use remote::RemoteHttpProvider;

#[derive(Debug, Clone)]
pub struct InferenceInput {
    pub image: ImagePayload,
    /// Normalized crop family id, `auto` when the user did not pick one.
    pub crop: String,
}

/// What a provider knows about an image. Anything left `None` is filled in
/// by the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceOutput {
    pub disease: Disease,
    pub confidence: f64,
    pub alternatives: Option<Vec<AlternativePrediction>>,
    pub health_score: Option<HealthScore>,
    pub heatmap_regions: Option<Vec<HeatmapRegion>>,
    pub processing_time_ms: Option<u64>,
}

impl InferenceOutput {
    pub fn prediction(disease: Disease, confidence: f64) -> Self {
        Self {
            disease,
            confidence,
            alternatives: None,
            health_score: None,
            heatmap_regions: None,
            processing_time_ms: None,
        }
    }
}

#[async_trait]
pub trait InferenceProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn predict(&self, input: &InferenceInput) -> AppResult<InferenceOutput>;
}
