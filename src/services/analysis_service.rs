use std::sync::{Arc, Mutex};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{AppConfig, InferenceMode};
use crate::error::{AppError, AppResult};
use crate::models::analysis::{AnalysisRequest, AnalysisResponse, HealthBreakdown, HealthScore};
use crate::models::disease::AUTO_CROP;
use crate::services::catalog::DiseaseCatalog;
use crate::services::confidence;
use crate::services::diagnosis_synthesizer::{DiagnosisSynthesizer, MAX_SCORE, MIN_SCORE};
use crate::services::inference::{
    InferenceInput, InferenceOutput, InferenceProvider, LocalSimulatedProvider, RemoteHttpProvider,
};
use crate::utils::image::load_image;

/// Turns an image into a complete [`AnalysisResponse`]: validate, ask the
/// provider once, fill in whatever it left out.
pub struct AnalysisService {
    provider: Arc<dyn InferenceProvider>,
    synthesizer: DiagnosisSynthesizer,
    rng: Mutex<StdRng>,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn InferenceProvider>, rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            provider,
            synthesizer: DiagnosisSynthesizer::new(DiseaseCatalog::new()),
            rng: Mutex::new(rng),
        }
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let provider: Arc<dyn InferenceProvider> = match config.inference_mode {
            InferenceMode::Local => Arc::new(LocalSimulatedProvider::new(
                DiseaseCatalog::new(),
                config.simulated_delay,
                config.rng_seed,
            )),
            InferenceMode::Remote => Arc::new(RemoteHttpProvider::try_new(
                config.inference_url.clone(),
                config.http_timeout,
            )?),
        };

        info!(
            target: "app::analysis",
            mode = config.inference_mode.as_str(),
            provider = provider.name(),
            "analysis service initialized"
        );

        // Offset so the provider and the synthesizer do not share a stream.
        let synth_seed = config.rng_seed.map(|seed| seed.wrapping_add(1));
        Ok(Self::new(provider, synth_seed))
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn analyze(&self, request: AnalysisRequest) -> AppResult<AnalysisResponse> {
        let image = load_image(&request.image).await?;
        let crop = normalize_crop_hint(request.crop_hint.as_deref());

        debug!(
            target: "app::analysis",
            provider = self.provider.name(),
            crop = %crop,
            bytes = image.size(),
            "starting analysis"
        );

        let input = InferenceInput { image, crop };
        let started = Instant::now();
        let output = self.provider.predict(&input).await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let response = self.normalize(output, elapsed_ms)?;
        info!(
            target: "app::analysis",
            provider = self.provider.name(),
            disease = %response.disease.id,
            confidence = response.confidence,
            level = %response.confidence_level,
            warning = response.multi_disease_warning,
            processing_ms = response.processing_time,
            "analysis complete"
        );
        Ok(response)
    }

    /// Completes a provider prediction. Only confidence and disease are
    /// trusted as-is; level and warning are always recomputed.
    pub fn normalize(&self, output: InferenceOutput, elapsed_ms: u64) -> AppResult<AnalysisResponse> {
        let InferenceOutput {
            disease,
            confidence,
            alternatives,
            health_score,
            heatmap_regions,
            processing_time_ms,
        } = output;
        let confidence = confidence.clamp(0.0, 1.0);

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::other("analysis rng lock poisoned"))?;

        let mut alternatives = match alternatives {
            Some(list) => list
                .into_iter()
                .filter(|alternative| alternative.disease.id != disease.id)
                .collect(),
            None => self
                .synthesizer
                .alternative_predictions(&disease, confidence, &mut *rng),
        };
        alternatives.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let health_score = match health_score {
            Some(score) => clamp_health_score(score),
            None => self
                .synthesizer
                .calculate_health_score(&disease, confidence, &mut *rng),
        };

        let heatmap_regions = if disease.is_healthy() {
            Vec::new()
        } else {
            match heatmap_regions {
                Some(regions) => regions,
                None => self.synthesizer.heatmap_regions(&disease, &mut *rng),
            }
        };
        drop(rng);

        let assessment = confidence::classify(confidence, &alternatives);

        Ok(AnalysisResponse {
            disease,
            confidence,
            processing_time: processing_time_ms.unwrap_or(elapsed_ms),
            alternatives,
            health_score,
            heatmap_regions,
            confidence_level: assessment.level,
            multi_disease_warning: assessment.multi_disease_warning,
        })
    }
}

fn clamp_health_score(score: HealthScore) -> HealthScore {
    let breakdown = score.breakdown;
    HealthScore {
        score: score.score.clamp(MIN_SCORE as u8, MAX_SCORE as u8),
        breakdown: HealthBreakdown {
            leaf_condition: breakdown.leaf_condition.min(100),
            infection_severity: breakdown.infection_severity.min(100),
            color_analysis: breakdown.color_analysis.min(100),
        },
    }
}

/// Lowercased crop id; missing or blank hints become `auto`.
fn normalize_crop_hint(hint: Option<&str>) -> String {
    hint.map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| AUTO_CROP.to_string())
}
