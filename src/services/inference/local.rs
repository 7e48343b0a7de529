use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::disease::{Disease, AUTO_CROP};
use crate::services::catalog::DiseaseCatalog;
use crate::services::diagnosis_synthesizer::round2;

use super::{InferenceInput, InferenceOutput, InferenceProvider};

const UNFILTERED_CONFIDENCE: (f64, f64) = (0.85, 0.99);
const CROP_FILTERED_CONFIDENCE: (f64, f64) = (0.88, 0.99);

/// Draws a random catalog entry instead of running a model. Useful offline
/// and in demos; never used as a fallback for the remote provider.
pub struct LocalSimulatedProvider {
    catalog: DiseaseCatalog,
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl LocalSimulatedProvider {
    pub fn new(catalog: DiseaseCatalog, delay: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog,
            delay,
            rng: Mutex::new(rng),
        }
    }

    fn draw(&self, crop: &str) -> AppResult<(Disease, f64)> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::other("simulated provider rng lock poisoned"))?;

        if crop != AUTO_CROP {
            let matches = self.catalog.list_by_crop_family(crop);
            if let Some(disease) = matches.choose(&mut *rng) {
                let confidence = draw_confidence(&mut *rng, CROP_FILTERED_CONFIDENCE);
                return Ok(((*disease).clone(), confidence));
            }
            debug!(target: "app::inference", crop, "no catalog entries for crop, drawing from full catalog");
        }

        let disease = self
            .catalog
            .all()
            .choose(&mut *rng)
            .ok_or_else(|| AppError::other("disease catalog is empty"))?;
        let confidence = draw_confidence(&mut *rng, UNFILTERED_CONFIDENCE);
        Ok((disease.clone(), confidence))
    }
}

fn draw_confidence<R: Rng + ?Sized>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    round2(rng.gen_range(low..=high)).clamp(low, high)
}

#[async_trait]
impl InferenceProvider for LocalSimulatedProvider {
    fn name(&self) -> &'static str {
        "local-simulated"
    }

    async fn predict(&self, input: &InferenceInput) -> AppResult<InferenceOutput> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let (disease, confidence) = self.draw(&input.crop)?;
        debug!(
            target: "app::inference",
            provider = self.name(),
            disease = %disease.id,
            confidence,
            "simulated prediction"
        );

        let mut output = InferenceOutput::prediction(disease, confidence);
        output.processing_time_ms = Some(self.delay.as_millis() as u64);
        Ok(output)
    }
}
