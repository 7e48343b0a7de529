//! Hand-off between the capture, analyzing and result steps of one
//! diagnosis. Missing state sends the caller back to the start instead of
//! failing.

use std::sync::Arc;

use tracing::debug;

use crate::error::AppResult;
use crate::models::analysis::{AnalysisRequest, AnalysisResponse, ImageSource};
use crate::models::disease::AUTO_CROP;
use crate::store::{read_json, write_json, KeyValueStore};

pub const CURRENT_IMAGE_KEY: &str = "current-image";
pub const SELECTED_CROP_KEY: &str = "selected-crop";
pub const ANALYSIS_RESULT_KEY: &str = "analysis-result";

/// Outcome of a step whose prerequisites may be missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Guarded<T> {
    Ready(T),
    RedirectHome,
}

impl<T> Guarded<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Guarded::Ready(value) => Some(value),
            Guarded::RedirectHome => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Guarded::RedirectHome)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingAnalysis {
    pub image: String,
    pub crop: String,
}

impl PendingAnalysis {
    pub fn to_request(&self) -> AnalysisRequest {
        AnalysisRequest::new(ImageSource::from_reference(&self.image)).with_crop_hint(self.crop.clone())
    }
}

pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Starts a new diagnosis. Any result from a previous one is dropped.
    pub fn begin(&self, image: &str, crop: Option<&str>) -> AppResult<()> {
        let crop = crop
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(AUTO_CROP);

        self.store.set(CURRENT_IMAGE_KEY, image)?;
        self.store.set(SELECTED_CROP_KEY, crop)?;
        self.store.remove(ANALYSIS_RESULT_KEY)?;
        debug!(target: "app::session", crop, "session started");
        Ok(())
    }

    pub fn pending_analysis(&self) -> AppResult<Guarded<PendingAnalysis>> {
        let Some(image) = self.store.get(CURRENT_IMAGE_KEY)? else {
            return Ok(Guarded::RedirectHome);
        };
        let crop = self
            .store
            .get(SELECTED_CROP_KEY)?
            .unwrap_or_else(|| AUTO_CROP.to_string());
        Ok(Guarded::Ready(PendingAnalysis { image, crop }))
    }

    pub fn store_result(&self, response: &AnalysisResponse) -> AppResult<()> {
        write_json(self.store.as_ref(), ANALYSIS_RESULT_KEY, response)
    }

    pub fn current_result(&self) -> AppResult<Guarded<(String, AnalysisResponse)>> {
        let image = self.store.get(CURRENT_IMAGE_KEY)?;
        let result = read_json::<AnalysisResponse>(self.store.as_ref(), ANALYSIS_RESULT_KEY)?;
        match (image, result) {
            (Some(image), Some(result)) => Ok(Guarded::Ready((image, result))),
            _ => Ok(Guarded::RedirectHome),
        }
    }

    /// Clears the image and result; the crop choice is kept for the next run.
    pub fn reset(&self) -> AppResult<()> {
        self.store.remove(CURRENT_IMAGE_KEY)?;
        self.store.remove(ANALYSIS_RESULT_KEY)?;
        debug!(target: "app::session", "session reset");
        Ok(())
    }
}
