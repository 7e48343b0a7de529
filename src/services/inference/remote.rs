use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{AnalysisErrorCode, AppError, AppResult};
use crate::models::analysis::{AlternativePrediction, HealthScore, HeatmapRegion};
use crate::models::disease::Disease;
use crate::services::catalog::DiseaseCatalog;

use super::{InferenceInput, InferenceOutput, InferenceProvider};

/// Posts the image to an inference server as `multipart/form-data` and
/// accepts either a full analysis document or a bare model prediction.
#[derive(Debug)]
pub struct RemoteHttpProvider {
    client: reqwest::Client,
    endpoint: String,
    catalog: DiseaseCatalog,
}

/// Response bodies the server may send. Tried in order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemotePayload {
    Structured(StructuredPayload),
    Raw(RawModelPayload),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredPayload {
    disease: Disease,
    confidence: f64,
    #[serde(default)]
    processing_time: Option<u64>,
    #[serde(default)]
    alternatives: Option<Vec<AlternativePrediction>>,
    #[serde(default)]
    health_score: Option<HealthScore>,
    #[serde(default)]
    heatmap_regions: Option<Vec<WireRegion>>,
}

#[derive(Debug, Deserialize)]
struct RawModelPayload {
    #[serde(rename = "class")]
    class_id: String,
    confidence: f64,
    #[serde(default)]
    top_predictions: Vec<RawPrediction>,
    #[serde(default)]
    heatmap_regions: Option<Vec<WireRegion>>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    #[serde(rename = "class")]
    class_id: String,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct WireRegion {
    x: f64,
    y: f64,
    radius: f64,
    #[serde(default)]
    intensity: Option<f64>,
}

impl From<WireRegion> for HeatmapRegion {
    fn from(region: WireRegion) -> Self {
        HeatmapRegion {
            x: region.x.clamp(0.0, 1.0),
            y: region.y.clamp(0.0, 1.0),
            radius: region.radius.max(0.0),
            intensity: region.intensity.unwrap_or(1.0).clamp(0.0, 1.0),
        }
    }
}

impl RemoteHttpProvider {
    pub fn try_new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(AppError::validation("inference endpoint must not be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|err| AppError::other(format!("failed to build inference HTTP client: {err}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim().to_string(),
            catalog: DiseaseCatalog::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(input: &InferenceInput, correlation_id: &str) -> AppResult<Form> {
        let part = Part::bytes(input.image.bytes.clone())
            .file_name(input.image.file_name.clone())
            .mime_str(&input.image.mime_type)
            .map_err(|err| {
                AppError::analysis_with_details(
                    AnalysisErrorCode::InvalidRequest,
                    format!("invalid image mime type: {err}"),
                    Some(correlation_id),
                    Some(json!({ "mimeType": input.image.mime_type })),
                )
            })?;

        Ok(Form::new()
            .part("image", part)
            .text("cropType", input.crop.clone()))
    }

    fn parse_payload(&self, body: &[u8], correlation_id: &str) -> AppResult<InferenceOutput> {
        let value: JsonValue = serde_json::from_slice(body).map_err(|err| {
            AppError::analysis_with_details(
                AnalysisErrorCode::InvalidResponse,
                format!("inference response is not JSON: {err}"),
                Some(correlation_id),
                None,
            )
        })?;

        let payload: RemotePayload = serde_json::from_value(value).map_err(|err| {
            AppError::analysis_with_details(
                AnalysisErrorCode::InvalidResponse,
                format!("unrecognized inference response shape: {err}"),
                Some(correlation_id),
                None,
            )
        })?;

        let output = match payload {
            RemotePayload::Structured(structured) => InferenceOutput {
                disease: structured.disease,
                confidence: structured.confidence,
                alternatives: structured.alternatives,
                health_score: structured.health_score,
                heatmap_regions: structured
                    .heatmap_regions
                    .map(|regions| regions.into_iter().map(HeatmapRegion::from).collect()),
                processing_time_ms: structured.processing_time,
            },
            RemotePayload::Raw(raw) => self.resolve_raw(raw),
        };

        if !output.confidence.is_finite() || !(0.0..=1.0).contains(&output.confidence) {
            return Err(AppError::analysis_with_details(
                AnalysisErrorCode::InvalidResponse,
                "inference confidence outside [0, 1]",
                Some(correlation_id),
                Some(json!({ "confidence": output.confidence })),
            ));
        }

        if let Some(score) = output.health_score.as_ref() {
            if !health_score_in_range(score) {
                return Err(AppError::analysis_with_details(
                    AnalysisErrorCode::InvalidResponse,
                    "inference health score outside [0, 100]",
                    Some(correlation_id),
                    Some(json!({ "healthScore": score })),
                ));
            }
        }

        Ok(output)
    }

    fn resolve_raw(&self, raw: RawModelPayload) -> InferenceOutput {
        let disease = self.catalog.resolve_prediction(&raw.class_id);
        let alternatives = if raw.top_predictions.is_empty() {
            None
        } else {
            Some(
                raw.top_predictions
                    .into_iter()
                    .filter(|prediction| prediction.class_id != raw.class_id)
                    .map(|prediction| AlternativePrediction {
                        disease: self.catalog.resolve_prediction(&prediction.class_id),
                        confidence: prediction.confidence.clamp(0.0, 1.0),
                    })
                    .collect(),
            )
        };

        InferenceOutput {
            disease,
            confidence: raw.confidence,
            alternatives,
            health_score: None,
            heatmap_regions: raw
                .heatmap_regions
                .map(|regions| regions.into_iter().map(HeatmapRegion::from).collect()),
            processing_time_ms: None,
        }
    }

    fn map_http_error(status: StatusCode, correlation_id: &str) -> AppError {
        let details = Some(json!({ "status": status.as_u16() }));
        match status {
            status if status.is_server_error() => AppError::analysis_with_details(
                AnalysisErrorCode::InferenceUnavailable,
                format!("inference server unavailable (status {})", status.as_u16()),
                Some(correlation_id),
                details,
            ),
            StatusCode::BAD_REQUEST
            | StatusCode::NOT_FOUND
            | StatusCode::PAYLOAD_TOO_LARGE
            | StatusCode::UNSUPPORTED_MEDIA_TYPE
            | StatusCode::UNPROCESSABLE_ENTITY => AppError::analysis_with_details(
                AnalysisErrorCode::InvalidRequest,
                format!("inference server rejected the request (status {})", status.as_u16()),
                Some(correlation_id),
                details,
            ),
            status => AppError::analysis_with_details(
                AnalysisErrorCode::Unknown,
                format!("inference server returned status {}", status.as_u16()),
                Some(correlation_id),
                details,
            ),
        }
    }

    fn error_from_reqwest(err: reqwest::Error, correlation_id: &str) -> AppError {
        if err.is_timeout() {
            AppError::analysis_with_details(
                AnalysisErrorCode::HttpTimeout,
                "inference request timed out",
                Some(correlation_id),
                None,
            )
        } else if err.is_connect() {
            AppError::analysis_with_details(
                AnalysisErrorCode::InferenceUnavailable,
                format!("could not connect to inference server: {err}"),
                Some(correlation_id),
                None,
            )
        } else if let Some(status) = err.status() {
            Self::map_http_error(status, correlation_id)
        } else {
            AppError::analysis_with_details(
                AnalysisErrorCode::Unknown,
                format!("inference request failed: {err}"),
                Some(correlation_id),
                None,
            )
        }
    }
}

fn health_score_in_range(score: &HealthScore) -> bool {
    let breakdown = &score.breakdown;
    [
        score.score,
        breakdown.leaf_condition,
        breakdown.infection_severity,
        breakdown.color_analysis,
    ]
    .iter()
    .all(|value| *value <= 100)
}

pub mod testing {
    use super::*;

    /// Status mapping with a fixed correlation id, for asserting error codes.
    pub fn map_http_error(status: StatusCode) -> AppError {
        RemoteHttpProvider::map_http_error(status, "test-correlation-id")
    }
}

#[async_trait]
impl InferenceProvider for RemoteHttpProvider {
    fn name(&self) -> &'static str {
        "remote-http"
    }

    async fn predict(&self, input: &InferenceInput) -> AppResult<InferenceOutput> {
        let correlation_id = Uuid::new_v4().to_string();
        let form = Self::build_form(input, &correlation_id)?;

        debug!(
            target: "app::inference::remote",
            correlation_id = %correlation_id,
            endpoint = %self.endpoint,
            bytes = input.image.size(),
            crop = %input.crop,
            "posting image for inference"
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| Self::error_from_reqwest(err, &correlation_id))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                target: "app::inference::remote",
                correlation_id = %correlation_id,
                status = status.as_u16(),
                "inference server returned non-success status"
            );
            return Err(Self::map_http_error(status, &correlation_id));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| Self::error_from_reqwest(err, &correlation_id))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            target: "app::inference::remote",
            correlation_id = %correlation_id,
            latency_ms,
            content_length = body.len(),
            "inference server responded"
        );

        let mut output = self.parse_payload(&body, &correlation_id)?;
        if output.processing_time_ms.is_none() {
            output.processing_time_ms = Some(latency_ms);
        }
        Ok(output)
    }
}
