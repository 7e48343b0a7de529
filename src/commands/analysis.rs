use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::analysis::AnalysisResponse;
use crate::models::diagnosis::{DiagnosisResult, NewDiagnosis};
use crate::models::disease::AUTO_CROP;
use crate::services::session_service::Guarded;
use crate::utils::image::{validate_image, ImageValidation};

use super::{run_blocking, AppState, CommandError, CommandResult};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePayload {
    /// Data URI or file path.
    pub image: String,
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOutcome {
    pub result: AnalysisResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<DiagnosisResult>,
}

/// Capture -> analyze -> result in one call. The crop falls back to the
/// saved preference when none is given.
pub async fn analyze_image(state: &AppState, payload: AnalyzePayload) -> CommandResult<AnalyzeOutcome> {
    let crop = match payload.crop {
        Some(crop) => crop,
        None => {
            let preferences = state.preferences();
            run_blocking(move || preferences.get()).await?.selected_crop
        }
    };

    let session = state.session();
    session.begin(&payload.image, Some(crop.as_str()))?;
    let pending = match session.pending_analysis()? {
        Guarded::Ready(pending) => pending,
        Guarded::RedirectHome => {
            return Err(CommandError::new("NO_PENDING_IMAGE", "No image selected", None));
        }
    };

    let result = state.analysis().analyze(pending.to_request()).await?;
    session.store_result(&result)?;

    let saved = if payload.save {
        let (image, response) = match session.current_result()? {
            Guarded::Ready(current) => current,
            Guarded::RedirectHome => {
                return Err(CommandError::new("NO_RESULT", "No analysis result to save", None));
            }
        };
        let crop_type = Some(pending.crop).filter(|crop| crop != AUTO_CROP);
        let diagnosis = NewDiagnosis::from_analysis(image, &response, crop_type);
        let history = state.history();
        Some(run_blocking(move || history.save(diagnosis)).await?)
    } else {
        None
    };

    debug!(
        target: "app::command",
        disease = %result.disease.id,
        saved = saved.is_some(),
        "analyze command finished"
    );
    Ok(AnalyzeOutcome { result, saved })
}

/// Pre-upload check for a picked file.
pub fn image_validate(mime_type: &str, size_bytes: u64) -> ImageValidation {
    validate_image(mime_type, size_bytes)
}

/// Share text for the result currently held in the session.
pub fn analysis_share_text(state: &AppState) -> CommandResult<Guarded<String>> {
    let current = state.session().current_result()?;
    Ok(match current {
        Guarded::Ready((_, response)) => Guarded::Ready(response.share_text()),
        Guarded::RedirectHome => Guarded::RedirectHome,
    })
}

/// Discards the in-flight diagnosis ("analyze another").
pub fn analysis_reset(state: &AppState) -> CommandResult<()> {
    state.session().reset().map_err(CommandError::from)
}
