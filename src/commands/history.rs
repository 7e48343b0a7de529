use serde::Serialize;

use crate::models::diagnosis::{DiagnosisResult, HealthTrend, ProgressionPoint, SeverityFilter};
use crate::services::history_service::trend_of;

use super::{run_blocking, AppState, CommandResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub trend: HealthTrend,
    pub points: Vec<ProgressionPoint>,
}

pub async fn history_list(
    state: &AppState,
    severity: Option<String>,
) -> CommandResult<Vec<DiagnosisResult>> {
    let history = state.history();
    run_blocking(move || {
        let filter = match severity.as_deref() {
            Some(value) => SeverityFilter::parse(value)?,
            None => SeverityFilter::All,
        };
        history.list_by_severity(filter)
    })
    .await
}

pub async fn history_delete(state: &AppState, id: String) -> CommandResult<bool> {
    let history = state.history();
    run_blocking(move || history.delete(&id)).await
}

pub async fn history_trend(state: &AppState) -> CommandResult<TrendSummary> {
    let history = state.history();
    run_blocking(move || {
        let points = history.progression()?;
        Ok(TrendSummary {
            trend: trend_of(&points),
            points,
        })
    })
    .await
}
