use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::diagnosis::{
    DiagnosisResult, HealthTrend, NewDiagnosis, ProgressionPoint, SeverityFilter,
};
use crate::services::diagnosis_synthesizer::estimate_health_score;
use crate::store::{read_json, write_json, KeyValueStore};

pub const HISTORY_KEY: &str = "plantcare-diagnoses";
const TREND_WINDOW: usize = 3;
const TREND_THRESHOLD: f64 = 5.0;

/// Saved diagnoses, kept most-recent-first as one JSON array.
pub struct HistoryService {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn list(&self) -> AppResult<Vec<DiagnosisResult>> {
        Ok(read_json::<Vec<DiagnosisResult>>(self.store.as_ref(), HISTORY_KEY)?.unwrap_or_default())
    }

    pub fn save(&self, input: NewDiagnosis) -> AppResult<DiagnosisResult> {
        let _guard = self.lock()?;

        let record = DiagnosisResult {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            image_url: input.image_url,
            disease: input.disease,
            confidence: input.confidence,
            health_score: input.health_score,
            crop_type: input.crop_type,
        };

        let mut records = self.list()?;
        records.insert(0, record.clone());
        write_json(self.store.as_ref(), HISTORY_KEY, &records)?;

        info!(
            target: "app::history",
            id = %record.id,
            disease = %record.disease.id,
            total = records.len(),
            "diagnosis saved"
        );
        Ok(record)
    }

    /// Removes the record with `id`; `false` when nothing matched.
    pub fn delete(&self, id: &str) -> AppResult<bool> {
        let _guard = self.lock()?;

        let mut records = self.list()?;
        let Some(position) = records.iter().position(|record| record.id == id) else {
            debug!(target: "app::history", id, "delete requested for unknown diagnosis");
            return Ok(false);
        };
        records.remove(position);
        write_json(self.store.as_ref(), HISTORY_KEY, &records)?;

        info!(target: "app::history", id, remaining = records.len(), "diagnosis deleted");
        Ok(true)
    }

    pub fn find(&self, id: &str) -> AppResult<DiagnosisResult> {
        self.list()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(AppError::not_found)
    }

    pub fn list_by_severity(&self, filter: SeverityFilter) -> AppResult<Vec<DiagnosisResult>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect())
    }

    /// Oldest-first chart data. Records saved without a score use the
    /// catalog estimate.
    pub fn progression(&self) -> AppResult<Vec<ProgressionPoint>> {
        Ok(progression_points(&self.list()?))
    }

    pub fn health_trend(&self) -> AppResult<HealthTrend> {
        Ok(trend_of(&self.progression()?))
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| AppError::other("history lock poisoned"))
    }
}

pub fn progression_points(records: &[DiagnosisResult]) -> Vec<ProgressionPoint> {
    records
        .iter()
        .rev()
        .enumerate()
        .map(|(index, record)| ProgressionPoint {
            index: index + 1,
            timestamp: record.timestamp,
            health_score: record
                .health_score
                .unwrap_or_else(|| estimate_health_score(&record.disease)),
            confidence_percent: (record.confidence * 100.0).round() as u32,
            name: record.disease.name.clone(),
        })
        .collect()
}

/// Mean of the last three points against the mean of everything before
/// them (at least the first point).
pub fn trend_of(points: &[ProgressionPoint]) -> HealthTrend {
    if points.len() < 2 {
        return HealthTrend::Neutral;
    }

    let recent = &points[points.len().saturating_sub(TREND_WINDOW)..];
    let older = &points[..points.len().saturating_sub(TREND_WINDOW).max(1)];

    let recent_avg = mean_score(recent);
    let older_avg = mean_score(older);

    if recent_avg > older_avg + TREND_THRESHOLD {
        HealthTrend::Improving
    } else if recent_avg < older_avg - TREND_THRESHOLD {
        HealthTrend::Declining
    } else {
        HealthTrend::Stable
    }
}

fn mean_score(points: &[ProgressionPoint]) -> f64 {
    let total: f64 = points.iter().map(|point| f64::from(point.health_score)).sum();
    total / points.len() as f64
}
