use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::analysis::AnalysisResponse;
use crate::models::disease::{Disease, Severity};

/// A diagnosis the user chose to keep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub image_url: String,
    pub disease: Disease,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
}

/// Everything but the generated id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiagnosis {
    pub image_url: String,
    pub disease: Disease,
    pub confidence: f64,
    pub health_score: Option<u8>,
    pub crop_type: Option<String>,
}

impl NewDiagnosis {
    pub fn from_analysis(
        image_url: impl Into<String>,
        response: &AnalysisResponse,
        crop_type: Option<String>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            disease: response.disease.clone(),
            confidence: response.confidence,
            health_score: Some(response.health_score.score),
            crop_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl SeverityFilter {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" | "" => Ok(SeverityFilter::All),
            "low" => Ok(SeverityFilter::Only(Severity::Low)),
            "medium" => Ok(SeverityFilter::Only(Severity::Medium)),
            "high" => Ok(SeverityFilter::Only(Severity::High)),
            other => Err(AppError::validation(format!(
                "unknown severity filter '{other}'"
            ))),
        }
    }

    pub fn matches(self, diagnosis: &DiagnosisResult) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(severity) => diagnosis.disease.severity == severity,
        }
    }
}

/// One point of the oldest-first health progression.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionPoint {
    pub index: usize,
    pub timestamp: i64,
    pub health_score: u8,
    pub confidence_percent: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthTrend {
    Improving,
    Declining,
    Stable,
    /// Not enough history to tell.
    Neutral,
}

impl fmt::Display for HealthTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthTrend::Improving => "improving",
            HealthTrend::Declining => "declining",
            HealthTrend::Stable => "stable",
            HealthTrend::Neutral => "neutral",
        };
        f.write_str(label)
    }
}
