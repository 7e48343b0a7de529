use std::fmt;

use serde::{Deserialize, Serialize};

pub const HEALTHY_ID: &str = "healthy";
pub const AUTO_CROP: &str = "auto";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Multiplier applied to the baseline health score.
    pub fn health_multiplier(self) -> f64 {
        match self {
            Severity::High => 0.85,
            Severity::Medium => 0.92,
            Severity::Low => 1.0,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    pub immediate: Vec<String>,
    pub organic: Vec<String>,
    pub chemical: Vec<String>,
    pub prevention: Vec<String>,
    pub recovery_timeline: String,
}

/// Catalog entry for a known condition, including the healthy sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathogen_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread_mechanism: Option<String>,
    pub crop_family: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub severity: Severity,
    pub treatment: TreatmentPlan,
    pub beginner_description: String,
    pub advanced_description: String,
    #[serde(default)]
    pub common_regions: Vec<String>,
    #[serde(default)]
    pub seasonal_risk: Vec<String>,
    pub health_score_impact: u8,
}

impl Disease {
    pub fn is_healthy(&self) -> bool {
        self.id == HEALTHY_ID
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CropFamily {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}
