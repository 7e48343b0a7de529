use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::disease::Disease;

/// Where the image to analyze lives.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// `data:image/png;base64,...` as produced by a capture widget.
    DataUri(String),
    File(PathBuf),
    Bytes {
        bytes: Vec<u8>,
        mime_type: String,
        file_name: Option<String>,
    },
}

impl ImageSource {
    /// Rebuilds a source from the string form kept in session/history.
    pub fn from_reference(reference: &str) -> Self {
        if reference.trim_start().starts_with("data:") {
            ImageSource::DataUri(reference.to_string())
        } else {
            ImageSource::File(PathBuf::from(reference))
        }
    }

    /// String form stored as `imageUrl`.
    pub fn reference(&self) -> String {
        match self {
            ImageSource::DataUri(uri) => uri.clone(),
            ImageSource::File(path) => path.display().to_string(),
            ImageSource::Bytes { file_name, .. } => {
                format!("memory:{}", file_name.as_deref().unwrap_or("image"))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub image: ImageSource,
    pub crop_hint: Option<String>,
}

impl AnalysisRequest {
    pub fn new(image: ImageSource) -> Self {
        Self {
            image,
            crop_hint: None,
        }
    }

    pub fn with_crop_hint(mut self, crop: impl Into<String>) -> Self {
        self.crop_hint = Some(crop.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlternativePrediction {
    pub disease: Disease,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthBreakdown {
    pub leaf_condition: u8,
    /// Higher is worse.
    pub infection_severity: u8,
    pub color_analysis: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    pub score: u8,
    pub breakdown: HealthBreakdown,
}

/// Normalized circular region of interest over the input image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRegion {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
}

fn default_intensity() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceAssessment {
    pub level: ConfidenceLevel,
    pub multi_disease_warning: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub disease: Disease,
    pub confidence: f64,
    /// Milliseconds spent obtaining the prediction.
    pub processing_time: u64,
    pub alternatives: Vec<AlternativePrediction>,
    pub health_score: HealthScore,
    pub heatmap_regions: Vec<HeatmapRegion>,
    pub confidence_level: ConfidenceLevel,
    pub multi_disease_warning: bool,
}

impl AnalysisResponse {
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// Plain-text summary for sharing or copying to the clipboard.
    pub fn share_text(&self) -> String {
        let steps = self
            .disease
            .treatment
            .immediate
            .iter()
            .enumerate()
            .map(|(index, step)| format!("{}. {}", index + 1, step))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "PlantCare AI Diagnosis\n\nCondition: {}\nConfidence: {}%\nHealth Score: {}/100\n\nTreatment:\n{}",
            self.disease.name,
            self.confidence_percent(),
            self.health_score.score,
            steps
        )
    }
}
