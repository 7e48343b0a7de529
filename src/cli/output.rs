use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::commands::analysis::AnalyzeOutcome;
use crate::commands::history::TrendSummary;
use crate::models::diagnosis::DiagnosisResult;
use crate::models::disease::{CropFamily, Disease};
use crate::models::preferences::UserPreferences;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Plain,
    /// Pretty-printed JSON
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn analysis(&self, outcome: &AnalyzeOutcome) -> io::Result<()> {
        self.emit(outcome, || {
            let result = &outcome.result;
            let mut text = result.share_text();
            text.push_str(&format!(
                "\n\nConfidence level: {}{}",
                result.confidence_level,
                if result.multi_disease_warning {
                    " (possible multiple conditions)"
                } else {
                    ""
                }
            ));
            if !result.alternatives.is_empty() {
                text.push_str("\nAlternatives:");
                for alternative in &result.alternatives {
                    text.push_str(&format!(
                        "\n  - {} ({}%)",
                        alternative.disease.name,
                        (alternative.confidence * 100.0).round()
                    ));
                }
            }
            if let Some(saved) = &outcome.saved {
                text.push_str(&format!("\n\nSaved as {}", saved.id));
            }
            text
        })
    }

    pub fn history(&self, records: &[DiagnosisResult]) -> io::Result<()> {
        self.emit(&records, || {
            if records.is_empty() {
                return "No saved diagnoses".to_string();
            }
            records
                .iter()
                .map(|record| {
                    format!(
                        "{}  {}  {} [{}]  {}%",
                        record.id,
                        chrono::DateTime::<chrono::Utc>::from_timestamp_millis(record.timestamp)
                            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_else(|| record.timestamp.to_string()),
                        record.disease.name,
                        record.disease.severity,
                        (record.confidence * 100.0).round()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    pub fn deleted(&self, id: &str, removed: bool) -> io::Result<()> {
        let value = serde_json::json!({ "id": id, "deleted": removed });
        self.emit(&value, || {
            if removed {
                format!("Deleted {id}")
            } else {
                format!("No diagnosis with id {id}")
            }
        })
    }

    pub fn trend(&self, summary: &TrendSummary) -> io::Result<()> {
        self.emit(summary, || {
            let mut lines = vec![format!("Trend: {}", summary.trend)];
            lines.extend(summary.points.iter().map(|point| {
                format!(
                    "{:>3}. {:>3}/100  {}%  {}",
                    point.index, point.health_score, point.confidence_percent, point.name
                )
            }));
            lines.join("\n")
        })
    }

    pub fn preferences(&self, preferences: &UserPreferences) -> io::Result<()> {
        self.emit(preferences, || {
            format!(
                "mode: {}\ncrop: {}\nfield mode: {}\ndata contribution: {}\nregion: {}",
                format!("{:?}", preferences.mode).to_lowercase(),
                preferences.selected_crop,
                preferences.field_mode,
                preferences.data_contribution,
                preferences.region
            )
        })
    }

    pub fn diseases(&self, diseases: &[Disease]) -> io::Result<()> {
        self.emit(&diseases, || {
            diseases
                .iter()
                .map(|disease| {
                    format!(
                        "{:<20} {:<28} {:<8} {}",
                        disease.id, disease.name, disease.crop_family, disease.severity
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    pub fn disease(&self, disease: &Disease) -> io::Result<()> {
        self.emit(disease, || {
            let mut text = format!(
                "{} ({})\nCrop: {}\nSeverity: {}\n\n{}\n",
                disease.name, disease.id, disease.crop_family, disease.severity, disease.beginner_description
            );
            for (title, steps) in [
                ("Immediate", &disease.treatment.immediate),
                ("Organic", &disease.treatment.organic),
                ("Chemical", &disease.treatment.chemical),
                ("Prevention", &disease.treatment.prevention),
            ] {
                if steps.is_empty() {
                    continue;
                }
                text.push_str(&format!("\n{title}:\n"));
                for step in steps {
                    text.push_str(&format!("  - {step}\n"));
                }
            }
            text.push_str(&format!("\nRecovery: {}", disease.treatment.recovery_timeline));
            text
        })
    }

    pub fn crops(&self, crops: &[CropFamily]) -> io::Result<()> {
        self.emit(&crops, || {
            crops
                .iter()
                .map(|crop| format!("{} {:<8} {}", crop.icon, crop.id, crop.name))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    fn emit<T: Serialize + ?Sized>(&self, value: &T, plain: impl FnOnce() -> String) -> io::Result<()> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value).map_err(io::Error::other)?,
            OutputFormat::Plain => plain(),
        };
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{rendered}")
    }
}
