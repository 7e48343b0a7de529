use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::disease::AUTO_CROP;

pub const DEFAULT_REGION: &str = "Auto Detect";

/// Which description register the result screen shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceMode {
    #[default]
    Beginner,
    Advanced,
}

impl ExperienceMode {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Ok(ExperienceMode::Beginner),
            "advanced" => Ok(ExperienceMode::Advanced),
            other => Err(AppError::validation(format!(
                "mode must be beginner or advanced, got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub mode: ExperienceMode,
    pub selected_crop: String,
    pub field_mode: bool,
    pub data_contribution: bool,
    pub region: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            mode: ExperienceMode::Beginner,
            selected_crop: AUTO_CROP.to_string(),
            field_mode: false,
            data_contribution: false,
            region: DEFAULT_REGION.to_string(),
        }
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesUpdate {
    pub mode: Option<ExperienceMode>,
    pub selected_crop: Option<String>,
    pub field_mode: Option<bool>,
    pub data_contribution: Option<bool>,
    pub region: Option<String>,
}

impl PreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.selected_crop.is_none()
            && self.field_mode.is_none()
            && self.data_contribution.is_none()
            && self.region.is_none()
    }
}
