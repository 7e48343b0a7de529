use serde::Deserialize;

use crate::models::preferences::{ExperienceMode, PreferencesUpdate, UserPreferences};

use super::{run_blocking, AppState, CommandResult};

pub async fn preferences_get(state: &AppState) -> CommandResult<UserPreferences> {
    let preferences = state.preferences();
    run_blocking(move || preferences.get()).await
}

pub async fn preferences_update(
    state: &AppState,
    payload: PreferencesUpdatePayload,
) -> CommandResult<UserPreferences> {
    let preferences = state.preferences();
    run_blocking(move || {
        let update = payload.into_update()?;
        preferences.update(update)
    })
    .await
}

/// Loosely typed update as it arrives from a front end.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdatePayload {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub selected_crop: Option<String>,
    #[serde(default)]
    pub field_mode: Option<bool>,
    #[serde(default)]
    pub data_contribution: Option<bool>,
    #[serde(default)]
    pub region: Option<String>,
}

impl PreferencesUpdatePayload {
    fn into_update(self) -> crate::error::AppResult<PreferencesUpdate> {
        let mode = self
            .mode
            .as_deref()
            .map(ExperienceMode::parse)
            .transpose()?;

        Ok(PreferencesUpdate {
            mode,
            selected_crop: self.selected_crop,
            field_mode: self.field_mode,
            data_contribution: self.data_contribution,
            region: self.region,
        })
    }
}
