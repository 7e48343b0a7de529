use crate::error::AppError;
use crate::models::disease::{CropFamily, Disease};

use super::{AppState, CommandError, CommandResult};

/// Catalog entries, optionally for one crop family (`auto` lists all).
pub fn catalog_list(state: &AppState, crop: Option<&str>) -> CommandResult<Vec<Disease>> {
    let catalog = state.catalog();
    let Some(crop) = crop.map(|value| value.trim().to_lowercase()) else {
        return Ok(catalog.all().to_vec());
    };

    if !catalog.is_known_crop(&crop) {
        return Err(AppError::validation(format!("unknown crop '{crop}'")).into());
    }
    Ok(catalog
        .list_by_crop_family(&crop)
        .into_iter()
        .cloned()
        .collect())
}

pub fn catalog_show(state: &AppState, id: &str) -> CommandResult<Disease> {
    state
        .catalog()
        .find_by_id(id.trim())
        .cloned()
        .ok_or_else(|| CommandError::from(AppError::not_found()))
}

pub fn crop_families(state: &AppState) -> Vec<CropFamily> {
    state.catalog().crop_families().to_vec()
}
