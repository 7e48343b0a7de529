use std::sync::{Arc, Mutex, RwLock};

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::preferences::{PreferencesUpdate, UserPreferences};
use crate::services::catalog::DiseaseCatalog;
use crate::store::{read_json, write_json, KeyValueStore};

pub const PREFERENCES_KEY: &str = "plantcare-preferences";

pub struct PreferencesService {
    store: Arc<dyn KeyValueStore>,
    catalog: DiseaseCatalog,
    cache: RwLock<Option<UserPreferences>>,
    write_lock: Mutex<()>,
}

impl PreferencesService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            catalog: DiseaseCatalog::new(),
            cache: RwLock::new(None),
            write_lock: Mutex::new(()),
        }
    }

    /// Stored preferences, or the defaults when nothing was saved yet.
    pub fn get(&self) -> AppResult<UserPreferences> {
        if let Ok(guard) = self.cache.read() {
            if let Some(preferences) = guard.as_ref() {
                return Ok(preferences.clone());
            }
        }

        self.load()
    }

    /// Shallow merge of `update` over the stored record, persisted whole.
    /// The merge always starts from the store, not the cache.
    pub fn update(&self, update: PreferencesUpdate) -> AppResult<UserPreferences> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::other("preferences lock poisoned"))?;

        let mut current = self.load()?;
        if update.is_empty() {
            return Ok(current);
        }

        if let Some(mode) = update.mode {
            current.mode = mode;
        }

        if let Some(crop) = update.selected_crop.as_ref() {
            let normalized = crop.trim().to_lowercase();
            if !self.catalog.is_known_crop(&normalized) {
                return Err(AppError::validation(format!("unknown crop '{}'", crop.trim())));
            }
            current.selected_crop = normalized;
        }

        if let Some(field_mode) = update.field_mode {
            current.field_mode = field_mode;
        }

        if let Some(data_contribution) = update.data_contribution {
            current.data_contribution = data_contribution;
        }

        if let Some(region) = update.region.as_ref() {
            let trimmed = region.trim();
            if trimmed.is_empty() {
                return Err(AppError::validation("region must not be empty"));
            }
            current.region = trimmed.to_string();
        }

        write_json(self.store.as_ref(), PREFERENCES_KEY, &current)?;
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(current.clone());
        }

        info!(
            target: "app::preferences",
            mode = ?current.mode,
            crop = %current.selected_crop,
            field_mode = current.field_mode,
            "preferences updated"
        );
        Ok(current)
    }

    fn load(&self) -> AppResult<UserPreferences> {
        let preferences = read_json::<UserPreferences>(self.store.as_ref(), PREFERENCES_KEY)?
            .unwrap_or_default();
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(preferences.clone());
        }
        Ok(preferences)
    }
}
