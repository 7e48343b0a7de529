//! Boundary between front ends (the CLI today) and the services. Commands
//! take the shared [`AppState`], run blocking store work off the async
//! runtime and flatten every failure into a serializable [`CommandError`].

pub mod analysis;
pub mod catalog;
pub mod history;
pub mod preferences;

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::services::analysis_service::AnalysisService;
use crate::services::catalog::DiseaseCatalog;
use crate::services::history_service::HistoryService;
use crate::services::preferences_service::PreferencesService;
use crate::services::session_service::SessionService;
use crate::store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};

#[derive(Clone)]
pub struct AppState {
    analysis_service: Arc<AnalysisService>,
    history_service: Arc<HistoryService>,
    preferences_service: Arc<PreferencesService>,
    session_service: Arc<SessionService>,
    catalog: DiseaseCatalog,
}

impl AppState {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let db_pool = DbPool::new(config.database_path())?;
        let persistent: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(db_pool));
        let analysis = AnalysisService::from_config(config)?;

        info!(
            target: "app::state",
            data_dir = %config.data_dir.display(),
            mode = config.inference_mode.as_str(),
            "application state ready"
        );
        Ok(Self::from_parts(analysis, persistent))
    }

    /// Wires services over an explicit persistent store. The session always
    /// lives in memory.
    pub fn from_parts(analysis: AnalysisService, persistent: Arc<dyn KeyValueStore>) -> Self {
        let session_store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        Self {
            analysis_service: Arc::new(analysis),
            history_service: Arc::new(HistoryService::new(Arc::clone(&persistent))),
            preferences_service: Arc::new(PreferencesService::new(persistent)),
            session_service: Arc::new(SessionService::new(session_store)),
            catalog: DiseaseCatalog::new(),
        }
    }

    pub fn analysis(&self) -> Arc<AnalysisService> {
        Arc::clone(&self.analysis_service)
    }

    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history_service)
    }

    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences_service)
    }

    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session_service)
    }

    pub fn catalog(&self) -> DiseaseCatalog {
        self.catalog
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for CommandError {}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation {
                message, details, ..
            } => CommandError::new("VALIDATION_ERROR", message, details),
            AppError::NotFound => {
                CommandError::new("NOT_FOUND", "The requested record does not exist", None)
            }
            AppError::Conflict { message } => CommandError::new("CONFLICT", message, None),
            AppError::Analysis {
                code,
                message,
                correlation_id,
                details,
            } => {
                let mut merged = JsonMap::new();
                if let Some(existing) = details {
                    match existing {
                        JsonValue::Object(map) => merged.extend(map),
                        value => {
                            merged.insert("info".to_string(), value);
                        }
                    }
                }
                if let Some(id) = correlation_id {
                    merged.insert("correlationId".to_string(), JsonValue::String(id));
                }
                let detail_value = if merged.is_empty() {
                    None
                } else {
                    Some(JsonValue::Object(merged))
                };
                CommandError::new(code.as_str(), message, detail_value)
            }
            AppError::Database { message } => {
                error!(target: "app::command", %message, "database error in command");
                CommandError::new("UNKNOWN", message, None)
            }
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new("UNKNOWN", "Stored data could not be read", None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "File system access failed", None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message, None)
            }
        }
    }
}

pub(crate) async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> AppResult<T> + Send + 'static,
) -> CommandResult<T> {
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("background task failed: {err}"), None))?
        .map_err(CommandError::from)
}
