pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

use crate::config::AppConfig;
use crate::error::AppResult;

/// Loads configuration, starts logging and wires the shared state.
pub fn bootstrap(config: &AppConfig) -> AppResult<commands::AppState> {
    crate::utils::logger::init_logging(&config.log_dir())?;
    commands::AppState::new(config)
}

