use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::{AppError, AppResult};

const DEFAULT_INFERENCE_URL: &str = "http://localhost:8000/analyze";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SIMULATED_DELAY_MS: u64 = 2500;
const DEFAULT_DATA_DIR: &str = ".plantcare";

/// Where predictions come from. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceMode {
    Local,
    Remote,
}

impl InferenceMode {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "local" | "mock" => Ok(InferenceMode::Local),
            "remote" | "http" => Ok(InferenceMode::Remote),
            other => Err(AppError::validation(format!(
                "unknown inference mode '{other}', expected local or remote"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InferenceMode::Local => "local",
            InferenceMode::Remote => "remote",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inference_mode: InferenceMode,
    pub inference_url: String,
    pub http_timeout: Duration,
    pub simulated_delay: Duration,
    pub data_dir: PathBuf,
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            inference_mode: InferenceMode::Remote,
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            simulated_delay: Duration::from_millis(DEFAULT_SIMULATED_DELAY_MS),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            rng_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(mode) = std::env::var("PLANTCARE_INFERENCE_MODE") {
            config.inference_mode = InferenceMode::parse(&mode)?;
        }

        if let Some(url) = non_empty_var("PLANTCARE_INFERENCE_URL") {
            config.inference_url = url;
        }

        if let Some(secs) = parse_var::<u64>("PLANTCARE_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(secs.max(1));
        }

        if let Some(ms) = parse_var::<u64>("PLANTCARE_SIMULATED_DELAY_MS") {
            config.simulated_delay = Duration::from_millis(ms);
        }

        if let Some(dir) = non_empty_var("PLANTCARE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config.rng_seed = parse_var::<u64>("PLANTCARE_RNG_SEED");

        Ok(config)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("plantcare.sqlite")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = non_empty_var(name)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(target: "app::config", variable = name, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
