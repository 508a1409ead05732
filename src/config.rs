use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::Parser;
use std::fs;
use thiserror::Error;
use tracing::{info, warn};

use crate::generator::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration for the studyaid server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the JSON collections and uploaded documents
    pub data_dir: PathBuf,
    /// Address the server binds to
    pub host: String,
    /// Port the server listens on
    pub port: u16,
    /// Largest accepted upload, in MiB
    pub max_upload_mb: u64,
    /// API key for flashcard generation; generation is disabled without it
    pub gemini_api_key: Option<String>,
    /// Model used for flashcard generation
    pub gemini_model: String,
    /// Root URL of the generation API
    pub gemini_base_url: String,
    /// Whether logs are also written to daily files under `data_dir/logs`
    pub log_to_file: bool,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub max_upload_mb: Option<u64>,
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default)]
    pub gemini_model: Option<String>,
    #[serde(default)]
    pub gemini_base_url: Option<String>,
    #[serde(default)]
    pub log_to_file: Option<bool>,
    /// Server URL used by the CLI client; ignored by the server
    #[serde(default)]
    pub server_url: Option<String>,
}

/// Errors raised while reading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Command line arguments for the server
#[derive(Parser, Debug, Default)]
#[clap(name = "studyaid", about = "Study-aid flashcard server")]
pub struct CliArgs {
    /// Directory for subjects, flashcards and uploaded documents
    #[clap(long, env = "STUDYAID_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Address to bind to
    #[clap(long, env = "STUDYAID_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[clap(long, env = "STUDYAID_PORT")]
    pub port: Option<u16>,

    /// Largest accepted upload in MiB
    #[clap(long, env = "STUDYAID_MAX_UPLOAD_MB")]
    pub max_upload_mb: Option<u64>,

    /// API key for flashcard generation
    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Model used for flashcard generation
    #[clap(long, env = "GEMINI_MODEL")]
    pub gemini_model: Option<String>,

    /// Root URL of the generation API
    #[clap(long, env = "GEMINI_BASE_URL")]
    pub gemini_base_url: Option<String>,

    /// Path of an explicit config file, instead of the per-user one
    #[clap(long, env = "STUDYAID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to daily files under the data directory
    #[clap(long)]
    pub log_to_file: bool,

    /// Emit logs as JSON lines
    #[clap(long, env = "STUDYAID_LOG_JSON")]
    pub log_json: bool,

    /// Debug mode
    #[clap(long, env = "STUDYAID_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            data_dir: update.data_dir.unwrap_or(self.data_dir),
            host: update.host.unwrap_or(self.host),
            port: update.port.unwrap_or(self.port),
            max_upload_mb: update.max_upload_mb.unwrap_or(self.max_upload_mb),
            gemini_api_key: update.gemini_api_key.or(self.gemini_api_key),
            gemini_model: update.gemini_model.unwrap_or(self.gemini_model),
            gemini_base_url: update.gemini_base_url.unwrap_or(self.gemini_base_url),
            log_to_file: update.log_to_file.unwrap_or(self.log_to_file),
        }
    }

    /// Returns the upload limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_upload_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }

    /// Returns the `host:port` pair to bind to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Returns the base (default) configuration
///
/// With a data path the collections live in its `data` subdirectory,
/// otherwise in `./data`.
pub fn base_config(data_path: Option<PathBuf>) -> Config {
    let data_dir = data_path.map_or_else(|| PathBuf::from("data"), |path| path.join("data"));

    Config {
        data_dir,
        host: "127.0.0.1".to_string(),
        port: 5000,
        max_upload_mb: 16,
        gemini_api_key: None,
        gemini_model: DEFAULT_MODEL.to_string(),
        gemini_base_url: DEFAULT_BASE_URL.to_string(),
        log_to_file: false,
    }
}

/// Returns the per-user config directory, if the platform has one
pub fn get_config_dir_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "studyaid", "studyaid").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the per-user data directory, if the platform has one
pub fn get_data_dir_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "studyaid", "studyaid").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Loads configuration from a TOML file
///
/// A missing path or file yields an empty update.
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, ConfigError> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    let content = fs::read_to_string(&config_path).inspect_err(|e| {
        warn!("Failed to read config file: {}", e);
    })?;
    let config = toml::from_str::<ConfigUpdate>(&content).inspect_err(|e| {
        warn!("Failed to parse config file: {}", e);
    })?;

    info!("Loaded configuration from {:?}", config_path);
    Ok(config)
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        data_dir: args.data_dir.clone(),
        host: args.host.clone(),
        port: args.port,
        max_upload_mb: args.max_upload_mb,
        gemini_api_key: args.gemini_api_key.clone(),
        gemini_model: args.gemini_model.clone(),
        gemini_base_url: args.gemini_base_url.clone(),
        // A flag can only switch file logging on
        log_to_file: args.log_to_file.then_some(true),
        server_url: None,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: &CliArgs) -> Config {
    let config_path = args.config.clone().or_else(|| match get_config_dir_path() {
        Some(dir) => Some(dir.join(CONFIG_FILE_NAME)),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    });

    let base = base_config(get_data_dir_path());

    // Apply updates in order of increasing precedence
    base
        .apply_update(config_from_file(config_path).unwrap_or_default())
        .apply_update(config_from_args(args))
}


#[cfg(test)]
mod prop_tests;
