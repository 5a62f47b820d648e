mod file_config;

pub use file_config::{FileConfig, TmdbConfig};

use crate::catalog::DEFAULT_IMAGE_BASE_URL;
use crate::server::RequestsLoggingLevel;
use crate::tmdb::DEFAULT_TMDB_API_BASE;
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DB_PATH: &str = "movies.db";
pub const DEFAULT_TMDB_TIMEOUT_SEC: u64 = 10;
pub const DEFAULT_DOTENV_PATH: &str = ".env";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Environment variable {0} must be set to a non-empty value")]
    MissingSecret(&'static str),
}

/// Credentials that must be present before the server starts.
#[derive(Clone)]
pub struct Secrets {
    pub secret_key: String,
    pub tmdb_api_key: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("secret_key", &"<redacted>")
            .field("tmdb_api_key", &"<redacted>")
            .finish()
    }
}

impl Secrets {
    /// Reads the process environment, falling back to `dotenv` for
    /// variables it does not define.
    pub fn from_env_and_dotenv(
        dotenv: &HashMap<String, String>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_dotenv_fallback(|name| std::env::var(name).ok(), dotenv)
    }

    pub fn with_dotenv_fallback<F>(
        lookup: F,
        dotenv: &HashMap<String, String>,
    ) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|name| lookup(name).or_else(|| dotenv.get(name).cloned()))
    }

    /// Reads both secrets through `lookup`, rejecting missing or blank values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigurationError::MissingSecret(name))
        };
        Ok(Self {
            secret_key: read(SECRET_KEY_ENV)?,
            tmdb_api_key: read(TMDB_API_KEY_ENV)?,
        })
    }
}

/// Variables defined in the `.env` file at `path`. A missing file yields no
/// variables, a malformed one is an error.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to read env file: {:?}", path))?
        .map(|item| item.with_context(|| format!("Failed to parse env file: {:?}", path)))
        .collect()
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub tmdb_api_base: String,
    pub tmdb_timeout_sec: u64,
    pub image_base_url: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            port: DEFAULT_PORT,
            logging_level: RequestsLoggingLevel::default(),
            frontend_dir_path: None,
            tmdb_api_base: DEFAULT_TMDB_API_BASE.to_string(),
            tmdb_timeout_sec: DEFAULT_TMDB_TIMEOUT_SEC,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub tmdb_api_base: String,
    pub tmdb_timeout_sec: u64,
    pub image_base_url: String,
    pub secrets: Secrets,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>, secrets: Secrets) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let tmdb = file.tmdb.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.db_path.clone());
        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let tmdb_api_base = tmdb.api_base.unwrap_or_else(|| cli.tmdb_api_base.clone());
        let tmdb_timeout_sec = tmdb.timeout_sec.unwrap_or(cli.tmdb_timeout_sec);
        if tmdb_timeout_sec == 0 {
            bail!("TMDB timeout must be at least 1 second");
        }

        let image_base_url = tmdb
            .image_base_url
            .unwrap_or_else(|| cli.image_base_url.clone());
        for (name, url) in [("TMDB API base", &tmdb_api_base), ("image base URL", &image_base_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("{} must be an http(s) URL, got {:?}", name, url);
            }
        }

        Ok(Self {
            db_path,
            port,
            logging_level,
            frontend_dir_path,
            tmdb_api_base,
            tmdb_timeout_sec,
            image_base_url,
            secrets,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
