// Configuration module: credentials and endpoint for the Cacoo API.
// Values come from the process environment, optionally seeded from a
// `.env` file in the working directory and a user-level file under the
// platform config directory.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "CACOON_API_KEY";
/// Environment variable overriding the API base endpoint.
pub const ENDPOINT_VAR: &str = "CACOON_ENDPOINT";
/// When truthy, no dotenv file is read.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

/// Production endpoint used when `CACOON_ENDPOINT` is unset.
pub const DEFAULT_ENDPOINT: &str = "https://cacoo.com/api/v1";

/// Errors that can occur while loading configuration.
///
/// Dotenv errors never carry raw line contents so a malformed file cannot
/// leak its secrets to the terminal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Failed to parse dotenv file {path} (error at position {error_index})")]
    DotenvParse { path: PathBuf, error_index: usize },

    #[error("Failed to read dotenv file {path}: {kind}")]
    DotenvIo { path: PathBuf, kind: ErrorKind },

    #[error("Failed to load dotenv file {path}")]
    DotenvUnknown { path: PathBuf },
}

/// Credentials for the API. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    endpoint: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Build a config directly. Trailing slashes on the endpoint are dropped.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Config {
            api_key: api_key.into(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Read the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var_or_none)
    }

    /// Read the config through an arbitrary variable lookup. Split out of
    /// `from_env` so tests don't have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingEnvVar(API_KEY_VAR))?;
        let endpoint = lookup(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        tracing::debug!(endpoint = %endpoint, "configuration loaded");
        Ok(Config::new(api_key, endpoint))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Read an environment variable, returning None if unset, empty, or
/// whitespace-only. Present values are trimmed.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn dotenv_disabled() -> bool {
    matches!(
        env_var_or_none(DOTENV_DISABLED_VAR)
            .map(|v| v.to_ascii_lowercase())
            .as_deref(),
        Some("1" | "true" | "yes")
    )
}

/// Seed the process environment from dotenv files.
///
/// The working-directory `.env` is read first, then `<config dir>/cacoon/.env`.
/// Variables already present in the environment are never overridden, so
/// the first source to define a key wins. Missing files are skipped.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        tracing::debug!("dotenv loading disabled");
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(e) if is_not_found(&e) => {}
        Err(e) => return Err(map_dotenv_error(PathBuf::from(".env"), e)),
    }

    if let Some(path) = user_dotenv_path() {
        match dotenvy::from_path(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
            Err(e) if is_not_found(&e) => {}
            Err(e) => return Err(map_dotenv_error(path, e)),
        }
    }
    Ok(())
}

/// Location of the user-level dotenv file, if the platform has a config dir.
pub fn user_dotenv_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cacoon").join(".env"))
}

fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(err, dotenvy::Error::Io(io_err) if io_err.kind() == ErrorKind::NotFound)
}

fn map_dotenv_error(path: PathBuf, err: dotenvy::Error) -> ConfigError {
    match err {
        dotenvy::Error::LineParse(_, error_index) => ConfigError::DotenvParse { path, error_index },
        dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
            path,
            kind: io_err.kind(),
        },
        _ => ConfigError::DotenvUnknown { path },
    }
}
