//! Check configuration.
//!
//! Precedence, lowest to highest: built-in defaults, environment
//! (`INITIATIVE_CATALOG_*`), explicit overrides from the caller.

use crate::catalog::CatalogFormat;
use crate::duplicates::DEFAULT_SIMILARITY_THRESHOLD;
use crate::logging::{default_log_level, normalize_level, normalize_log_dir, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "INITIATIVE_CATALOG_LOG_LEVEL";
/// Environment variable enabling file logs in the given absolute directory.
pub const ENV_LOG_DIR: &str = "INITIATIVE_CATALOG_LOG_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    /// Explicit catalog format; inferred from the path when `None`.
    pub format: Option<CatalogFormat>,
    /// Report categories outside `known_categories()` as advisories.
    pub strict_categories: bool,
    pub similarity_threshold: f64,
    pub log_level: String,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            format: None,
            strict_categories: false,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CheckConfig {
    /// Defaults overlaid with process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`; blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = non_blank(lookup(ENV_LOG_LEVEL)) {
            config.log_level = level;
        }
        if let Some(dir) = non_blank(lookup(ENV_LOG_DIR)) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        config
    }

    /// Checks every knob before any work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.similarity_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        normalize_level(&self.log_level).map_err(ConfigError::Logging)?;
        if let Some(dir) = &self.log_dir {
            normalize_log_dir(dir).map_err(ConfigError::Logging)?;
        }
        Ok(())
    }

    /// Explicit format, else the one implied by `path`, else JSON.
    pub fn resolve_format(&self, path: Option<&std::path::Path>) -> CatalogFormat {
        self.format
            .or_else(|| path.map(CatalogFormat::from_path))
            .unwrap_or_default()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Threshold outside `(0.0, 1.0]`.
    InvalidThreshold(f64),
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidThreshold(value) => write!(
                f,
                "similarity threshold must be in (0, 1], got {value}"
            ),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidThreshold(_) => None,
            Self::Logging(err) => Some(err),
        }
    }
}
