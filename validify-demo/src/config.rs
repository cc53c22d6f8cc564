//! Loading the engine configuration from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;
use validify::ValidifyConfig;

use crate::paths;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the configuration.
///
/// An explicit path must exist. Without one the platform config file is used
/// when present, and the defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<ValidifyConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match paths::config_file() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file, using defaults");
                return Ok(ValidifyConfig::default());
            }
        },
    };

    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}
