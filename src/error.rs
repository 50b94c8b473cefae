//! Error Types
//!
//! Only loading data and running harness scripts can fail. Ledger, session
//! and command operations degrade to "unlimited" or a no-op instead.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading catalog, shop or configuration files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl DataError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io { path: path.into(), source }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        DataError::Parse { path: path.into(), source }
    }
}

/// Failure while parsing or running a shop script.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
