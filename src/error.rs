//! Error types for the biringan library

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a story document
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoryError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: missing required parameter '{param}' for {command}")]
    MissingParam {
        line: usize,
        command: String,
        param: String,
    },

    #[error("line {line}: {kind} '{name}' is defined twice")]
    Duplicate {
        line: usize,
        kind: &'static str,
        name: String,
    },

    #[error("line {line}: undefined {kind} '{name}'")]
    Undefined {
        line: usize,
        kind: &'static str,
        name: String,
    },

    #[error("story has no [START] command")]
    MissingStart,
}

impl StoryError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    pub fn missing_param(line: usize, command: &str, param: &str) -> Self {
        Self::MissingParam {
            line,
            command: command.to_string(),
            param: param.to_string(),
        }
    }

    /// Line number the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. }
            | Self::MissingParam { line, .. }
            | Self::Duplicate { line, .. }
            | Self::Undefined { line, .. } => Some(*line),
            Self::MissingStart => None,
        }
    }
}

/// Errors raised by the save ledger
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write progress to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read progress from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("unknown speed '{value}', expected 1x, 2x or 3x")]
    InvalidSpeed { value: String },
}
