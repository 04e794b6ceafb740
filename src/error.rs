//! Error types for tablediff operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TablediffError>;

#[derive(Error, Debug)]
pub enum TablediffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("type mismatch: cannot compare {left} with {right}")]
    TypeMismatch { left: String, right: String },

    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    #[error("key order conflict: {message}")]
    KeyOrderConflict { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("unknown connection name: {name}")]
    UnknownConnection { name: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl TablediffError {
    pub fn type_mismatch(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::TypeMismatch {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: msg.into(),
        }
    }

    pub fn key_order_conflict(msg: impl Into<String>) -> Self {
        Self::KeyOrderConflict {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unknown_connection(name: impl Into<String>) -> Self {
        Self::UnknownConnection { name: name.into() }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
