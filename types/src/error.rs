//! Parse and validation errors for the shared types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("unknown task category: {0}")]
    UnknownCategory(String),

    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("invalid workflow parameters: {0}")]
    InvalidParams(String),
}
