// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Two error kinds cover the interesting failures: a GPX document that is
//! malformed or structurally incomplete, and a search/input criterion that
//! fails validation. Both are terminal for the operation that raised them;
//! nothing here is retried internally.

use crate::services::gpx::DecodeError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("GPX decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }
}

/// Result type alias for fallible operations
pub type Result<T> = std::result::Result<T, AppError>;
