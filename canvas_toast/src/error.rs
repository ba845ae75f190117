// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Failure reported by a host service (clipboard, selection range, icon decoding).
///
/// None of these are fatal to the toast; they are logged and, for paste, surfaced to the
/// user once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host refused the operation, typically for lack of a permission.
    #[error("permission denied: {0}")]
    Denied(String),

    /// The service or resource is not available right now.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Any other host-side failure.
    #[error("{0}")]
    Other(String),
}

/// Errors that can occur while reading a stored configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The stored document is not valid JSON for the config shape.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A color string could not be parsed.
    #[error("invalid color {0:?}: expected #rgb or #rrggbb")]
    InvalidColor(String),
}
