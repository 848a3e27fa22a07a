// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! The overlay and focus layers are reactive glue over geometry the layout
//! engine already validated, so the taxonomy is small: transform
//! preconditions (caller bugs, never clamped) and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for coordinate transform calls.
pub type TransformResult<T> = std::result::Result<T, TransformError>;

/// A precondition of the coordinate transform was violated.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    /// Zoom factor was zero or negative.
    #[error("zoom factor must be positive, got {0}")]
    NonPositiveZoom(f64),

    /// Page height was negative.
    #[error("page height must not be negative, got {0}")]
    NegativePageHeight(f64),

    /// Page gap was negative.
    #[error("page gap must not be negative, got {0}")]
    NegativePageGap(f64),

    /// A coordinate or dimension was NaN or infinite.
    #[error("geometry contains a non-finite value")]
    NonFiniteInput,
}

/// Failure while loading options or a replay script.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
