// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::HydrationError;

/// All possible errors that can occur in the tvmirror library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("hydration failed: {0}")]
    Hydration(#[from] HydrationError),

    #[error("{warning}\n  hint: check that the server at {url} is running")]
    ConnectionFailed { url: String, warning: String },

    #[error("task failed: {0}")]
    Task(String),
}

/// A specialized Result type for tvmirror operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
