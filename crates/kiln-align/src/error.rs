use std::io;
use thiserror::Error;

/// A fragment could not be fetched or decoded.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Empty fragment locator")]
    EmptyLocator,

    #[error("Malformed fragment locator '{0}'")]
    Malformed(String),

    #[error("Locator '{0}' resolves outside the asset root")]
    OutsideRoot(String),

    #[error("Fragment '{0}' not found")]
    NotFound(String),

    #[error("I/O error reading '{locator}': {source}")]
    Io {
        locator: String,
        #[source]
        source: io::Error,
    },

    #[error("Request for '{locator}' failed: {source}")]
    Http {
        locator: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request for '{locator}' returned status {status}")]
    Status { locator: String, status: u16 },

    #[error("Failed to decode '{locator}': {source}")]
    Decode {
        locator: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Decode task for '{locator}' did not complete: {message}")]
    Task { locator: String, message: String },
}

/// Reasons an alignment computation falls back to identity scaling.
#[derive(Error, Debug)]
pub enum AlignError {
    #[error("Fragment load failed: {0}")]
    Load(#[from] LoadError),

    #[error("Degenerate interface measurement (neck bottom {neck_bottom}, base top {base_top})")]
    Degenerate { neck_bottom: f64, base_top: f64 },

    #[error("Invalid scale ratio (top {top_scale}, base {base_scale})")]
    InvalidRatio { top_scale: f64, base_scale: f64 },
}
