//! Error types for colligo operations.
//!
//! This module defines the main error type [`ColligoError`] which represents
//! all possible errors that can occur while validating seed URLs, fetching
//! pages, extracting text, and persisting results.

use thiserror::Error;

/// Main error type for the collection pipeline.
///
/// Per-URL failures are caught at the pipeline boundary and recorded as
/// outcomes; only configuration problems (for example an unwritable output
/// directory) abort a whole batch.
#[derive(Error, Debug)]
pub enum ColligoError {
    /// HTTP transport errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues, and other
    /// transport-level problems that were not retried to success.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal HTTP status.
    ///
    /// Returned for a non-transient status (plain 4xx), or for a transient
    /// status (429/5xx) once retries are exhausted.
    #[error("HTTP status {status} after {attempts} attempt(s)")]
    HttpStatus { status: u16, attempts: u32 },

    /// Request timeout.
    ///
    /// Returned when an HTTP request still exceeds the configured timeout
    /// after retries are exhausted.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid seed URL.
    ///
    /// Returned when a URL cannot be parsed, lacks an http/https scheme,
    /// or has no host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// Every extraction strategy produced empty or too-short text.
    ///
    /// Raised instead of writing near-empty output files. `length` is the
    /// longest text any strategy produced.
    #[error("Extracted content too short ({length} chars, minimum {minimum})")]
    ContentTooShort { length: usize, minimum: usize },

    /// A curated story entry failed schema validation.
    #[error("Invalid story entry: {0}")]
    InvalidEntry(String),

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Batch-level configuration errors. These abort the whole run.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for ColligoError.
pub type Result<T> = std::result::Result<T, ColligoError>;
