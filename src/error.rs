//! Unified error types for partner-finder.
//!
//! This module provides the error hierarchy for the library. Validation
//! failures abort a whole request; data-quality problems never surface here
//! (they are counted in [`crate::scoring::DataQualityStats`] instead).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for partner-finder operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PartnerError {
    /// Invalid metric catalog or application configuration. Fatal at startup.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The affected company is absent from the dataset snapshot
    #[error("Company not found in dataset: {company}")]
    NotFound { company: String },

    /// A selected factor is unknown or missing from a computed score vector
    #[error("Invalid factor '{factor}': {reason}")]
    InvalidFactor { factor: String, reason: String },

    /// Errors while reading a dataset
    #[error("Failed to load dataset: {context}")]
    Ingest {
        context: String,
        #[source]
        source: IngestErrorKind,
    },

    /// Errors while writing the triple export
    #[error("Export failed: {context}")]
    Export {
        context: String,
        #[source]
        source: ExportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific ingestion error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestErrorKind {
    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required column: {column} in {file}")]
    MissingColumn { column: String, file: String },

    #[error("Record {index} has no company identifier")]
    MissingIdentifier { index: usize },
}

/// Specific export error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportErrorKind {
    #[error("Invalid base URI: {0}")]
    InvalidBaseUri(String),

    #[error("Write failed: {0}")]
    Write(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for partner-finder operations
pub type Result<T> = std::result::Result<T, PartnerError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl PartnerError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a not-found error for the affected company
    pub fn not_found(company: impl Into<String>) -> Self {
        Self::NotFound {
            company: company.into(),
        }
    }

    /// Create an invalid-factor error
    pub fn invalid_factor(factor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFactor {
            factor: factor.into(),
            reason: reason.into(),
        }
    }

    /// Create an ingestion error with context
    pub fn ingest(context: impl Into<String>, source: IngestErrorKind) -> Self {
        Self::Ingest {
            context: context.into(),
            source,
        }
    }

    /// Create an export error with context
    pub fn export(context: impl Into<String>, source: ExportErrorKind) -> Self {
        Self::Export {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Whether this error was caused by the caller's request rather than the
    /// data or the environment.
    #[must_use]
    pub const fn is_request_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidFactor { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for PartnerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for PartnerError {
    fn from(err: serde_json::Error) -> Self {
        Self::ingest(
            "JSON deserialization",
            IngestErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<csv::Error> for PartnerError {
    fn from(err: csv::Error) -> Self {
        Self::ingest("CSV deserialization", IngestErrorKind::Csv(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
///
/// ```ignore
/// use partner_finder::error::ErrorContext;
///
/// let dataset = load_dataset(&path, DatasetFormat::Csv)
///     .with_context(|| format!("loading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<PartnerError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// Request errors (`NotFound`, `InvalidFactor`) carry structured fields and
/// are passed through untouched so callers can still match on them.
fn add_context_to_error(err: PartnerError, new_ctx: &str) -> PartnerError {
    match err {
        PartnerError::Ingest {
            context: existing,
            source,
        } => PartnerError::Ingest {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PartnerError::Export {
            context: existing,
            source,
        } => PartnerError::Export {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PartnerError::Io {
            path,
            message,
            source,
        } => PartnerError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        PartnerError::Configuration(msg) => {
            PartnerError::Configuration(chain_context(new_ctx, &msg))
        }
        other @ (PartnerError::NotFound { .. } | PartnerError::InvalidFactor { .. }) => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
