//! Error type definitions for correlation analysis

use std::borrow::Cow;

use thiserror::Error as ThisError;

/// Primary error type for the analysis pipeline
///
/// Every variant is fatal for the batch tools: nothing is retried and there
/// is no partial-result recovery.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A file could not be opened, read or written
    #[error("I/O error on {resource}: {source}")]
    Io {
        /// Path or description of the failing resource
        resource: Cow<'static, str>,
        /// Underlying operating system error
        #[source]
        source: std::io::Error,
    },

    /// Not enough memory for a table or sample buffer
    #[error("allocation of {bytes} bytes failed: {context}")]
    Allocation {
        context: &'static str,
        bytes: usize,
    },

    /// Malformed configuration: stride, code length, fold width, merge shape
    #[error("invalid configuration for {context}: {message}")]
    Config {
        context: &'static str,
        message: Cow<'static, str>,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A column with zero variance was met while finishing Pearson coefficients
    #[error("column {column} has zero variance over {samples} samples")]
    DegenerateStatistics {
        column: usize,
        samples: u64,
    },
}

/// Result type for analysis operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create a Config error
    pub fn config(context: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Error::Config {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create an Io error for a named resource
    pub fn io(resource: impl Into<Cow<'static, str>>, source: std::io::Error) -> Self {
        Error::Io {
            resource: resource.into(),
            source,
        }
    }

    /// True for errors caused by the data itself rather than the setup
    pub fn is_statistical(&self) -> bool {
        matches!(self, Self::DegenerateStatistics { .. })
    }
}
