//! Error types.
//!
//! The engine itself (generation, fitness, annealing) cannot fail on a
//! validated roster. Every fallible operation sits at a boundary: roster
//! and schedule documents on disk, and identifiers typed by an operator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the invigilation engine's boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// No teacher id was supplied to a lookup.
    #[error("teacher id is required")]
    MissingTeacherId,

    /// The supplied teacher id is not an integer.
    #[error("invalid teacher id: {0:?}")]
    InvalidTeacherId(String),

    /// The operator selected no exam day.
    #[error("no exam day selected")]
    EmptyDaySelection,

    /// The roster failed validation.
    #[error("invalid roster: {}", summarize(.0))]
    InvalidRoster(Vec<ValidationError>),

    /// Optimizer settings are out of range.
    #[error("invalid annealing configuration: {0}")]
    InvalidConfig(String),

    /// A document could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document was read but is not valid JSON of the expected shape.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A document could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A schedule could not be encoded.
    #[error("failed to serialize schedule: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl Error {
    /// Whether this error came from operator input rather than storage.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::MissingTeacherId
                | Error::InvalidTeacherId(_)
                | Error::EmptyDaySelection
                | Error::InvalidRoster(_)
                | Error::InvalidConfig(_)
        )
    }

    /// Whether this error means a document could not be loaded.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Error::Read { .. } | Error::Parse { .. })
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
