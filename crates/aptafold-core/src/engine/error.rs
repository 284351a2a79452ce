use std::io;
use std::time::Duration;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::fasta::FastaError;
use crate::core::io::table::TableError;

/// Failure of a single folding invocation.
///
/// These never abort a batch: the invoker downgrades them to a sentinel
/// [`FoldResult`](crate::core::models::fold::FoldResult). `Cancelled` is the one variant
/// that produces no result at all.
#[derive(Debug, Error)]
pub enum FoldError {
    #[error("Sequence is empty")]
    EmptySequence,

    #[error("Failed to start folding executable '{executable}': {source}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while communicating with the folding process: {0}")]
    Io(#[from] io::Error),

    #[error("Folding process exited with {status} (stderr: '{stderr}')")]
    NonZeroExit { status: String, stderr: String },

    #[error("Folding process did not finish within {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Folding was cancelled")]
    Cancelled,

    #[error("Reply has no structure line")]
    MissingStructureLine,

    #[error("Structure line has no energy field: '{0}'")]
    MissingEnergy(String),

    #[error("Invalid energy value '{0}'")]
    InvalidEnergy(String),

    #[error("Invalid character '{symbol}' at position {position} of the structure")]
    InvalidSymbol { position: usize, symbol: char },

    #[error("Structure length {found} does not match sequence length {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] FastaError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}
