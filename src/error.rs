//! Error types for a partygif run.
//!
//! Every failure is terminal. Each variant renders as one line naming the
//! stage that failed, which is what the binary prints.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure of a single run.
#[derive(Debug, Error)]
pub enum Error {
    /// Positional arguments were given; only flags are accepted.
    #[error("does not take any non-flag arguments")]
    UnexpectedArguments,

    /// Command-line flags could not be parsed.
    #[error("{0}")]
    Usage(String),

    #[error("opening input file: opening file: {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("opening output file: opening file: {}: {source}", .path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("decoding input file: {0}")]
    Decode(#[from] DecodeError),

    /// The output may already be partially written.
    #[error("encoding gif to output file: {0}")]
    Encode(#[from] gif::EncodingError),
}

/// Why an input could not be turned into a frame sequence.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Format(#[from] gif::DecodingError),

    #[error("frame {frame} has no color table")]
    MissingPalette { frame: usize },

    #[error("no frames in input")]
    NoFrames,
}

/// Result type for partygif operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
