//! Error and result types for the bundling pipeline.

use std::path::PathBuf;

/// A specialized `Result` type for bundling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while bundling assets. All of them are fatal;
/// the pipeline never writes a partial artifact.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no input patterns given")]
    NoPatterns,
    #[error("invalid glob pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("could not read {path:?}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("patterns matched no files, nothing to bundle")]
    EmptyBundle,
    #[error("compression failed: {0}")]
    Compression(String),
    #[error("could not write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
