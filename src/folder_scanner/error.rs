use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that abort a run. Per-file problems never end up here, they are
/// logged and the file is left out of every group.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid ignore mask \"{mask}\": {source}")]
    InvalidMask {
        mask: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("unsupported hash algorithm: {0} (available: md5, sha1, sha256, sha512)")]
    UnsupportedAlgorithm(String),

    #[error("cannot write {what} file {}: {source}", .path.display())]
    Output {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write to the console: {0}")]
    Console(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
