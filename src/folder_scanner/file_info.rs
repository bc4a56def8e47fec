use std::path::PathBuf;

/// A regular, non-empty file discovered by the scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCandidate {
    pub file: PathBuf,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(file: impl Into<PathBuf>, size: u64) -> Self {
        FileCandidate {
            file: file.into(),
            size,
        }
    }
}
