use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Reported by the command line before extraction starts; the extractor
    /// itself never checks existence.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The input could not be opened or is not a valid `.docx` package.
    /// `path` is `None` for packages and parts handed over in memory.
    #[error("cannot open document {}: {reason}", source_label(path.as_deref()))]
    DocumentOpen {
        path: Option<PathBuf>,
        reason: String,
    },
}

fn source_label(path: Option<&Path>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "(in memory)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
