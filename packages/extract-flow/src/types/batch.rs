//! Upload batch - the ordered set of files one run processes.

use std::path::{Path, PathBuf};

/// An ordered sequence of source files selected by the caller.
///
/// Immutable once extraction starts; handed to the orchestrator by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadBatch {
    files: Vec<PathBuf>,
}

impl UploadBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a batch from an ordered sequence of paths.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a file to the batch.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over the files in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }
}
