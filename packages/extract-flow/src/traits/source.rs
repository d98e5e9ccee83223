//! File source trait - the local file reading seam.

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Reads user-supplied files into text, one file at a time.
///
/// Decoding is lazy: nothing is read until the pipeline's reading stage
/// asks for a file.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Read the file at `path` and decode it as UTF-8 text.
    async fn read_text(&self, path: &Path) -> io::Result<String>;
}
