//! Filesystem-backed file source.

use async_trait::async_trait;
use std::io;
use std::path::Path;

use crate::traits::source::FileSource;

/// Reads files from the local filesystem, decoding them as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileSource;

impl FsFileSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSource for FsFileSource {
    async fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = tokio::fs::read(path).await?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_utf8_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "alpha\nbeta").unwrap();

        let source = FsFileSource::new();
        assert_eq!(source.read_text(&path).await.unwrap(), "alpha\nbeta");
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let source = FsFileSource::new();
        let err = source.read_text(&path).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsFileSource::new();
        let err = source
            .read_text(&dir.path().join("absent.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
