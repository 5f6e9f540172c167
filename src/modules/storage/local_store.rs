//! Local filesystem store for chat uploads

use std::path::PathBuf;

use futures::{Stream, StreamExt};
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::core::config::UploadConfig;
use crate::shared::constants::UPLOAD_CHUNK_SIZE;
use crate::shared::validation::{is_safe_file_name, sanitize_upload_name};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read upload: {0}")]
    Stream(String),
}

/// Stores uploads flat under `{UPLOAD_DIR}/temp`
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    temp_dir: PathBuf,
}

impl LocalUploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            temp_dir: config.temp_dir(),
        }
    }

    /// Path of a previously uploaded file. Rejects names that could escape
    /// the upload directory.
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_file_name(file_name) {
            return Err(StorageError::InvalidFileName(file_name.to_string()));
        }
        Ok(self.temp_dir.join(file_name))
    }

    /// Write an upload chunk by chunk and return the stored file name.
    ///
    /// Only the last path component of `raw_name` is kept; an existing file
    /// with the same name is overwritten.
    pub async fn save_stream<S, B, E>(
        &self,
        raw_name: &str,
        mut chunks: S,
    ) -> Result<String, StorageError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: std::fmt::Display,
    {
        let file_name = sanitize_upload_name(raw_name)
            .ok_or_else(|| StorageError::InvalidFileName(raw_name.to_string()))?;

        fs::create_dir_all(&self.temp_dir).await?;
        let path = self.temp_dir.join(&file_name);

        let file = File::create(&path).await?;
        let mut writer = BufWriter::with_capacity(UPLOAD_CHUNK_SIZE, file);
        let mut written: u64 = 0;

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|e| StorageError::Stream(e.to_string()))?;
            let bytes = chunk.as_ref();
            writer.write_all(bytes).await?;
            written += bytes.len() as u64;
        }
        writer.flush().await?;

        debug!("Stored upload {} ({} bytes)", path.display(), written);
        Ok(file_name)
    }

    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.temp_dir).await?;
        info!("Upload directory ready: {}", self.temp_dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> LocalUploadStore {
        LocalUploadStore::new(&UploadConfig::new(dir.path()))
    }

    fn chunks(parts: &[&'static str]) -> impl Stream<Item = Result<&'static [u8], String>> + Unpin {
        stream::iter(parts.iter().map(|p| Ok(p.as_bytes())).collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_save_stream_writes_all_chunks() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let name = store
            .save_stream("notes.txt", chunks(&["hello ", "world"]))
            .await
            .unwrap();

        assert_eq!(name, "notes.txt");
        let content = std::fs::read_to_string(dir.path().join("temp").join("notes.txt")).unwrap();
        assert_eq!(content, "hello world");
    }

    #[tokio::test]
    async fn test_save_stream_keeps_last_component() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let name = store
            .save_stream("../../evil.txt", chunks(&["x"]))
            .await
            .unwrap();

        assert_eq!(name, "evil.txt");
        assert!(dir.path().join("temp").join("evil.txt").exists());
    }

    #[tokio::test]
    async fn test_save_stream_rejects_empty_name() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir)
            .save_stream("dir/", chunks(&["x"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidFileName(_)));
    }

    #[tokio::test]
    async fn test_save_stream_reports_broken_upload() {
        let dir = TempDir::new().unwrap();
        let broken = stream::iter(vec![Ok(&b"part"[..]), Err("connection reset".to_string())]);

        let err = store(&dir).save_stream("a.txt", broken).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.resolve("../secret.txt").is_err());
        assert_eq!(
            store.resolve("a.pdf").unwrap(),
            dir.path().join("temp").join("a.pdf")
        );
    }
}
