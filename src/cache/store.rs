use crate::cache::error::{CacheError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Timestamps that decide whether a stored artifact is still fresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactTimestamps {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Single persistent slot holding the last fetched artifact
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Human readable location, used in logs
    fn location(&self) -> String;

    /// `None` when nothing has been stored yet
    async fn timestamps(&self) -> Result<Option<ArtifactTimestamps>>;

    async fn read(&self) -> Result<String>;

    /// Replace the stored artifact wholesale
    async fn write(&self, contents: &str) -> Result<()>;

    async fn remove(&self) -> Result<()>;
}

/// Artifact stored as a plain file; the file's own timestamps are the only metadata
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    path: PathBuf,
}

impl FileArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArtifactStore for FileArtifactStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn timestamps(&self) -> Result<Option<ArtifactTimestamps>> {
        let metadata = match fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io("stat", &self.path, e)),
        };

        let modified: DateTime<Utc> = metadata
            .modified()
            .map_err(|e| CacheError::io("stat", &self.path, e))?
            .into();

        Ok(Some(ArtifactTimestamps {
            created: created_at(&metadata).unwrap_or(modified),
            modified,
        }))
    }

    async fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .await
            .map_err(|e| CacheError::io("read", &self.path, e))
    }

    async fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::io("create directory for", &self.path, e))?;
        }

        // Plain truncate-and-write: readers racing a writer may see a partial file.
        fs::write(&self.path, contents)
            .await
            .map_err(|e| CacheError::io("write", &self.path, e))?;

        debug!("Wrote {} bytes to {:?}", contents.len(), self.path);
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io("remove", &self.path, e)),
        }
    }
}

/// Inode status-change time, the "creation" time unix filesystems report
#[cfg(unix)]
fn created_at(metadata: &std::fs::Metadata) -> Option<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;

    DateTime::<Utc>::from_timestamp(metadata.ctime(), metadata.ctime_nsec() as u32)
}

#[cfg(not(unix))]
fn created_at(metadata: &std::fs::Metadata) -> Option<DateTime<Utc>> {
    metadata.created().ok().map(DateTime::<Utc>::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_has_no_timestamps() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path().join("nodes.json"));

        assert_eq!(store.timestamps().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path().join("state/maas/nodes.json"));

        store.write("[]").await.unwrap();

        assert_eq!(store.read().await.unwrap(), "[]");
        let stamps = store.timestamps().await.unwrap().unwrap();
        let age = Utc::now() - stamps.modified;
        assert!(age.num_seconds() < 60);
    }

    #[tokio::test]
    async fn test_write_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path().join("nodes.json"));

        store.write(r#"[{"hostname": "web01"}]"#).await.unwrap();
        store.write("[]").await.unwrap();

        assert_eq!(store.read().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path().join("nodes.json"));

        store.write("[]").await.unwrap();
        store.remove().await.unwrap();
        store.remove().await.unwrap();

        assert_eq!(store.timestamps().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path().join("nodes.json"));

        let err = store.read().await.unwrap_err();
        assert!(err.to_string().contains("read"));
    }
}
