//! Filesystem-based image storage implementation.

use crate::{ImageStore, frame_file_name};
use std::path::{Path, PathBuf};
use storyboard_core::ImageData;
use storyboard_error::{StorageError, StorageErrorKind, StoryboardResult};

/// Filesystem storage backend.
///
/// Stores every file flat in one directory:
///
/// ```text
/// generated_frames/
/// ├── frame_01.png
/// ├── frame_02.png
/// └── storyboard_overview.html
/// ```
///
/// Writes go to a temp file first and are renamed into place, so a reader
/// never sees a half-written image.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StoryboardResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %base_path.display(), "Opened filesystem storage");
        Ok(Self { base_path })
    }

    /// Root directory of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write a text document (such as the HTML overview) next to the images.
    #[tracing::instrument(skip(self, contents), fields(size = contents.len()))]
    pub async fn write_document(&self, name: &str, contents: &str) -> StoryboardResult<PathBuf> {
        let path = self.base_path.join(name);
        self.write_atomic(&path, contents.as_bytes()).await?;
        tracing::info!(path = %path.display(), "Wrote document");
        Ok(path)
    }

    /// Read back a stored file.
    pub async fn read(&self, name: &str) -> StoryboardResult<Vec<u8>> {
        let path = self.base_path.join(name);
        let data = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(path.display().to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;
        Ok(data)
    }

    async fn write_atomic(&self, path: &Path, data: &[u8]) -> StoryboardResult<()> {
        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl ImageStore for FileSystemStorage {
    #[tracing::instrument(skip(self, image), fields(size = image.bytes.len(), mime = %image.mime_type))]
    async fn store(&self, frame_number: u32, image: &ImageData) -> StoryboardResult<PathBuf> {
        let path = self.base_path.join(frame_file_name(frame_number, image));
        self.write_atomic(&path, &image.bytes).await?;

        tracing::info!(
            frame_number,
            path = %path.display(),
            size = image.bytes.len(),
            "Stored frame image"
        );
        Ok(path)
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
