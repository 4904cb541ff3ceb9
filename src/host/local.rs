//! Host capabilities backed by the local machine.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::host::{FileStore, PlayerContext};

/// [`FileStore`] on top of `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

#[async_trait]
impl FileStore for LocalFileStore {
    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).await.map_err(Into::into)
    }

    async fn size(&self, path: &Path) -> Result<u64> {
        Ok(fs::metadata(path).await?.len())
    }

    async fn write_new(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;

        let written = async {
            file.write_all(contents).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(path).await;
            return Err(e.into());
        }

        Ok(())
    }
}

/// A player that is "playing" a fixed local file.
///
/// Stands in for the host player when the addon runs from the command line.
#[derive(Debug, Clone, Default)]
pub struct LocalPlayer {
    file: Option<PathBuf>,
    media_type: Option<String>,
}

impl LocalPlayer {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

impl PlayerContext for LocalPlayer {
    fn is_playing(&self) -> bool {
        self.file.is_some()
    }

    fn media_type(&self) -> Option<String> {
        self.media_type.clone()
    }

    fn playing_file(&self) -> Option<String> {
        self.file
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned())
    }
}
