pub mod blob;
pub mod traits;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use blob::{BlobHandle, BlobRegistry};
pub use traits::SaveTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// There was no generated image; nothing was fetched or saved.
    NoResult,
    Saved { filename: String },
    /// Logged and swallowed; the session is unaffected.
    Failed,
}

/// Saves downloads as files inside a directory.
pub struct DirectoryTarget {
    dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl DirectoryTarget {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            saved: Vec::new(),
        }
    }

    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

#[async_trait]
impl SaveTarget for DirectoryTarget {
    async fn save(&mut self, blob: &BlobHandle) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(blob.filename());
        tokio::fs::write(&path, blob.bytes()).await?;

        log::info!("💾 Saved {} ({} bytes)", path.display(), blob.bytes().len());
        self.saved.push(path);
        Ok(())
    }
}
