use crate::{download::blob::BlobHandle, error::Result};
use async_trait::async_trait;

/// The host's "save file" capability.
#[async_trait]
pub trait SaveTarget: Send {
    async fn save(&mut self, blob: &BlobHandle) -> Result<()>;
}
