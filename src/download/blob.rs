use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::models::QrImage;

/// Tracks the in-memory image handles that are currently alive.
#[derive(Clone, Default)]
pub struct BlobRegistry {
    live: Arc<Mutex<HashMap<Uuid, usize>>>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn live(&self) -> MutexGuard<'_, HashMap<Uuid, usize>> {
        self.live.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Takes ownership of the image bytes. The returned handle releases its
    /// registration when dropped.
    pub fn register(&self, image: QrImage) -> BlobHandle {
        let id = Uuid::new_v4();
        self.live().insert(id, image.len());
        log::debug!("Acquired blob {} ({} bytes)", id, image.len());

        BlobHandle {
            id,
            image,
            registry: self.clone(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.live().len()
    }

    pub fn live_bytes(&self) -> usize {
        self.live().values().sum()
    }

    fn release(&self, id: &Uuid) {
        if self.live().remove(id).is_some() {
            log::debug!("Released blob {}", id);
        }
    }
}

pub struct BlobHandle {
    id: Uuid,
    image: QrImage,
    registry: BlobRegistry,
}

impl BlobHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.image.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.image.bytes
    }

    pub fn content_type(&self) -> Option<&str> {
        self.image.content_type.as_deref()
    }
}

impl Drop for BlobHandle {
    fn drop(&mut self) {
        self.registry.release(&self.id);
    }
}
