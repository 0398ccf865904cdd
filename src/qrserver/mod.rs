pub mod fetcher;
pub mod image_client;
#[cfg(test)]
pub(crate) mod mock;

use crate::{config::QrConfig, error::Result};
use std::sync::Arc;

pub use fetcher::{FetchedResponse, HttpFetcher, ReqwestFetcher};
pub use image_client::ImageClient;

/// Entry point to the external QR image service.
#[derive(Clone)]
pub struct QrClient {
    image_client: ImageClient,
}

impl QrClient {
    pub fn new(config: &QrConfig) -> Result<Self> {
        let fetcher = ReqwestFetcher::new()?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: &QrConfig, fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self {
            image_client: ImageClient::new(fetcher, config.endpoint.clone()),
        }
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
