use std::sync::Arc;

use crate::{
    error::{QrError, Result},
    models::{QrImage, QrRequest},
    qrserver::fetcher::HttpFetcher,
};

#[derive(Clone)]
pub struct ImageClient {
    fetcher: Arc<dyn HttpFetcher>,
    endpoint: String,
}

impl ImageClient {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }

    /// Asks the service to render `request` and returns the resolved image url.
    /// Any 2xx counts as success; the body is not inspected.
    pub async fn generate(&self, request: &QrRequest) -> Result<String> {
        let url = request.url(&self.endpoint);

        log::info!(
            "Requesting {} QR code for {} characters",
            request.size,
            request.data.chars().count()
        );
        log::debug!("QR request url: {}", url);

        let response = self.fetcher.get(&url).await?;
        if !response.is_success() {
            return Err(QrError::ResponseError {
                status: response.status,
            });
        }

        log::info!("QR code ready at {}", response.url);
        Ok(response.url)
    }

    /// Downloads the bytes behind a previously generated image url.
    pub async fn fetch_image(&self, image_url: &str, filename: &str) -> Result<QrImage> {
        let response = self.fetcher.get(image_url).await?;
        if !response.is_success() {
            return Err(QrError::DownloadError(format!(
                "image request answered with status {}",
                response.status
            )));
        }

        Ok(QrImage {
            bytes: response.body,
            content_type: response.content_type,
            filename: filename.to_string(),
        })
    }
}
