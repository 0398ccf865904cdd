use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};

use crate::error::{QrError, Result};

/// Transport level view of a completed GET.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u16,
    /// The url the response finally came from, after redirects.
    pub url: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedResponse>;
}

#[derive(Clone, Default)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("qrgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QrError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<FetchedResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| QrError::RequestError(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        let body = response
            .bytes()
            .await
            .map_err(|e| QrError::RequestError(format!("Reading body of {} failed: {}", url, e)))?;

        Ok(FetchedResponse {
            status,
            url: final_url,
            content_type,
            body: body.to_vec(),
        })
    }
}
