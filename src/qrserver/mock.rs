use async_trait::async_trait;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::error::{QrError, Result};
use crate::qrserver::fetcher::{FetchedResponse, HttpFetcher};

/// Scripted fetcher for tests. Answers every GET with the same response and
/// can be held on a gate to simulate a slow service.
pub struct MockFetcher {
    status: AtomicU16,
    resolved_url: String,
    body: Vec<u8>,
    transport_error: bool,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn ok(resolved_url: &str) -> Self {
        Self {
            status: AtomicU16::new(200),
            resolved_url: resolved_url.to_string(),
            body: b"\x89PNG".to_vec(),
            transport_error: false,
            gate: None,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn status(status: u16) -> Self {
        let fetcher = Self::ok("http://qr/error");
        fetcher.set_status(status);
        fetcher
    }

    pub fn unreachable() -> Self {
        Self {
            transport_error: true,
            ..Self::ok("http://qr/unreachable")
        }
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_status(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetcher for MockFetcher {
    async fn get(&self, url: &str) -> Result<FetchedResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.transport_error {
            return Err(QrError::RequestError("connection refused".into()));
        }

        Ok(FetchedResponse {
            status: self.status.load(Ordering::SeqCst),
            url: self.resolved_url.clone(),
            content_type: Some("image/png".into()),
            body: self.body.clone(),
        })
    }
}
