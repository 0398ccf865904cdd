use std::env;

use crate::models::QrSize;

pub const DEFAULT_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const DEFAULT_FILENAME: &str = "QRCode.png";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct QrConfig {
    pub endpoint: String,
    pub size: QrSize,
    pub filename: String,
    pub port: Option<u16>,
}

impl Default for QrConfig {
    fn default() -> Self {
        QrConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            size: QrSize::default(),
            filename: DEFAULT_FILENAME.to_string(),
            port: None,
        }
    }
}

impl QrConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `QR_ENDPOINT`, `QR_SIZE`, `QR_FILENAME` and `PORT`.
    /// Malformed values are reported and replaced by defaults, so the logger
    /// should be installed before this is called.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = var("QR_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().to_string();
            }
        }

        if let Some(size) = var("QR_SIZE") {
            match size.parse() {
                Ok(size) => config.size = size,
                Err(e) => log::warn!("Ignoring QR_SIZE, using {}: {}", config.size, e),
            }
        }

        if let Some(filename) = var("QR_FILENAME") {
            if !filename.trim().is_empty() {
                config.filename = filename.trim().to_string();
            }
        }

        if let Some(port) = var("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => config.port = Some(port),
                Err(e) => log::warn!("Ignoring PORT '{}', using {}: {}", port, DEFAULT_PORT, e),
            }
        }

        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_size(mut self, size: QrSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}
