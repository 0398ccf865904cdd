use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QrError;

/// Pixel dimensions requested from the QR service, written `WxH` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrSize {
    pub width: u32,
    pub height: u32,
}

impl QrSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

impl Default for QrSize {
    fn default() -> Self {
        Self::square(150)
    }
}

impl fmt::Display for QrSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for QrSize {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| QrError::ConfigError(format!("size '{}' is not in WxH form", s)))?;

        let parse = |part: &str| -> Result<u32, QrError> {
            match part.trim().parse::<u32>() {
                Ok(0) | Err(_) => Err(QrError::ConfigError(format!(
                    "invalid size dimension '{}' in '{}'",
                    part, s
                ))),
                Ok(value) => Ok(value),
            }
        };

        Ok(Self::new(parse(width)?, parse(height)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    pub data: String,
    pub size: QrSize,
}

impl QrRequest {
    pub fn new(data: impl Into<String>, size: QrSize) -> Self {
        Self {
            data: data.into(),
            size,
        }
    }

    /// Builds the GET url for `endpoint`, percent-encoding the payload.
    pub fn url(&self, endpoint: &str) -> String {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}size={}&data={}",
            endpoint,
            separator,
            self.size,
            urlencoding::encode(&self.data)
        )
    }
}

/// Image bytes fetched from a result url, ready to be saved.
#[derive(Debug, Clone)]
pub struct QrImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: String,
}

impl QrImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parsing() {
        assert_eq!("300x300".parse::<QrSize>().unwrap(), QrSize::square(300));
        assert_eq!(" 200X100 ".parse::<QrSize>().unwrap(), QrSize::new(200, 100));
        assert!("300".parse::<QrSize>().is_err());
        assert!("0x150".parse::<QrSize>().is_err());
        assert!("axb".parse::<QrSize>().is_err());
        assert_eq!(QrSize::default().to_string(), "150x150");
    }

    #[test]
    fn test_request_url_encodes_payload() {
        let request = QrRequest::new("https://example.com/a b?x=1&y=2", QrSize::default());
        assert_eq!(
            request.url("https://api.qrserver.com/v1/create-qr-code/"),
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=https%3A%2F%2Fexample.com%2Fa%20b%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_request_url_with_existing_query() {
        let request = QrRequest::new("hi", QrSize::square(300));
        assert_eq!(
            request.url("http://localhost/qr?format=png"),
            "http://localhost/qr?format=png&size=300x300&data=hi"
        );
    }
}
