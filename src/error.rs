use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Request error: {0}")]
    RequestError(String),

    #[error("Response error: QR service answered with status {status}")]
    ResponseError { status: u16 },

    #[error("Download error: {0}")]
    DownloadError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for QrError {
    fn from(e: reqwest::Error) -> Self {
        QrError::RequestError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QrError>;
