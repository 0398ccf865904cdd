//! A single-page QR code generator.
//!
//! Text typed into the form is sent to an external QR image service
//! (api.qrserver.com by default), the returned image is shown and can be
//! downloaded. The crate owns input validation, request construction, the
//! `Idle | Loading | Success | Failure` state and the download hand-off; the
//! encoding itself is done by the service.

pub mod config;
pub mod download;
pub mod error;
pub mod form;
pub mod logger;
pub mod models;
pub mod qrserver;
#[cfg(feature = "server")]
pub mod server;
pub mod session;

pub use config::QrConfig;
pub use download::{DirectoryTarget, DownloadOutcome, SaveTarget};
pub use error::{QrError, Result};
pub use models::{GenerationResult, QrRequest, QrSize, SessionView};
pub use qrserver::{HttpFetcher, QrClient};
pub use session::{QrSession, SubmitOutcome};
