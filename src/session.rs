use std::sync::{Mutex, MutexGuard};

use crate::{
    config::QrConfig,
    download::{BlobRegistry, DownloadOutcome, SaveTarget},
    error::Result,
    form::InputForm,
    logger,
    models::{GenerationResult, QrRequest, QrSize, SessionView, IMAGE_ALT_TEXT},
    qrserver::QrClient,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent and the result is untouched.
    Ignored,
    /// A request is already in flight.
    Busy,
    Generated(String),
    Failed,
}

#[derive(Debug, Default)]
struct SessionState {
    form: InputForm,
    result: GenerationResult,
}

/// Owns the `Loading` state of one submission. Dropped before it settles
/// (the submit future was cancelled), it puts the session back to `Idle`.
struct LoadingGuard<'a> {
    state: &'a Mutex<SessionState>,
    armed: bool,
}

impl LoadingGuard<'_> {
    fn settle<T>(mut self, apply: impl FnOnce(&mut SessionState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        self.armed = false;
        apply(&mut state)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.result.is_loading() {
            log::warn!("QR request abandoned before it finished");
            state.result = GenerationResult::Idle;
        }
    }
}

/// Form text plus the one live generation result, driven by user actions.
///
/// The state lock is never held across a network call.
pub struct QrSession {
    client: QrClient,
    size: QrSize,
    filename: String,
    blobs: BlobRegistry,
    state: Mutex<SessionState>,
}

impl QrSession {
    pub fn new(config: &QrConfig) -> Result<Self> {
        Ok(Self::with_client(config, QrClient::new(config)?))
    }

    pub fn with_client(config: &QrConfig, client: QrClient) -> Self {
        Self {
            client,
            size: config.size,
            filename: config.filename.clone(),
            blobs: BlobRegistry::new(),
            state: Mutex::new(SessionState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn text(&self) -> String {
        self.state().form.text().to_string()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.state().form.set_text(text);
    }

    pub fn result(&self) -> GenerationResult {
        self.state().result.clone()
    }

    pub fn image_url(&self) -> Option<String> {
        self.state().result.image_url().map(String::from)
    }

    pub fn blobs(&self) -> &BlobRegistry {
        &self.blobs
    }

    pub fn snapshot(&self) -> SessionView {
        let state = self.state();
        SessionView {
            text: state.form.text().to_string(),
            result: state.result.clone(),
            can_submit: !state.result.is_loading(),
            image_alt: IMAGE_ALT_TEXT.to_string(),
            download_filename: self.filename.clone(),
        }
    }

    /// Sends the current text to the QR service. The previous result is
    /// replaced by `Loading` before the request goes out.
    ///
    /// On success the input is cleared; on failure it is kept so the user can
    /// resubmit it.
    pub async fn submit(&self) -> SubmitOutcome {
        match self.begin(None) {
            Ok((request, loading)) => self.run(request, loading).await,
            Err(outcome) => outcome,
        }
    }

    /// Replaces the input with `text` and submits it. While a request is in
    /// flight the input is left as it was and `Busy` is returned.
    pub async fn submit_text(&self, text: impl Into<String>) -> SubmitOutcome {
        match self.begin(Some(text.into())) {
            Ok((request, loading)) => self.run(request, loading).await,
            Err(outcome) => outcome,
        }
    }

    fn begin(
        &self,
        text: Option<String>,
    ) -> std::result::Result<(QrRequest, LoadingGuard<'_>), SubmitOutcome> {
        let mut state = self.state();
        if state.result.is_loading() {
            log::warn!("Submit ignored: a QR request is already in flight");
            return Err(SubmitOutcome::Busy);
        }

        if let Some(text) = text {
            state.form.set_text(text);
        }

        let Some(text) = state.form.submission() else {
            log::debug!("Submit ignored: input is blank");
            return Err(SubmitOutcome::Ignored);
        };

        state.result = GenerationResult::Loading;
        let loading = LoadingGuard {
            state: &self.state,
            armed: true,
        };
        Ok((QrRequest::new(text, self.size), loading))
    }

    async fn run(&self, request: QrRequest, loading: LoadingGuard<'_>) -> SubmitOutcome {
        let outcome = {
            let _timer = logger::timer("QR generation");
            self.client.image().generate(&request).await
        };

        loading.settle(|state| match outcome {
            Ok(image_url) => {
                state.result = GenerationResult::success(image_url.clone());
                state.form.clear();
                SubmitOutcome::Generated(image_url)
            }
            Err(e) => {
                log::error!("QR generation failed: {}", e);
                state.result = GenerationResult::failure();
                SubmitOutcome::Failed
            }
        })
    }

    /// Fetches the current image and hands it to `target`. The temporary
    /// blob handle is released before this returns, whatever the outcome.
    pub async fn download(&self, target: &mut dyn SaveTarget) -> DownloadOutcome {
        let Some(image_url) = self.image_url() else {
            log::debug!("Download ignored: no generated QR code");
            return DownloadOutcome::NoResult;
        };

        match self.save_image(&image_url, target).await {
            Ok(()) => DownloadOutcome::Saved {
                filename: self.filename.clone(),
            },
            Err(e) => {
                log::error!("QR download failed: {}", e);
                DownloadOutcome::Failed
            }
        }
    }

    async fn save_image(&self, image_url: &str, target: &mut dyn SaveTarget) -> Result<()> {
        let image = self
            .client
            .image()
            .fetch_image(image_url, &self.filename)
            .await?;

        let blob = self.blobs.register(image);
        target.save(&blob).await
    }

    /// Resets text and result without touching the network. Refused while a
    /// request is in flight.
    pub fn clear(&self) -> bool {
        let mut state = self.state();
        if state.result.is_loading() {
            log::warn!("Clear ignored: a QR request is already in flight");
            return false;
        }

        state.form.clear();
        state.result = GenerationResult::Idle;
        true
    }
}
