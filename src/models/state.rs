use serde::{Deserialize, Serialize};

/// Shown to the user whenever generation fails, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str = "Could not generate the QR code. Please try again.";

pub const IMAGE_ALT_TEXT: &str = "Generated QR Code";

/// The single live outcome of the latest submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationResult {
    #[default]
    Idle,
    Loading,
    Success {
        image_url: String,
    },
    Failure {
        message: String,
    },
}

impl GenerationResult {
    pub fn success(image_url: impl Into<String>) -> Self {
        GenerationResult::Success {
            image_url: image_url.into(),
        }
    }

    pub fn failure() -> Self {
        GenerationResult::Failure {
            message: GENERATION_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GenerationResult::Loading)
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { image_url } => Some(image_url),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerationResult::Failure { message } => Some(message),
            _ => None,
        }
    }
}

/// What a page render needs to know about the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub text: String,
    pub result: GenerationResult,
    pub can_submit: bool,
    pub image_alt: String,
    pub download_filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_follow_variant() {
        let ok = GenerationResult::success("https://img/qr.png");
        assert_eq!(ok.image_url(), Some("https://img/qr.png"));
        assert_eq!(ok.error_message(), None);

        let failed = GenerationResult::failure();
        assert_eq!(failed.image_url(), None);
        assert_eq!(failed.error_message(), Some(GENERATION_FAILED_MESSAGE));

        assert!(GenerationResult::Loading.is_loading());
        assert_eq!(GenerationResult::default(), GenerationResult::Idle);
    }

    #[test]
    fn test_serializes_as_tagged_state() {
        let json = serde_json::to_value(GenerationResult::success("u")).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "success", "image_url": "u" }));

        let json = serde_json::to_value(GenerationResult::Idle).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "idle" }));
    }
}
