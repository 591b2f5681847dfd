//! Recognition backend seam.

use async_trait::async_trait;
use image::DynamicImage;
use thiserror::Error;

use super::word::RawWord;

/// Errors a recognition backend can report. The suggester maps all of them to "no label".
#[derive(Error, Debug)]
pub enum RecognizerError {
    /// Backend not installed or not loaded.
    #[error("text recognizer unavailable: {0}")]
    Unavailable(String),

    #[error("failed to start text recognizer: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("text recognizer failed (status={status}): {stderr}")]
    Failed { status: String, stderr: String },

    #[error("failed to encode crop image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to parse recognizer output: {0}")]
    Parse(String),
}

/// A text recognizer that returns word boxes in the coordinate space of `image`.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    async fn recognize(
        &self,
        image: &DynamicImage,
        languages: &[String],
    ) -> Result<Vec<RawWord>, RecognizerError>;
}

/// Placeholder used when no recognizer is configured.
#[derive(Debug, Clone, Default)]
pub struct NoRecognizer;

#[async_trait]
impl TextRecognizer for NoRecognizer {
    fn name(&self) -> &str {
        "none"
    }

    async fn recognize(
        &self,
        _image: &DynamicImage,
        _languages: &[String],
    ) -> Result<Vec<RawWord>, RecognizerError> {
        Err(RecognizerError::Unavailable(
            "no text recognizer configured".to_string(),
        ))
    }
}
