//! Image generator port

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageGenerationError {
    #[error("Image generator not configured")]
    NotConfigured,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No image in response")]
    EmptyResult,
}

/// Text-to-image generation.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Whether credentials are present; unconfigured generators are skipped.
    fn is_configured(&self) -> bool;

    /// Generate one image and return its URL.
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenerationError>;
}

/// Generator used when image generation is disabled.
pub struct NoImageGenerator;

#[async_trait]
impl ImageGenerator for NoImageGenerator {
    fn is_configured(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ImageGenerationError> {
        Err(ImageGenerationError::NotConfigured)
    }
}
