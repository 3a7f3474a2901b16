//! Plating image generation configuration (`[images]` section)

use serde::{Deserialize, Serialize};

/// Adobe Firefly settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileImagesConfig {
    pub enabled: bool,
    pub client_id_env: String,
    pub client_secret_env: String,
    pub token_url: String,
    pub api_url: String,
    /// Upper bound on images generated per plating request.
    pub max_images: usize,
}

impl Default for FileImagesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            client_id_env: "FIREFLY_CLIENT_ID".to_string(),
            client_secret_env: "FIREFLY_CLIENT_SECRET".to_string(),
            token_url: "https://ims-na1.adobelogin.com/ims/token/v3".to_string(),
            api_url: "https://firefly-api.adobe.io/v3/images/generate".to_string(),
            max_images: 4,
        }
    }
}

impl FileImagesConfig {
    /// Client id and secret, when both are set in the environment.
    pub fn resolve_credentials(&self) -> Option<(String, String)> {
        let id = std::env::var(&self.client_id_env).ok()?;
        let secret = std::env::var(&self.client_secret_env).ok()?;
        (!id.is_empty() && !secret.is_empty()).then_some((id, secret))
    }
}
