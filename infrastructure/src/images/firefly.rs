//! Adobe Firefly text-to-image adapter.
//!
//! Authenticates with OAuth client credentials. The access token is cached
//! and refreshed five minutes before it expires.

use crate::config::FileImagesConfig;
use async_trait::async_trait;
use dishmuse_application::{ImageGenerationError, ImageGenerator};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

const TOKEN_SCOPE: &str = "openid,AdobeID,firefly_api,ff_apis";
const REFRESH_MARGIN: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

impl CachedToken {
    fn new(value: String, expires_in: Duration, now: Instant) -> Self {
        Self {
            value,
            refresh_at: now + expires_in.saturating_sub(REFRESH_MARGIN),
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.refresh_at
    }
}

#[derive(Debug)]
struct Credentials {
    client_id: String,
    client_secret: String,
}

/// [`ImageGenerator`] backed by Adobe Firefly.
pub struct FireflyImageGenerator {
    credentials: Option<Credentials>,
    token_url: String,
    api_url: String,
    token: Mutex<Option<CachedToken>>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    prompt: &'a str,
    content_class: &'static str,
    style: StylePresets,
    size: ImageSize,
    #[serde(rename = "n")]
    count: u32,
    seed: u32,
}

#[derive(Debug, Serialize)]
struct StylePresets {
    presets: [&'static str; 3],
}

#[derive(Debug, Serialize)]
struct ImageSize {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    outputs: Vec<GenerateOutput>,
}

#[derive(Debug, Deserialize)]
struct GenerateOutput {
    image: OutputImage,
}

#[derive(Debug, Deserialize)]
struct OutputImage {
    url: String,
}

impl FireflyImageGenerator {
    pub fn from_config(config: &FileImagesConfig) -> Self {
        let credentials = if config.enabled {
            config
                .resolve_credentials()
                .map(|(client_id, client_secret)| Credentials {
                    client_id,
                    client_secret,
                })
        } else {
            None
        };
        Self {
            credentials,
            token_url: config.token_url.clone(),
            api_url: config.api_url.clone(),
            token: Mutex::new(None),
            client: reqwest::Client::new(),
        }
    }

    fn credentials(&self) -> Result<&Credentials, ImageGenerationError> {
        self.credentials
            .as_ref()
            .ok_or(ImageGenerationError::NotConfigured)
    }

    async fn access_token(&self) -> Result<String, ImageGenerationError> {
        let credentials = self.credentials()?;
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.is_fresh(Instant::now())
        {
            return Ok(token.value.clone());
        }

        debug!("Requesting new Firefly access token");
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("scope", TOKEN_SCOPE),
            ])
            .send()
            .await
            .map_err(|e| ImageGenerationError::Auth(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageGenerationError::Auth(format!("{status}: {body}")));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ImageGenerationError::Auth(e.to_string()))?;

        info!("Firefly access token obtained");
        let fresh = CachedToken::new(
            token.access_token,
            Duration::from_secs(token.expires_in),
            Instant::now(),
        );
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }
}

fn generate_request(prompt: &str, seed: u32) -> GenerateRequest<'_> {
    GenerateRequest {
        prompt,
        content_class: "photo",
        style: StylePresets {
            presets: ["food_photography", "vibrant", "warm"],
        },
        size: ImageSize {
            width: 1024,
            height: 1024,
        },
        count: 1,
        seed,
    }
}

fn first_image_url(body: &str) -> Result<String, ImageGenerationError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ImageGenerationError::RequestFailed(e.to_string()))?;
    response
        .outputs
        .into_iter()
        .next()
        .map(|o| o.image.url)
        .ok_or(ImageGenerationError::EmptyResult)
}

#[async_trait]
impl ImageGenerator for FireflyImageGenerator {
    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, ImageGenerationError> {
        let token = self.access_token().await?;
        let credentials = self.credentials()?;
        let seed = rand::thread_rng().gen_range(0..1_000_000);

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &credentials.client_id)
            .bearer_auth(token)
            .header("accept", "application/json")
            .json(&generate_request(prompt, seed))
            .send()
            .await
            .map_err(|e| ImageGenerationError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ImageGenerationError::RequestFailed(e.to_string()))?;
        if status != 200 {
            return Err(ImageGenerationError::Api {
                status,
                message: body,
            });
        }
        first_image_url(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_refreshes_early() {
        let now = Instant::now();
        let token = CachedToken::new("t".into(), Duration::from_secs(3600), now);
        assert!(token.is_fresh(now + Duration::from_secs(3000)));
        assert!(!token.is_fresh(now + Duration::from_secs(3300)));
    }

    #[test]
    fn test_short_lived_token_is_never_fresh() {
        let now = Instant::now();
        let token = CachedToken::new("t".into(), Duration::from_secs(60), now);
        assert!(!token.is_fresh(now));
    }

    #[test]
    fn test_generate_request_body() {
        let json = serde_json::to_value(generate_request("a plate", 42)).unwrap();
        assert_eq!(json["prompt"], "a plate");
        assert_eq!(json["contentClass"], "photo");
        assert_eq!(json["style"]["presets"][0], "food_photography");
        assert_eq!(json["size"]["width"], 1024);
        assert_eq!(json["n"], 1);
        assert_eq!(json["seed"], 42);
    }

    #[test]
    fn test_first_image_url() {
        let body = r#"{"outputs":[{"seed":1,"image":{"url":"https://img/1.png"}}]}"#;
        assert_eq!(first_image_url(body).unwrap(), "https://img/1.png");
        assert!(matches!(
            first_image_url(r#"{"outputs":[]}"#),
            Err(ImageGenerationError::EmptyResult)
        ));
    }

    #[test]
    fn test_disabled_config_is_not_configured() {
        let config = FileImagesConfig {
            enabled: false,
            ..Default::default()
        };
        let generator = FireflyImageGenerator::from_config(&config);
        assert!(!generator.is_configured());
    }
}
