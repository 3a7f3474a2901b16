//! Generate Plating Images use case.
//!
//! Fans plating ideas out to the image generator concurrently. Failed slots
//! are dropped, never retried.

use crate::ports::image_generator::ImageGenerator;
use dishmuse_domain::{PlatingImage, parse_plating_ideas};
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_MAX_IMAGES: usize = 4;

#[derive(Clone)]
pub struct GeneratePlatingImagesUseCase {
    generator: Arc<dyn ImageGenerator>,
    max_images: usize,
}

impl GeneratePlatingImagesUseCase {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            generator,
            max_images: DEFAULT_MAX_IMAGES,
        }
    }

    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images;
        self
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_configured()
    }

    /// Generate one image per plating idea in `plating_text`.
    pub async fn execute(&self, plating_text: &str, dish: &str) -> Vec<PlatingImage> {
        if !self.generator.is_configured() {
            warn!("Image generator not configured; skipping plating images");
            return Vec::new();
        }

        let ideas: Vec<_> = parse_plating_ideas(plating_text)
            .into_iter()
            .take(self.max_images)
            .collect();

        let futures = ideas.iter().map(|idea| {
            let prompt = idea.image_prompt(dish);
            let generator = self.generator.clone();
            async move { generator.generate(&prompt).await }
        });
        let results = futures::future::join_all(futures).await;

        let images: Vec<PlatingImage> = ideas
            .into_iter()
            .zip(results)
            .enumerate()
            .filter_map(|(index, (idea, result))| match result {
                Ok(url) => Some(PlatingImage {
                    url,
                    section: idea.section,
                    description: idea.description,
                    index,
                }),
                Err(e) => {
                    warn!("Plating image {} ({}) failed: {}", index + 1, idea.section, e);
                    None
                }
            })
            .collect();

        info!("Generated {} plating images", images.len());
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::image_generator::{ImageGenerationError, NoImageGenerator};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Fails any prompt containing `fail_on`.
    struct MockImageGenerator {
        fail_on: &'static str,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ImageGenerator for MockImageGenerator {
        fn is_configured(&self) -> bool {
            true
        }

        async fn generate(&self, prompt: &str) -> Result<String, ImageGenerationError> {
            let n = {
                let mut prompts = self.prompts.lock().unwrap();
                prompts.push(prompt.to_string());
                prompts.len()
            };
            if prompt.contains(self.fail_on) {
                Err(ImageGenerationError::Api {
                    status: 500,
                    message: "boom".into(),
                })
            } else {
                Ok(format!("https://img.example/{n}.png"))
            }
        }
    }

    const PLATING: &str = "**Rustic:**\n- Metal thali\n**Brunch:**\n- Wooden tray\n**Café:**\n- White plate\n**Family:**\n- Enamel plate\n**Picnic:**\n- Bamboo basket";

    #[tokio::test]
    async fn test_failed_slots_are_dropped() {
        let generator = Arc::new(MockImageGenerator {
            fail_on: "Wooden tray",
            prompts: Mutex::new(Vec::new()),
        });
        let uc = GeneratePlatingImagesUseCase::new(generator.clone());

        let images = uc.execute(PLATING, "Pav Bhaji").await;

        // Five ideas, capped at four, one failed.
        assert_eq!(generator.prompts.lock().unwrap().len(), 4);
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].section, "Rustic");
        assert_eq!(images[1].section, "Café");
        assert_eq!(images[1].index, 2);
        assert!(generator.prompts.lock().unwrap()[0].contains("Pav Bhaji"));
    }

    #[tokio::test]
    async fn test_max_images_respected() {
        let generator = Arc::new(MockImageGenerator {
            fail_on: "never-matches",
            prompts: Mutex::new(Vec::new()),
        });
        let uc = GeneratePlatingImagesUseCase::new(generator).with_max_images(2);
        assert_eq!(uc.execute(PLATING, "").await.len(), 2);
    }

    #[tokio::test]
    async fn test_unconfigured_generator_yields_nothing() {
        let uc = GeneratePlatingImagesUseCase::new(Arc::new(NoImageGenerator));
        assert!(!uc.is_available());
        assert!(uc.execute(PLATING, "Dal").await.is_empty());
    }
}
