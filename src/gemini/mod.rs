pub mod image_client;

use crate::{
    config::GeminiConfig,
    error::{GenError, Result},
    models::{ImageAsset, ImageGenerationRequest},
};
use async_trait::async_trait;

pub use image_client::ImageClient;

/// Seam between the form controller and the remote API, so the controller
/// can be driven against fakes in tests.
#[async_trait]
pub trait GenerateImages: Send + Sync {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<Vec<ImageAsset>>;
}

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    /// Build a client from an explicit configuration. Fails before any
    /// network call when no usable API key is present.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if !config.has_credentials() {
            return Err(GenError::ConfigError(
                "GEMINI_API_KEY is not configured. Please set it in your environment.".into(),
            ));
        }

        let http = reqwest::Client::new();

        Ok(Self {
            image_client: ImageClient::new(http, config),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
