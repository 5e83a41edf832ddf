use crate::{
    config::GeminiConfig,
    error::{GenError, Result},
    gemini::GenerateImages,
    models::{
        AspectRatio, ImageAsset, ImageGenerationRequest, ImagenPrediction, PredictErrorResponse,
        PredictResponse, FALLBACK_MIME_TYPE,
    },
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub const MIN_IMAGES: u32 = 1;
pub const MAX_IMAGES: u32 = 4;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    config: GeminiConfig,
}

impl ImageClient {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("imagen-3.0-generate-002", "Imagen 3", "Google"),
            ("imagen-3.0-generate-001", "Imagen 3 (legacy)", "Google"),
            ("imagen-3.0-fast-generate-001", "Imagen 3 Fast", "Google"),
        ]
    }

    /// Issue one `:predict` call and map the response into displayable
    /// assets. No retries, no streaming; the transport's defaults are the
    /// only timeout.
    pub async fn generate(&self, request: ImageGenerationRequest) -> Result<Vec<ImageAsset>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenError::ConfigError("Gemini API key is required".into()))?;

        let prompt = request.prompt.trim();
        if prompt.is_empty() {
            return Err(GenError::RequestError("Prompt must not be empty".into()));
        }

        // The API rejects counts outside [1,4], so clamp before sending.
        let count = request.count.clamp(MIN_IMAGES, MAX_IMAGES);
        let model_id = request
            .model_id
            .as_deref()
            .unwrap_or_else(|| self.config.model_id());

        let payload = json!({
            "instances": [{
                "prompt": prompt
            }],
            "parameters": {
                "sampleCount": count,
                "aspectRatio": request.aspect_ratio.as_str(),
                "outputMimeType": FALLBACK_MIME_TYPE
            }
        });

        let url = format!(
            "{}/v1beta/models/{}:predict",
            self.config.base_url(),
            model_id
        );

        log::info!(
            "Generating {} image(s) with model: {} ({})",
            count,
            model_id,
            request.aspect_ratio
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GenError::classify_upstream(&e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<PredictErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| format!("HTTP {}: {}", status, body));
            log::error!("Image generation failed: {}", message);
            return Err(GenError::classify_upstream(&message));
        }

        let predict: PredictResponse = serde_json::from_str(&body)
            .map_err(|e| GenError::ResponseError(format!("Malformed API response: {}", e)))?;

        Self::map_predictions(predict.predictions, request.aspect_ratio)
    }

    /// Turn raw predictions into assets, preserving response order.
    /// Predictions without an image payload are dropped rather than failing
    /// the whole batch; the reported MIME type falls back to the one we
    /// requested.
    fn map_predictions(
        predictions: Vec<ImagenPrediction>,
        aspect_ratio: AspectRatio,
    ) -> Result<Vec<ImageAsset>> {
        let assets: Vec<ImageAsset> = predictions
            .into_iter()
            .filter_map(|prediction| match prediction.bytes_base64_encoded {
                Some(data) => Some(ImageAsset {
                    data,
                    mime_type: prediction
                        .mime_type
                        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string()),
                    aspect_ratio,
                }),
                None => {
                    log::warn!("Skipping a prediction without image payload");
                    None
                }
            })
            .collect();

        if assets.is_empty() {
            return Err(GenError::EmptyResponseError(
                "No image data received from API. The response might be empty or malformed."
                    .into(),
            ));
        }

        Ok(assets)
    }
}

#[async_trait]
impl GenerateImages for ImageClient {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<Vec<ImageAsset>> {
        ImageClient::generate(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(data: Option<&str>, mime: Option<&str>) -> ImagenPrediction {
        ImagenPrediction {
            bytes_base64_encoded: data.map(String::from),
            mime_type: mime.map(String::from),
        }
    }

    #[test]
    fn test_map_predictions_drops_malformed_preserving_order() {
        let predictions = vec![
            prediction(Some("QQ=="), Some("image/png")),
            prediction(None, Some("image/png")),
            prediction(Some("Qg=="), None),
        ];

        let assets =
            ImageClient::map_predictions(predictions, AspectRatio::Landscape).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].data, "QQ==");
        assert_eq!(assets[0].mime_type, "image/png");
        assert_eq!(assets[1].data, "Qg==");
        assert_eq!(assets[1].mime_type, FALLBACK_MIME_TYPE);
        assert_eq!(assets[1].aspect_ratio, AspectRatio::Landscape);
    }

    #[test]
    fn test_map_predictions_empty_is_an_error() {
        let err = ImageClient::map_predictions(vec![], AspectRatio::Square).unwrap_err();
        assert!(matches!(err, GenError::EmptyResponseError(_)));

        let err = ImageClient::map_predictions(
            vec![prediction(None, None), prediction(None, None)],
            AspectRatio::Square,
        )
        .unwrap_err();
        assert!(matches!(err, GenError::EmptyResponseError(_)));
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_prompt() {
        let client = ImageClient::new(
            Client::new(),
            GeminiConfig::new().with_api_key("test-key"),
        );
        let request = ImageGenerationRequest::new("   ");
        let err = client.generate(request).await.unwrap_err();
        assert!(matches!(err, GenError::RequestError(_)));
    }

    #[tokio::test]
    async fn test_generate_requires_api_key() {
        let client = ImageClient::new(Client::new(), GeminiConfig::new());
        let request = ImageGenerationRequest::new("a dragon");
        let err = client.generate(request).await.unwrap_err();
        assert!(matches!(err, GenError::ConfigError(_)));
    }
}
