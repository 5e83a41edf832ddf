use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// MIME type requested from the API, also used as the fallback label when a
/// prediction comes back without one.
pub const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// Requested width:height ratio for generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    Square,
    Portrait,
    Landscape,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Landscape => "16:9",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1:1" => Some(AspectRatio::Square),
            "9:16" => Some(AspectRatio::Portrait),
            "16:9" => Some(AspectRatio::Landscape),
            _ => None,
        }
    }

    pub fn all() -> &'static [AspectRatio] {
        &[
            AspectRatio::Square,
            AspectRatio::Portrait,
            AspectRatio::Landscape,
        ]
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub count: u32,
    pub aspect_ratio: AspectRatio,
    pub model_id: Option<String>,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            count: 1,
            aspect_ratio: AspectRatio::default(),
            model_id: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}

/// A displayable/downloadable image produced from one API prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAsset {
    /// Base64 encoded image payload.
    pub data: String,
    pub mime_type: String,
    /// The aspect ratio the image was requested with, kept for rendering.
    pub aspect_ratio: AspectRatio,
}

impl ImageAsset {
    /// Render the asset as a self-contained `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the base64 payload into raw image bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| GenError::ResponseError(format!("Invalid base64 image data: {}", e)))
    }

    /// File extension derived from the declared MIME type.
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            "image/jpeg" | "image/jpg" => "jpeg",
            _ => "jpeg",
        }
    }
}

/// Response body of the `models/{model}:predict` endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<ImagenPrediction>,
}

#[derive(Debug, Deserialize)]
pub struct ImagenPrediction {
    #[serde(rename = "bytesBase64Encoded")]
    pub bytes_base64_encoded: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

/// Error body returned by the API on failed calls.
#[derive(Debug, Deserialize)]
pub struct PredictErrorResponse {
    pub error: Option<PredictErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct PredictErrorDetail {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_round_trip() {
        for ratio in AspectRatio::all() {
            assert_eq!(AspectRatio::parse(ratio.as_str()), Some(*ratio));
        }
        assert_eq!(AspectRatio::parse("4:3"), None);
    }

    #[test]
    fn test_data_url() {
        let asset = ImageAsset {
            data: "aGVsbG8=".into(),
            mime_type: "image/png".into(),
            aspect_ratio: AspectRatio::Square,
        };
        assert_eq!(asset.to_data_url(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(asset.decode_bytes().unwrap(), b"hello");
        assert_eq!(asset.file_extension(), "png");
    }

    #[test]
    fn test_unknown_mime_defaults_to_jpeg() {
        let asset = ImageAsset {
            data: String::new(),
            mime_type: "application/octet-stream".into(),
            aspect_ratio: AspectRatio::Landscape,
        };
        assert_eq!(asset.file_extension(), "jpeg");
    }

    #[test]
    fn test_predict_response_parses_partial_predictions() {
        let json = r#"{
            "predictions": [
                {"bytesBase64Encoded": "QQ==", "mimeType": "image/png"},
                {"mimeType": "image/png"},
                {"bytesBase64Encoded": "Qg=="}
            ]
        }"#;
        let response: PredictResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predictions.len(), 3);
        assert!(response.predictions[1].bytes_base64_encoded.is_none());
        assert!(response.predictions[2].mime_type.is_none());
    }
}
