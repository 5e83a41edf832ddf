pub mod config;
pub mod controller;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;

pub use config::GeminiConfig;
pub use controller::{GenerationController, UiState};
pub use error::{GenError, Result};
pub use gemini::{GeminiClient, GenerateImages, ImageClient};
pub use models::{AspectRatio, ImageAsset, ImageGenerationRequest};
