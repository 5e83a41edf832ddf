use crate::{
    config::GeminiConfig,
    gemini::GenerateImages,
    models::{AspectRatio, ImageAsset, ImageGenerationRequest},
};

pub const MIN_IMAGE_COUNT: u32 = 1;
pub const MAX_IMAGE_COUNT: u32 = 4;

const PROMPT_REQUIRED_MESSAGE: &str = "Please enter a prompt to generate image(s).";
const MISSING_KEY_MESSAGE: &str =
    "GEMINI_API_KEY is not configured. Please set it in your environment.";
const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred during image generation.";

const SLUG_MAX_CHARS: usize = 40;
const SLUG_FALLBACK: &str = "image";

/// View-facing state of the generation form. Exactly one variant holds at
/// any time; only the controller mutates it.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Loading,
    Error(String),
    Populated(Vec<ImageAsset>),
}

/// Owns the transient form fields and drives the state transitions around
/// one asynchronous generation call.
pub struct GenerationController {
    prompt: String,
    count: u32,
    aspect_ratio: AspectRatio,
    state: UiState,
    credentials_present: bool,
}

impl GenerationController {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            prompt: String::new(),
            count: MIN_IMAGE_COUNT,
            aspect_ratio: AspectRatio::default(),
            state: UiState::Idle,
            credentials_present: config.has_credentials(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, UiState::Loading)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = count.clamp(MIN_IMAGE_COUNT, MAX_IMAGE_COUNT);
    }

    /// Apply a raw count edit. Non-numeric input is coerced to 1 before
    /// clamping into [1,4].
    pub fn set_count_input(&mut self, raw: &str) {
        self.count = clamp_image_count(raw.trim().parse::<i64>().unwrap_or(1));
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Validate the form and run one generation call, moving through
    /// Loading into Populated or Error. A second submit while Loading is
    /// rejected as a no-op.
    pub async fn submit(&mut self, client: &dyn GenerateImages) {
        if self.is_loading() {
            log::debug!("Ignoring submit while a request is in flight");
            return;
        }

        if self.prompt.trim().is_empty() {
            self.state = UiState::Error(PROMPT_REQUIRED_MESSAGE.to_string());
            return;
        }

        if !self.credentials_present {
            self.state = UiState::Error(MISSING_KEY_MESSAGE.to_string());
            return;
        }

        // Clears any prior error or result.
        self.state = UiState::Loading;

        let request = ImageGenerationRequest::new(self.prompt.trim())
            .with_count(self.count)
            .with_aspect_ratio(self.aspect_ratio);

        match client.generate(request).await {
            Ok(assets) => {
                log::info!("Generated {} image(s)", assets.len());
                self.state = UiState::Populated(assets);
            }
            Err(err) => {
                log::error!("Image generation failed: {}", err);
                let message = err.message().trim();
                self.state = UiState::Error(if message.is_empty() {
                    UNKNOWN_ERROR_MESSAGE.to_string()
                } else {
                    message.to_string()
                });
            }
        }
    }

    /// Filename offered when the user downloads one of the populated
    /// assets.
    pub fn download_filename(&self, index: usize, asset: &ImageAsset) -> String {
        format!(
            "ai_image_{}_{}.{}",
            index + 1,
            prompt_slug(&self.prompt),
            asset.file_extension()
        )
    }

    #[cfg(test)]
    fn force_loading(&mut self) {
        self.state = UiState::Loading;
    }
}

/// Clamp a count edit into [1,4]. Matches the form behavior of coercing
/// anything non-positive up to 1 and anything above 4 down to 4.
pub fn clamp_image_count(raw: i64) -> u32 {
    raw.max(MIN_IMAGE_COUNT as i64).min(MAX_IMAGE_COUNT as i64) as u32
}

/// Derive a human-readable file slug from a prompt: first 40 characters,
/// anything outside letters/digits/whitespace/hyphen stripped, whitespace
/// runs collapsed to single underscores.
pub fn prompt_slug(prompt: &str) -> String {
    let cleaned: String = prompt
        .chars()
        .take(SLUG_MAX_CHARS)
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    let slug = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    if slug.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        slug
    }
}
