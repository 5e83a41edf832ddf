use std::env;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL_ID: &str = "imagen-3.0-generate-002";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model_id: Option<String>,
    pub base_url: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model_id: None,
            base_url: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the environment. `GEMINI_API_KEY` is the
    /// primary credential variable; `API_KEY` is honored as a legacy
    /// fallback.
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty());
        let model_id = env::var("GEMINI_MODEL_ID").ok();
        let base_url = env::var("GEMINI_BASE_URL").ok();

        GeminiConfig {
            api_key,
            model_id,
            base_url,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Whether a usable credential is present. A blank key counts as
    /// missing.
    pub fn has_credentials(&self) -> bool {
        self.api_key
            .as_ref()
            .map_or(false, |k| !k.trim().is_empty())
    }

    pub fn model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(DEFAULT_MODEL_ID)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeminiConfig::new();
        assert!(!config.has_credentials());
        assert_eq!(config.model_id(), DEFAULT_MODEL_ID);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder() {
        let config = GeminiConfig::new()
            .with_api_key("test-key")
            .with_model("imagen-3.0-fast-generate-001");
        assert!(config.has_credentials());
        assert_eq!(config.model_id(), "imagen-3.0-fast-generate-001");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = GeminiConfig::new().with_api_key("   ");
        assert!(!config.has_credentials());
    }
}
